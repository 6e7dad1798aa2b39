//! Query assembly: clause state plus the fixed-order renderer.

use crate::column::{Column, Order, column_list};
use crate::criteria::CriteriaBuilder;
use crate::error::{CriteriaError, CriteriaResult, reject};
use crate::param::ParamList;
use crate::predicate::{Binder, Predicate};
use crate::projection::{DistinctOn, Select};
use tokio_postgres::types::ToSql;

/// Clause state of one SELECT query.
///
/// Setters overwrite (last write wins) and may be called in any order; the
/// rendered clause order is always projection, FROM, joins, WHERE, GROUP BY,
/// ORDER BY, LIMIT, OFFSET.
///
/// [`get_query`](Self::get_query) renders with values quoted inline and can be
/// called repeatedly. [`build`](Self::build) consumes the query and renders
/// `$n` placeholders with their parameters.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct CriteriaQuery<'a> {
    select: Option<Select>,
    criteria_builder: Option<&'a CriteriaBuilder>,
    predicate: Option<Predicate>,
    distinct_on: Option<DistinctOn>,
    order_by: Vec<Order>,
    group_by: Vec<Column>,
    limit: i64,
    offset: Option<i64>,
    distinct: bool,
    tag: Option<String>,
}

impl<'a> CriteriaQuery<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, select: Select) -> Self {
        self.select = Some(select);
        self
    }

    /// The builder whose root and joins make up FROM.
    pub fn criteria_builder(mut self, builder: &'a CriteriaBuilder) -> Self {
        self.criteria_builder = Some(builder);
        self
    }

    pub fn where_(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn distinct_on(mut self, distinct_on: DistinctOn) -> Self {
        self.distinct_on = Some(distinct_on);
        self
    }

    pub fn order_by(mut self, orders: impl IntoIterator<Item = Order>) -> Self {
        self.order_by = orders.into_iter().collect();
        self
    }

    pub fn group_by(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.group_by = columns.into_iter().collect();
        self
    }

    /// Values below 1 mean no LIMIT.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Requires a limit of at least 1 at render time.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Emit `DISTINCT` in the projection. Cannot be combined with a non-empty
    /// [`distinct_on`](Self::distinct_on).
    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// Label carried on the rendered-SQL trace event.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Render the SQL with values quoted inline.
    pub fn get_query(&self) -> CriteriaResult<String> {
        let sql = self.render(&mut Binder::Inline)?;
        self.trace(&sql, 0);
        Ok(sql)
    }

    /// Render the SQL with `$n` placeholders and collect the bound values.
    pub fn build(self) -> CriteriaResult<BuiltQuery> {
        let mut params = ParamList::new();
        let sql = self.render(&mut Binder::Params(&mut params))?;
        self.trace(&sql, params.len());
        Ok(BuiltQuery { sql, params })
    }

    fn render(&self, binder: &mut Binder<'_>) -> CriteriaResult<String> {
        let mut sql = self.render_projection()?;

        let builder = self
            .criteria_builder
            .ok_or_else(|| reject(CriteriaError::MissingCriteriaBuilder))?;
        let root = builder
            .from_root()
            .ok_or_else(|| reject(CriteriaError::FromNotDefined))?;
        sql.push_str(&root.table());
        sql.push(' ');
        sql.push_str(&root.alias);

        for joined in builder.joins() {
            if let Some(join) = &joined.join {
                sql.push_str(&format!(
                    " {} {} {} ON {} = {}",
                    join.kind(),
                    joined.table(),
                    joined.alias,
                    join.source(),
                    join.target()
                ));
            }
        }

        if let Some(predicate) = &self.predicate {
            let condition = predicate.render(binder);
            if !condition.trim().is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&condition);
            }
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&column_list(&self.group_by));
        }

        if !self.order_by.is_empty() {
            let orders: Vec<String> = self.order_by.iter().map(Order::to_string).collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&orders.join(", "));
        }

        if self.limit > 0 {
            sql.push_str(&format!(" LIMIT {}", self.limit));
        }

        if let Some(offset) = self.offset {
            if self.limit < 1 {
                return Err(reject(CriteriaError::OffsetWithoutLimit {
                    limit: self.limit,
                    offset,
                }));
            }
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        Ok(sql)
    }

    fn render_projection(&self) -> CriteriaResult<String> {
        let distinct_on = self.distinct_on.as_ref().filter(|on| !on.is_empty());

        let modifier = match (distinct_on, self.distinct) {
            (Some(_), true) => return Err(reject(CriteriaError::DistinctConflict)),
            (Some(on), false) => format!("{} ", on.to_sql()),
            (None, true) => "DISTINCT ".to_string(),
            (None, false) => String::new(),
        };

        let select = self
            .select
            .as_ref()
            .ok_or_else(|| reject(CriteriaError::MissingProjection))?;
        Ok(select.render(&modifier))
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn trace(&self, sql: &str, param_count: usize) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "pgcriteria.sql",
            tag = self.tag.as_deref(),
            param_count,
            sql = %sql,
            "criteria query rendered"
        );
    }
}

/// Rendered SQL with its bind parameters, in placeholder order.
#[derive(Clone, Debug)]
pub struct BuiltQuery {
    sql: String,
    params: ParamList,
}

impl BuiltQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }

    /// Parameters in the shape `tokio_postgres::Client::query` accepts.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.as_refs()
    }

    pub fn into_parts(self) -> (String, ParamList) {
        (self.sql, self.params)
    }
}
