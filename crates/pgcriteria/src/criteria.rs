//! The criteria DSL: roots, joins, projections, predicates and orders.

use crate::column::{Column, Order, OrderType};
use crate::config::{CriteriaConfig, JoinAlias, check_alias, is_reserved_keyword};
use crate::error::{CriteriaError, CriteriaResult, reject};
use crate::predicate::{LikeMode, Predicate};
use crate::projection::{DistinctOn, Select};
use crate::query::CriteriaQuery;
use crate::root::{ErasedRoot, JoinInfo, JoinKind, Root};
use crate::schema::{Entity, Field, abbreviate};
use std::fmt;
use tokio_postgres::types::ToSql;

/// Factory for the pieces of one criteria query.
///
/// The builder owns the `from` root and the joins declared against it, and
/// hands out [`Root`] descriptors whose columns feed projections, predicates
/// and orders.
///
/// # Example
///
/// ```ignore
/// let mut cb = CriteriaBuilder::new();
/// let user = cb.from::<User>()?;
/// let address = cb.join::<Address>(&user.column("id")?, "user_id", JoinKind::LeftOuter)?;
///
/// let sql = cb
///     .query()
///     .select(cb.select(&user))
///     .distinct(true)
///     .where_(cb.and([cb.equals(&address.column("city")?, "Oslo")]))
///     .limit(10)
///     .get_query()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CriteriaBuilder {
    config: CriteriaConfig,
    from_root: Option<ErasedRoot>,
    joins: Vec<ErasedRoot>,
}

impl CriteriaBuilder {
    pub fn new() -> Self {
        Self::with_config(CriteriaConfig::new())
    }

    pub fn with_config(config: CriteriaConfig) -> Self {
        Self {
            config,
            from_root: None,
            joins: Vec::new(),
        }
    }

    pub fn config(&self) -> &CriteriaConfig {
        &self.config
    }

    // ==================== Roots ====================

    /// Declare the entity the query selects from.
    ///
    /// The root gets the configured root alias. Fails with
    /// [`CriteriaError::FromAlreadyDefined`] on a second call and with
    /// [`CriteriaError::InvalidAlias`] if the root alias is not a usable
    /// identifier.
    pub fn from<T: Entity>(&mut self) -> CriteriaResult<Root<T>> {
        if self.from_root.is_some() {
            return Err(reject(CriteriaError::FromAlreadyDefined));
        }
        check_alias(self.config.root_alias, false)?;

        let root = Root::<T>::new(self.config.root_alias);
        self.from_root = Some(root.erase());
        Ok(root)
    }

    /// Join `T` on `source = <alias>.<join_field>`.
    ///
    /// `source` is a column of an entity already in the query. The joined
    /// entity receives a fresh alias; nothing is recorded if the call fails.
    pub fn join<T: Entity>(
        &mut self,
        source: &Column,
        join_field: &str,
        kind: JoinKind,
    ) -> CriteriaResult<Root<T>> {
        if self.from_root.is_none() {
            return Err(reject(CriteriaError::FromNotDefined));
        }

        let target_column = T::meta().column_name(join_field)?;
        self.push_join(source, &target_column, kind)
    }

    /// Typed variant of [`join`](Self::join).
    pub fn join_on<T: Entity>(
        &mut self,
        source: &Column,
        join_field: Field<T>,
        kind: JoinKind,
    ) -> CriteriaResult<Root<T>> {
        if self.from_root.is_none() {
            return Err(reject(CriteriaError::FromNotDefined));
        }

        self.push_join(source, &join_field.column_name(), kind)
    }

    fn push_join<T: Entity>(
        &mut self,
        source: &Column,
        target_column: &str,
        kind: JoinKind,
    ) -> CriteriaResult<Root<T>> {
        let base = match self.config.join_alias {
            JoinAlias::Fixed(base) => base.to_string(),
            JoinAlias::Abbreviated => abbreviate(T::meta().name),
        };
        check_alias(&base, true)?;

        let alias = self.unique_alias(&base);
        let target = Column::qualified(&alias, target_column);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "pgcriteria",
            entity = T::meta().name,
            alias = %alias,
            kind = %kind,
            "join registered"
        );

        let root = Root::<T>::new(alias).with_join(JoinInfo::new(source.clone(), target, kind));
        self.joins.push(root.erase());
        Ok(root)
    }

    /// First alias in `base`, `base1`, `base2`, ... that is neither used by
    /// this builder nor a reserved keyword.
    pub fn unique_alias(&self, base: &str) -> String {
        let free = |alias: &str| !self.has_alias(alias) && !is_reserved_keyword(alias);
        if free(base) {
            return base.to_string();
        }
        (1usize..)
            .map(|n| format!("{base}{n}"))
            .find(|alias| free(alias))
            .unwrap_or_else(|| base.to_string())
    }

    /// Whether `alias` is taken by the root or a join.
    pub fn has_alias(&self, alias: &str) -> bool {
        self.from_root.iter().chain(&self.joins).any(|root| root.alias == alias)
    }

    /// Aliases in declaration order, root first.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.from_root
            .iter()
            .chain(&self.joins)
            .map(|root| root.alias.as_str())
    }

    pub fn has_from(&self) -> bool {
        self.from_root.is_some()
    }

    pub(crate) fn from_root(&self) -> Option<&ErasedRoot> {
        self.from_root.as_ref()
    }

    pub(crate) fn joins(&self) -> &[ErasedRoot] {
        &self.joins
    }

    // ==================== Projections ====================

    /// `SELECT DISTINCT <alias>.* FROM`
    pub fn select<T: Entity>(&self, root: &Root<T>) -> Select {
        Select::Entity(root.all_columns())
    }

    /// `SELECT COUNT(DISTINCT <alias>.*) FROM`
    pub fn count<T: Entity>(&self, root: &Root<T>) -> Select {
        Select::CountEntity(root.all_columns())
    }

    /// `SELECT COUNT(DISTINCT c1, c2) FROM`
    pub fn count_columns(&self, columns: &[Column]) -> Select {
        Select::CountColumns(columns.to_vec())
    }

    /// `SELECT DISTINCT c1, c2 FROM`
    pub fn multi_select(&self, columns: &[Column]) -> Select {
        Select::Columns(columns.to_vec())
    }

    /// `DISTINCT ON (c1, c2)`
    pub fn select_distinct_on(&self, columns: &[Column]) -> DistinctOn {
        DistinctOn::new(columns.iter().cloned())
    }

    // ==================== Predicates ====================

    pub fn equals<V>(&self, column: &Column, value: V) -> Predicate
    where
        V: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Predicate::eq(column.clone(), value)
    }

    pub fn in_list<V>(&self, column: &Column, values: impl IntoIterator<Item = V>) -> Predicate
    where
        V: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Predicate::in_list(column.clone(), values)
    }

    pub fn not_in<V>(&self, column: &Column, values: impl IntoIterator<Item = V>) -> Predicate
    where
        V: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Predicate::not_in(column.clone(), values)
    }

    pub fn like(&self, column: &Column, value: impl fmt::Display, mode: LikeMode) -> Predicate {
        Predicate::like(column.clone(), value, mode)
    }

    pub fn between<V>(&self, column: &Column, from: V, to: V) -> Predicate
    where
        V: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Predicate::between(column.clone(), from, to)
    }

    /// `column > value`
    pub fn greater_than<V>(&self, column: &Column, value: V) -> Predicate
    where
        V: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Predicate::gt(column.clone(), value)
    }

    /// `column < value`
    pub fn less_than<V>(&self, column: &Column, value: V) -> Predicate
    where
        V: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Predicate::lt(column.clone(), value)
    }

    /// `column >= value`
    pub fn greater_than_equal<V>(&self, column: &Column, value: V) -> Predicate
    where
        V: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Predicate::gte(column.clone(), value)
    }

    /// `column <= value`
    pub fn less_than_equal<V>(&self, column: &Column, value: V) -> Predicate
    where
        V: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Predicate::lte(column.clone(), value)
    }

    /// `( p1 and p2 )`
    pub fn and(&self, predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
        Predicate::and(predicates)
    }

    /// `( p1 or p2 )`
    pub fn or(&self, predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
        Predicate::or(predicates)
    }

    // ==================== Orders ====================

    pub fn asc(&self, column: &Column) -> Order {
        Order::new(column.clone(), OrderType::Asc)
    }

    pub fn desc(&self, column: &Column) -> Order {
        Order::new(column.clone(), OrderType::Desc)
    }

    /// Start a query that reads its roots and joins from this builder.
    pub fn query(&self) -> CriteriaQuery<'_> {
        CriteriaQuery::new().criteria_builder(self)
    }
}
