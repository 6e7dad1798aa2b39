//! WHERE clause predicates.
//!
//! A [`Predicate`] is an immutable tree of comparisons combined with AND/OR.
//! It renders in two ways:
//!
//! - [`Predicate::to_inline_sql`] quotes every value into the SQL text
//!   (`m.status = 'ACTIVE'`);
//! - [`Predicate::build`] emits `$n` placeholders and collects the values into
//!   a [`ParamList`].
//!
//! Groups render as `( a and b )` / `( a or b )`.

use crate::column::Column;
use crate::param::{Param, ParamList};
use std::fmt;
use tokio_postgres::types::ToSql;

/// Ordered comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl CompareOp {
    pub const fn sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Gte => ">=",
            CompareOp::Lte => "<=",
        }
    }
}

/// Where `%` wildcards go around a LIKE value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikeMode {
    /// `%value%`
    Contains,
    /// `value%`
    StartsWith,
    /// `%value`
    EndsWith,
    /// `value`
    #[default]
    Exact,
}

impl LikeMode {
    pub fn pattern(self, value: &str) -> String {
        match self {
            LikeMode::Contains => format!("%{value}%"),
            LikeMode::StartsWith => format!("{value}%"),
            LikeMode::EndsWith => format!("%{value}"),
            LikeMode::Exact => value.to_string(),
        }
    }
}

/// A composable WHERE condition.
#[derive(Clone, Debug)]
pub enum Predicate {
    /// column op value
    Compare {
        column: Column,
        op: CompareOp,
        value: Param,
    },

    /// column IN (...) or column NOT IN (...)
    InList {
        column: Column,
        values: Vec<Param>,
        negated: bool,
    },

    /// column LIKE pattern
    Like { column: Column, pattern: Param },

    /// column BETWEEN from and to
    Between {
        column: Column,
        from: Param,
        to: Param,
    },

    /// All conditions must hold.
    And(Vec<Predicate>),

    /// At least one condition must hold.
    Or(Vec<Predicate>),
}

impl Predicate {
    /// column = value
    pub fn eq<T>(column: Column, value: T) -> Self
    where
        T: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Self::compare(column, CompareOp::Eq, value)
    }

    /// column > value
    pub fn gt<T>(column: Column, value: T) -> Self
    where
        T: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Self::compare(column, CompareOp::Gt, value)
    }

    /// column < value
    pub fn lt<T>(column: Column, value: T) -> Self
    where
        T: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Self::compare(column, CompareOp::Lt, value)
    }

    /// column >= value
    pub fn gte<T>(column: Column, value: T) -> Self
    where
        T: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Self::compare(column, CompareOp::Gte, value)
    }

    /// column <= value
    pub fn lte<T>(column: Column, value: T) -> Self
    where
        T: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Self::compare(column, CompareOp::Lte, value)
    }

    fn compare<T>(column: Column, op: CompareOp, value: T) -> Self
    where
        T: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Predicate::Compare {
            column,
            op,
            value: Param::new(value),
        }
    }

    /// column IN (values...)
    pub fn in_list<T>(column: Column, values: impl IntoIterator<Item = T>) -> Self
    where
        T: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Predicate::InList {
            column,
            values: values.into_iter().map(Param::new).collect(),
            negated: false,
        }
    }

    /// column NOT IN (values...)
    pub fn not_in<T>(column: Column, values: impl IntoIterator<Item = T>) -> Self
    where
        T: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Predicate::InList {
            column,
            values: values.into_iter().map(Param::new).collect(),
            negated: true,
        }
    }

    /// column LIKE pattern, with wildcards placed by `mode`.
    pub fn like(column: Column, value: impl fmt::Display, mode: LikeMode) -> Self {
        Predicate::Like {
            column,
            pattern: Param::new(mode.pattern(&value.to_string())),
        }
    }

    /// column BETWEEN from and to
    pub fn between<T>(column: Column, from: T, to: T) -> Self
    where
        T: ToSql + fmt::Display + Send + Sync + 'static,
    {
        Predicate::Between {
            column,
            from: Param::new(from),
            to: Param::new(to),
        }
    }

    pub fn and(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::And(predicates.into_iter().collect())
    }

    pub fn or(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::Or(predicates.into_iter().collect())
    }

    /// Combine this predicate with another using AND.
    pub fn and_with(self, other: Predicate) -> Predicate {
        match self {
            Predicate::And(mut predicates) => {
                predicates.push(other);
                Predicate::And(predicates)
            }
            _ => Predicate::And(vec![self, other]),
        }
    }

    /// Combine this predicate with another using OR.
    pub fn or_with(self, other: Predicate) -> Predicate {
        match self {
            Predicate::Or(mut predicates) => {
                predicates.push(other);
                Predicate::Or(predicates)
            }
            _ => Predicate::Or(vec![self, other]),
        }
    }

    /// Check if this predicate contains no conditions.
    pub fn is_empty(&self) -> bool {
        match self {
            Predicate::And(predicates) | Predicate::Or(predicates) => {
                predicates.iter().all(Predicate::is_empty)
            }
            _ => false,
        }
    }

    /// Render with values quoted inline.
    pub fn to_inline_sql(&self) -> String {
        self.render(&mut Binder::Inline)
    }

    /// Render with `$n` placeholders, collecting values into `params`.
    ///
    /// Placeholder numbering continues from the current length of `params`.
    pub fn build(&self, params: &mut ParamList) -> String {
        self.render(&mut Binder::Params(params))
    }

    pub(crate) fn render(&self, binder: &mut Binder<'_>) -> String {
        match self {
            Predicate::Compare { column, op, value } => {
                format!("{} {} {}", column, op.sql(), binder.bind(value))
            }
            Predicate::InList {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    return if *negated { "1=1".to_string() } else { "1=0".to_string() };
                }
                let items: Vec<String> = values.iter().map(|v| binder.bind(v)).collect();
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{} {} ({})", column, op, items.join(binder.list_separator()))
            }
            Predicate::Like { column, pattern } => {
                format!("{} LIKE {}", column, binder.bind(pattern))
            }
            Predicate::Between { column, from, to } => {
                let from = binder.bind(from);
                let to = binder.bind(to);
                format!("{column} BETWEEN {from} and {to}")
            }
            Predicate::And(predicates) => render_group(predicates, " and ", binder),
            Predicate::Or(predicates) => render_group(predicates, " or ", binder),
        }
    }
}

fn render_group(predicates: &[Predicate], connective: &str, binder: &mut Binder<'_>) -> String {
    let parts: Vec<String> = predicates
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.render(binder))
        .collect();
    if parts.is_empty() {
        return String::new();
    }
    format!("( {} )", parts.join(connective))
}

/// Where predicate values go while rendering.
pub(crate) enum Binder<'a> {
    /// Quote values into the SQL text.
    Inline,
    /// Replace values with `$n` and collect them.
    Params(&'a mut ParamList),
}

impl Binder<'_> {
    fn bind(&mut self, param: &Param) -> String {
        match self {
            Binder::Inline => param.quoted(),
            Binder::Params(params) => format!("${}", params.push_param(param.clone())),
        }
    }

    fn list_separator(&self) -> &'static str {
        match self {
            Binder::Inline => ",",
            Binder::Params(_) => ", ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str) -> Column {
        Column::qualified("m", name)
    }

    #[test]
    fn test_simple_eq() {
        let p = Predicate::eq(col("status"), "ACTIVE");
        assert_eq!(p.to_inline_sql(), "m.status = 'ACTIVE'");

        let mut params = ParamList::new();
        assert_eq!(p.build(&mut params), "m.status = $1");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_ordered_comparisons_match_their_names() {
        assert_eq!(Predicate::gt(col("age"), 18i32).to_inline_sql(), "m.age > '18'");
        assert_eq!(Predicate::lt(col("age"), 65i32).to_inline_sql(), "m.age < '65'");
        assert_eq!(Predicate::gte(col("age"), 18i32).to_inline_sql(), "m.age >= '18'");
        assert_eq!(Predicate::lte(col("age"), 65i32).to_inline_sql(), "m.age <= '65'");
    }

    #[test]
    fn test_in_list() {
        let p = Predicate::in_list(col("role"), ["admin", "owner"]);
        assert_eq!(p.to_inline_sql(), "m.role IN ('admin','owner')");

        let mut params = ParamList::new();
        assert_eq!(p.build(&mut params), "m.role IN ($1, $2)");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_not_in() {
        let p = Predicate::not_in(col("id"), vec![1i64, 2, 3]);
        assert_eq!(p.to_inline_sql(), "m.id NOT IN ('1','2','3')");
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(Predicate::in_list(col("id"), Vec::<i64>::new()).to_inline_sql(), "1=0");
        assert_eq!(Predicate::not_in(col("id"), Vec::<i64>::new()).to_inline_sql(), "1=1");

        let mut params = ParamList::new();
        Predicate::in_list(col("id"), Vec::<i64>::new()).build(&mut params);
        assert!(params.is_empty());
    }

    #[test]
    fn test_like_modes() {
        let name = || col("user_name");
        assert_eq!(
            Predicate::like(name(), "ali", LikeMode::Contains).to_inline_sql(),
            "m.user_name LIKE '%ali%'"
        );
        assert_eq!(
            Predicate::like(name(), "ali", LikeMode::StartsWith).to_inline_sql(),
            "m.user_name LIKE 'ali%'"
        );
        assert_eq!(
            Predicate::like(name(), "ali", LikeMode::EndsWith).to_inline_sql(),
            "m.user_name LIKE '%ali'"
        );
        assert_eq!(
            Predicate::like(name(), "ali", LikeMode::Exact).to_inline_sql(),
            "m.user_name LIKE 'ali'"
        );
    }

    #[test]
    fn test_between() {
        let p = Predicate::between(col("age"), 18i32, 65i32);
        assert_eq!(p.to_inline_sql(), "m.age BETWEEN '18' and '65'");

        let mut params = ParamList::new();
        assert_eq!(p.build(&mut params), "m.age BETWEEN $1 and $2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_groups() {
        let p = Predicate::and([
            Predicate::eq(col("status"), "ACTIVE"),
            Predicate::or([
                Predicate::eq(col("role"), "admin"),
                Predicate::eq(col("role"), "owner"),
            ]),
        ]);
        assert_eq!(
            p.to_inline_sql(),
            "( m.status = 'ACTIVE' and ( m.role = 'admin' or m.role = 'owner' ) )"
        );

        let mut params = ParamList::new();
        assert_eq!(
            p.build(&mut params),
            "( m.status = $1 and ( m.role = $2 or m.role = $3 ) )"
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_empty_groups_render_nothing() {
        let p = Predicate::and([Predicate::or([]), Predicate::and([])]);
        assert!(p.is_empty());
        assert_eq!(p.to_inline_sql(), "");

        let p = Predicate::and([Predicate::and([]), Predicate::eq(col("id"), 7i64)]);
        assert_eq!(p.to_inline_sql(), "( m.id = '7' )");
    }

    #[test]
    fn test_and_with_flattens() {
        let p = Predicate::eq(col("a"), 1i32)
            .and_with(Predicate::eq(col("b"), 2i32))
            .and_with(Predicate::eq(col("c"), 3i32));
        assert!(matches!(&p, Predicate::And(items) if items.len() == 3));

        let p = Predicate::eq(col("a"), 1i32).or_with(Predicate::eq(col("b"), 2i32));
        assert_eq!(p.to_inline_sql(), "( m.a = '1' or m.b = '2' )");
    }

    #[test]
    fn test_build_continues_numbering() {
        let mut params = ParamList::new();
        params.push_param(Param::new(0i64));
        let sql = Predicate::eq(col("id"), 5i64).build(&mut params);
        assert_eq!(sql, "m.id = $2");
    }

    #[test]
    fn test_inline_quotes_are_escaped() {
        let p = Predicate::eq(col("last_name"), "O'Brien");
        assert_eq!(p.to_inline_sql(), "m.last_name = 'O''Brien'");
    }
}
