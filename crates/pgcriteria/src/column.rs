//! Alias-qualified column references and ORDER BY directives.

use std::fmt;

/// A fully-qualified column reference: `alias.column` or `alias.*`.
///
/// Columns are produced by [`Root`](crate::Root) and cannot be built from
/// arbitrary text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    name: String,
}

impl Column {
    pub(crate) fn qualified(alias: &str, column: &str) -> Self {
        Self {
            name: format!("{alias}.{column}"),
        }
    }

    pub(crate) fn wildcard(alias: &str) -> Self {
        Self::qualified(alias, "*")
    }

    /// The rendered reference.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alias part of the reference.
    pub fn alias(&self) -> &str {
        self.name
            .split_once('.')
            .map_or(self.name.as_str(), |(alias, _)| alias)
    }

    /// Whether this is an `alias.*` reference.
    pub fn is_wildcard(&self) -> bool {
        self.name.ends_with(".*")
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Render columns as a comma-separated list.
pub(crate) fn column_list(columns: &[Column]) -> String {
    let mut out = String::new();
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&column.name);
    }
    out
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderType {
    #[default]
    Asc,
    Desc,
}

impl OrderType {
    pub const fn sql(self) -> &'static str {
        match self {
            OrderType::Asc => "ASC",
            OrderType::Desc => "DESC",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}

/// An ORDER BY item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    column: Column,
    direction: OrderType,
}

impl Order {
    pub fn new(column: Column, direction: OrderType) -> Self {
        Self { column, direction }
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn direction(&self) -> OrderType {
        self.direction
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.direction)
    }
}
