//! SELECT projections and the DISTINCT ON fragment.

use crate::column::{Column, column_list};

/// What the SELECT clause returns.
///
/// The DISTINCT modifier is not part of the projection; the query decides it
/// at render time from its `distinct` flag and distinct-on columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Select {
    /// `alias.*` of one entity
    Entity(Column),
    /// `COUNT(alias.*)`
    CountEntity(Column),
    /// `COUNT(c1, c2)`
    CountColumns(Vec<Column>),
    /// `c1, c2`
    Columns(Vec<Column>),
}

impl Select {
    /// Render `SELECT <modifier><projection> FROM `.
    ///
    /// `modifier` is either empty or ends with a space (`DISTINCT `,
    /// `DISTINCT ON (m.a) `).
    pub(crate) fn render(&self, modifier: &str) -> String {
        match self {
            Select::Entity(all) => format!("SELECT {modifier}{all} FROM "),
            Select::CountEntity(all) => format!("SELECT COUNT({modifier}{all}) FROM "),
            Select::CountColumns(columns) => {
                format!("SELECT COUNT({modifier}{}) FROM ", column_list(columns))
            }
            Select::Columns(columns) => format!("SELECT {modifier}{} FROM ", column_list(columns)),
        }
    }
}

/// Columns of a `DISTINCT ON (...)` modifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistinctOn {
    columns: Vec<Column>,
}

impl DistinctOn {
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// `DISTINCT ON (c1, c2)`
    pub fn to_sql(&self) -> String {
        format!("DISTINCT ON ({})", column_list(&self.columns))
    }
}
