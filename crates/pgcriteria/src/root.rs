//! Entity descriptors bound to a query alias.

use crate::column::Column;
use crate::error::CriteriaResult;
use crate::schema::{Entity, EntityMeta, Field};
use std::fmt;
use std::marker::PhantomData;

/// SQL join variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Cross,
    LeftOuter,
    RightOuter,
    FullOuter,
}

impl JoinKind {
    pub const fn sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "JOIN",
            JoinKind::Cross => "CROSS JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}

/// How a joined entity attaches to the rest of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinInfo {
    source: Column,
    target: Column,
    kind: JoinKind,
}

impl JoinInfo {
    pub(crate) fn new(source: Column, target: Column, kind: JoinKind) -> Self {
        Self {
            source,
            target,
            kind,
        }
    }

    /// Column on an already-declared entity.
    pub fn source(&self) -> &Column {
        &self.source
    }

    /// Column on the joined entity.
    pub fn target(&self) -> &Column {
        &self.target
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }
}

/// An entity type bound to a query alias.
///
/// Obtained from [`CriteriaBuilder::from`](crate::CriteriaBuilder::from) (the
/// root, no join info) or [`CriteriaBuilder::join`](crate::CriteriaBuilder::join).
pub struct Root<T> {
    alias: String,
    join: Option<JoinInfo>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Root<T> {
    pub(crate) fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            join: None,
            _entity: PhantomData,
        }
    }

    pub(crate) fn with_join(mut self, join: JoinInfo) -> Self {
        self.join = Some(join);
        self
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Join information, `None` for the `from` root.
    pub fn join(&self) -> Option<&JoinInfo> {
        self.join.as_ref()
    }

    pub fn table(&self) -> String {
        T::meta().table_name()
    }

    /// `alias.column` for a field given by name.
    ///
    /// Fails with [`CriteriaError::FieldNotFound`](crate::CriteriaError::FieldNotFound)
    /// if `T` declares no such field.
    pub fn column(&self, field: &str) -> CriteriaResult<Column> {
        let column = T::meta().column_name(field)?;
        Ok(Column::qualified(&self.alias, &column))
    }

    /// `alias.column` for a typed field.
    pub fn get(&self, field: Field<T>) -> Column {
        Column::qualified(&self.alias, &field.column_name())
    }

    /// `alias.*`
    pub fn all_columns(&self) -> Column {
        Column::wildcard(&self.alias)
    }

    pub(crate) fn erase(&self) -> ErasedRoot {
        ErasedRoot {
            alias: self.alias.clone(),
            meta: T::meta(),
            join: self.join.clone(),
        }
    }
}

impl<T> Clone for Root<T> {
    fn clone(&self) -> Self {
        Self {
            alias: self.alias.clone(),
            join: self.join.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Root<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Root")
            .field("entity", &std::any::type_name::<T>())
            .field("alias", &self.alias)
            .field("join", &self.join)
            .finish()
    }
}

/// The builder-side record of a declared root, independent of its type.
#[derive(Debug, Clone)]
pub(crate) struct ErasedRoot {
    pub(crate) alias: String,
    pub(crate) meta: &'static EntityMeta,
    pub(crate) join: Option<JoinInfo>,
}

impl ErasedRoot {
    pub(crate) fn table(&self) -> String {
        self.meta.table_name()
    }
}
