//! Predicate values, usable both as inline literals and as bind parameters.

use std::fmt;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly predicate value.
///
/// The value is kept twice: as a `ToSql` trait object for parameter binding,
/// and as its `Display` text for inline rendering.
#[derive(Clone)]
pub struct Param {
    value: Arc<dyn ToSql + Send + Sync>,
    literal: String,
}

impl Param {
    /// Create a new parameter from any value that can be both bound and printed.
    pub fn new<T>(value: T) -> Self
    where
        T: ToSql + fmt::Display + Send + Sync + 'static,
    {
        let literal = value.to_string();
        Param {
            value: Arc::new(value),
            literal,
        }
    }

    /// Get a reference to the inner value as a ToSql trait object.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.value as &(dyn ToSql + Sync)
    }

    /// The value's text form, unquoted.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// The value as a single-quoted SQL literal, with embedded quotes doubled.
    pub fn quoted(&self) -> String {
        let mut out = String::with_capacity(self.literal.len() + 2);
        out.push('\'');
        for ch in self.literal.chars() {
            if ch == '\'' {
                out.push('\'');
            }
            out.push(ch);
        }
        out.push('\'');
        out
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Param").field(&self.literal).finish()
    }
}

/// An ordered collection of bind parameters.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a pre-wrapped Param and return its 1-based index.
    pub fn push_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over the parameters in placeholder order.
    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    /// Get all parameters as references for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}
