//! Error types for pgcriteria

use thiserror::Error;

/// Result type alias for pgcriteria operations
pub type CriteriaResult<T> = Result<T, CriteriaError>;

/// Configuration errors raised while building or rendering a criteria query.
///
/// Every variant describes a programmer error; none of them is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    /// `from` was called twice on the same builder
    #[error("from entity already defined")]
    FromAlreadyDefined,

    /// `join` (or rendering) happened before `from`
    #[error("from entity not defined")]
    FromNotDefined,

    /// A root or join alias is empty, not an identifier, or a reserved keyword
    #[error("invalid alias '{alias}' (expected a non-reserved [A-Za-z_][A-Za-z0-9_]* identifier)")]
    InvalidAlias { alias: String },

    /// The field does not exist on the entity
    #[error("field '{field}' not found on entity '{entity}'")]
    FieldNotFound { entity: &'static str, field: String },

    /// Both DISTINCT and DISTINCT ON were requested
    #[error("either DISTINCT or DISTINCT ON can be used")]
    DistinctConflict,

    /// OFFSET was set while LIMIT is below 1
    #[error("limit should not be less than 1 with offset value (limit {limit}, offset {offset})")]
    OffsetWithoutLimit { limit: i64, offset: i64 },

    /// The query has no criteria builder to read roots and joins from
    #[error("criteria builder is not set")]
    MissingCriteriaBuilder,

    /// The query has no SELECT projection
    #[error("select projection is not set")]
    MissingProjection,
}

impl CriteriaError {
    /// Create a field-not-found error
    pub fn field_not_found(entity: &'static str, field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            entity,
            field: field.into(),
        }
    }

    /// Check if this is a field-not-found error
    pub fn is_field_not_found(&self) -> bool {
        matches!(self, Self::FieldNotFound { .. })
    }

    /// Check if this error comes from the from/join lifecycle
    pub fn is_root_error(&self) -> bool {
        matches!(
            self,
            Self::FromAlreadyDefined | Self::FromNotDefined | Self::InvalidAlias { .. }
        )
    }

    /// Check if this error comes from cross-clause validation at render time
    pub fn is_render_error(&self) -> bool {
        matches!(
            self,
            Self::DistinctConflict
                | Self::OffsetWithoutLimit { .. }
                | Self::MissingCriteriaBuilder
                | Self::MissingProjection
        )
    }
}

/// Report a rejected configuration and hand the error back to the caller.
pub(crate) fn reject(err: CriteriaError) -> CriteriaError {
    #[cfg(feature = "tracing")]
    tracing::warn!(target: "pgcriteria", error = %err, "criteria configuration rejected");
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = CriteriaError::field_not_found("User", "nickname");
        assert_eq!(err.to_string(), "field 'nickname' not found on entity 'User'");

        let err = CriteriaError::OffsetWithoutLimit { limit: 0, offset: 20 };
        assert_eq!(
            err.to_string(),
            "limit should not be less than 1 with offset value (limit 0, offset 20)"
        );
    }

    #[test]
    fn classification_helpers() {
        assert!(CriteriaError::field_not_found("User", "x").is_field_not_found());
        assert!(CriteriaError::FromNotDefined.is_root_error());
        assert!(CriteriaError::InvalidAlias { alias: String::new() }.is_root_error());
        assert!(CriteriaError::DistinctConflict.is_render_error());
        assert!(!CriteriaError::FromAlreadyDefined.is_render_error());
    }
}
