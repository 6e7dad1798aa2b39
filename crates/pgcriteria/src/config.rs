//! Alias configuration for [`CriteriaBuilder`](crate::CriteriaBuilder).

use crate::error::{CriteriaError, CriteriaResult, reject};

/// How join aliases are chosen before collision resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinAlias {
    /// Every join starts from the same base token (`j`, `j1`, `j2`, ...).
    Fixed(&'static str),
    /// Each join starts from the abbreviation of its entity name
    /// (`OrderLine` -> `ol`, `ol1`, ...).
    Abbreviated,
}

/// Alias configuration for one criteria builder.
///
/// # Example
///
/// ```rust
/// use pgcriteria::{CriteriaConfig, JoinAlias};
///
/// const CONFIG: CriteriaConfig = CriteriaConfig::new()
///     .with_root_alias("u")
///     .with_join_alias(JoinAlias::Abbreviated);
///
/// assert_eq!(CONFIG.root_alias, "u");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriteriaConfig {
    /// Alias of the `from` entity.
    pub root_alias: &'static str,
    /// Base alias strategy for joined entities.
    pub join_alias: JoinAlias,
}

impl CriteriaConfig {
    pub const DEFAULT_ROOT_ALIAS: &'static str = "m";
    pub const DEFAULT_JOIN_ALIAS: &'static str = "j";

    pub const fn new() -> Self {
        Self {
            root_alias: Self::DEFAULT_ROOT_ALIAS,
            join_alias: JoinAlias::Fixed(Self::DEFAULT_JOIN_ALIAS),
        }
    }

    /// Checked when `from` runs: must be a non-reserved SQL identifier.
    pub const fn with_root_alias(mut self, alias: &'static str) -> Self {
        self.root_alias = alias;
        self
    }

    /// A fixed base must be a SQL identifier; reserved keywords are skipped
    /// over (`as` -> `as1`) like aliases already in use.
    pub const fn with_join_alias(mut self, join_alias: JoinAlias) -> Self {
        self.join_alias = join_alias;
        self
    }
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// PostgreSQL keywords that cannot appear as a bare table alias
/// (reserved plus type/function-name keywords).
const RESERVED_KEYWORDS: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric",
    "authorization", "binary", "both", "case", "cast", "check", "collate", "collation",
    "column", "concurrently", "constraint", "create", "cross", "current_catalog",
    "current_date", "current_role", "current_schema", "current_time", "current_timestamp",
    "current_user", "default", "deferrable", "desc", "distinct", "do", "else", "end",
    "except", "false", "fetch", "for", "foreign", "freeze", "from", "full", "grant",
    "group", "having", "ilike", "in", "initially", "inner", "intersect", "into", "is",
    "isnull", "join", "lateral", "leading", "left", "like", "limit", "localtime",
    "localtimestamp", "natural", "not", "notnull", "null", "offset", "on", "only", "or",
    "order", "outer", "overlaps", "placing", "primary", "references", "returning", "right",
    "select", "session_user", "similar", "some", "symmetric", "system_user", "table",
    "tablesample", "then", "to", "trailing", "true", "union", "unique", "user", "using",
    "variadic", "verbose", "when", "where", "window", "with",
];

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_alias(alias: &str) -> bool {
    let mut chars = alias.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether `alias` is a keyword PostgreSQL refuses as a table alias.
pub fn is_reserved_keyword(alias: &str) -> bool {
    let lower = alias.to_ascii_lowercase();
    RESERVED_KEYWORDS.contains(&lower.as_str())
}

/// Reject aliases that would render malformed SQL.
pub(crate) fn check_alias(alias: &str, allow_reserved: bool) -> CriteriaResult<()> {
    if is_valid_alias(alias) && (allow_reserved || !is_reserved_keyword(alias)) {
        return Ok(());
    }
    Err(reject(CriteriaError::InvalidAlias {
        alias: alias.to_string(),
    }))
}
