use proc_macro2::Span;
use syn::{Error, LitStr, Result};

pub(crate) fn is_valid_sql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn parse_sql_ident(lit: &LitStr, what: &str) -> Result<String> {
    parse_sql_ident_with_span(lit.value().trim(), lit.span(), what)
}

/// Like [`parse_sql_ident`], but allows a schema qualifier (`schema.table`).
pub(crate) fn parse_table_ident(lit: &LitStr, what: &str) -> Result<String> {
    let raw = lit.value();
    let raw = raw.trim();
    let parts: Vec<&str> = raw.split('.').collect();
    if parts.len() > 2 {
        return Err(Error::new(
            lit.span(),
            format!("{what} accepts at most one schema qualifier (expected `schema.table`)"),
        ));
    }
    for part in &parts {
        parse_sql_ident_with_span(part, lit.span(), what)?;
    }
    Ok(raw.to_string())
}

pub(crate) fn parse_sql_ident_with_span(s: &str, span: Span, what: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::new(span, format!("{what} must not be empty")));
    }
    if !is_valid_sql_ident(s) {
        return Err(Error::new(
            span,
            format!("{what} must be a valid SQL identifier (expected [A-Za-z_][A-Za-z0-9_]*)"),
        ));
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> LitStr {
        LitStr::new(s, Span::call_site())
    }

    #[test]
    fn sql_idents() {
        assert!(is_valid_sql_ident("user_id"));
        assert!(is_valid_sql_ident("_hidden"));
        assert!(!is_valid_sql_ident("1st"));
        assert!(!is_valid_sql_ident("user-id"));
        assert!(!is_valid_sql_ident(""));
    }

    #[test]
    fn column_names_are_trimmed_and_checked() {
        assert_eq!(parse_sql_ident(&lit(" email "), "column").unwrap(), "email");
        assert!(parse_sql_ident(&lit("a.b"), "column").is_err());
        assert!(parse_sql_ident(&lit(""), "column").is_err());
    }

    #[test]
    fn table_names_allow_one_schema() {
        assert_eq!(parse_table_ident(&lit("users"), "table").unwrap(), "users");
        assert_eq!(
            parse_table_ident(&lit("audit.login_event"), "table").unwrap(),
            "audit.login_event"
        );
        assert!(parse_table_ident(&lit("a.b.c"), "table").is_err());
        assert!(parse_table_ident(&lit("audit."), "table").is_err());
    }
}
