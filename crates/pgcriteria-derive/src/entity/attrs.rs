//! Attribute parsing for the Entity derive macro.
//!
//! Handles struct-level `#[orm(table = "...")]` and field-level
//! `#[orm(column = "...")]` attributes.

use syn::{DeriveInput, LitStr, Result};

use crate::sql_ident::{parse_sql_ident, parse_table_ident};

/// Helper struct for parsing the contents of one `#[orm(...)]` attribute.
///
/// Only `key = "value"` pairs are accepted; the caller decides which keys are
/// valid at its position.
pub(super) struct OrmAttr {
    pub pairs: Vec<(syn::Ident, LitStr)>,
}

impl syn::parse::Parse for OrmAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut pairs = Vec::new();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            let _: syn::Token![=] = input.parse()?;
            let value: LitStr = input.parse()?;
            pairs.push((ident, value));

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(OrmAttr { pairs })
    }
}

fn orm_attrs(attrs: &[syn::Attribute]) -> Result<Vec<(syn::Ident, LitStr)>> {
    let mut pairs = Vec::new();
    for attr in attrs {
        if attr.path().is_ident("orm") {
            let parsed: OrmAttr = attr.parse_args()?;
            pairs.extend(parsed.pairs);
        }
    }
    Ok(pairs)
}

/// Extract the optional table name from struct-level `#[orm(table = "...")]`.
///
/// `None` means the runtime resolver derives the name from the type name.
pub(super) fn get_table_name(input: &DeriveInput) -> Result<Option<String>> {
    let mut table = None;
    for (key, value) in orm_attrs(&input.attrs)? {
        if key == "table" {
            if table.is_some() {
                return Err(syn::Error::new(value.span(), "duplicate `table` attribute"));
            }
            table = Some(parse_table_ident(&value, "table")?);
        } else {
            return Err(syn::Error::new(
                key.span(),
                format!("unknown struct attribute `{key}` (expected `table`)"),
            ));
        }
    }
    Ok(table)
}

/// Extract the optional column override from field-level `#[orm(column = "...")]`.
pub(super) fn get_column_name(field: &syn::Field) -> Result<Option<String>> {
    let mut column = None;
    for (key, value) in orm_attrs(&field.attrs)? {
        if key == "column" {
            if column.is_some() {
                return Err(syn::Error::new(value.span(), "duplicate `column` attribute"));
            }
            column = Some(parse_sql_ident(&value, "column")?);
        } else {
            return Err(syn::Error::new(
                key.span(),
                format!("unknown field attribute `{key}` (expected `column`)"),
            ));
        }
    }
    Ok(column)
}
