//! Derive macros for pgcriteria
//!
//! Provides `#[derive(Entity)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod entity;
mod sql_ident;

/// Derive `Entity` schema metadata for a struct.
///
/// # Example
///
/// ```ignore
/// use pgcriteria::Entity;
///
/// #[derive(Entity)]
/// #[orm(table = "users")]
/// struct User {
///     id: i64,
///     user_name: String,
///     #[orm(column = "email_address")]
///     email: Option<String>,
/// }
/// ```
///
/// # Generated
///
/// - `impl pgcriteria::Entity` returning a static `EntityMeta`
/// - `COL_*: pgcriteria::Field<Self>` - typed field references
/// - a registration in the `pgcriteria` schema registry
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Specify table name (defaults to the snake_case type name)
/// - `#[orm(column = "name")]` - Map field to a different column name
#[proc_macro_derive(Entity, attributes(orm))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
