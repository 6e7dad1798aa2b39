//! Table and column name resolution for entity types.
//!
//! Names come from the metadata an [`Entity`] exposes (normally generated by
//! `#[derive(Entity)]`). When a type or field carries no explicit name, the
//! resolver falls back to [`to_snake_case`] of the Rust name.

use crate::error::{CriteriaError, CriteriaResult, reject};
use std::fmt;
use std::marker::PhantomData;
use std::sync::OnceLock;

/// Schema metadata for a queryable type.
///
/// This trait is automatically implemented by the `#[derive(Entity)]` macro.
pub trait Entity {
    /// Static naming metadata for this type.
    fn meta() -> &'static EntityMeta;
}

/// Naming metadata for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Rust field name.
    pub name: &'static str,
    /// Explicit column name, if any.
    pub column: Option<&'static str>,
}

impl FieldMeta {
    pub const fn new(name: &'static str, column: Option<&'static str>) -> Self {
        Self { name, column }
    }

    /// Explicit column name, else the snake_case field name.
    pub fn column_name(&self) -> String {
        match self.column {
            Some(column) => column.to_string(),
            None => to_snake_case(self.name),
        }
    }
}

/// Naming metadata for one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMeta {
    /// Simple type name (e.g. `UserAccount`).
    pub name: &'static str,
    /// Explicit table name, if any.
    pub table: Option<&'static str>,
    /// Declared fields, in declaration order.
    pub fields: &'static [FieldMeta],
}

impl EntityMeta {
    pub const fn new(
        name: &'static str,
        table: Option<&'static str>,
        fields: &'static [FieldMeta],
    ) -> Self {
        Self {
            name,
            table,
            fields,
        }
    }

    /// Look up a declared field by its Rust name.
    pub fn field(&self, name: &str) -> Option<&'static FieldMeta> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Explicit table name, else the snake_case type name.
    pub fn table_name(&self) -> String {
        match self.table {
            Some(table) => table.to_string(),
            None => to_snake_case(self.name),
        }
    }

    /// Resolve the column for a field, failing if the field is not declared.
    pub fn column_name(&self, field: &str) -> CriteriaResult<String> {
        self.field(field)
            .map(FieldMeta::column_name)
            .ok_or_else(|| reject(CriteriaError::field_not_found(self.name, field)))
    }
}

/// A field of `T` known to exist at compile time.
///
/// Generated as `COL_*` constants by `#[derive(Entity)]`; resolving it never
/// fails.
pub struct Field<T> {
    name: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Field<T> {
    #[doc(hidden)]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _entity: PhantomData,
        }
    }

    /// Rust name of the field.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: Entity> Field<T> {
    /// Resolved column name.
    pub fn column_name(&self) -> String {
        match T::meta().field(self.name) {
            Some(field) => field.column_name(),
            None => to_snake_case(self.name),
        }
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

/// Table name of `T`.
pub fn table_name<T: Entity>() -> String {
    T::meta().table_name()
}

/// Column name of `field` on `T`.
///
/// Returns [`CriteriaError::FieldNotFound`] if `T` declares no such field.
pub fn column_name<T: Entity>(field: &str) -> CriteriaResult<String> {
    T::meta().column_name(field)
}

/// Convert a Rust name to its default SQL name.
///
/// An underscore is inserted between a lowercase letter and the uppercase run
/// that follows it, then everything is lowercased: `UserAccount` ->
/// `user_account`, `userID` -> `user_id`, `HTTPServer` -> `httpserver`.
pub fn to_snake_case(name: &str) -> String {
    static BOUNDARY_RE: OnceLock<regex::Regex> = OnceLock::new();
    let re = BOUNDARY_RE.get_or_init(|| {
        regex::Regex::new(r"([a-z])([A-Z]+)").expect("invalid built-in case boundary regex")
    });
    re.replace_all(name, "${1}_${2}").to_lowercase()
}

/// Short alias hint for a name.
///
/// snake_case input keeps the first letter of each word (`order_line` ->
/// `ol`); anything else keeps its first character plus every uppercase
/// letter (`OrderLine` -> `ol`, `users` -> `u`).
pub fn abbreviate(name: &str) -> String {
    if name.contains('_') {
        return name
            .split('_')
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_lowercase)
            .collect();
    }

    name.chars()
        .enumerate()
        .filter(|(i, ch)| *i == 0 || ch.is_uppercase())
        .flat_map(|(_, ch)| ch.to_lowercase())
        .collect()
}

// ==================== Registry ====================

/// Registration entry for auto-registering entities.
///
/// This is submitted by the `#[derive(Entity)]` macro so every derived type is
/// discoverable through [`registered_entities`].
pub struct EntityRegistration {
    meta: fn() -> &'static EntityMeta,
}

impl EntityRegistration {
    pub const fn new(meta: fn() -> &'static EntityMeta) -> Self {
        Self { meta }
    }
}

inventory::collect!(EntityRegistration);

/// Iterate over every entity registered by `#[derive(Entity)]`.
pub fn registered_entities() -> impl Iterator<Item = &'static EntityMeta> {
    inventory::iter::<EntityRegistration>
        .into_iter()
        .map(|reg| (reg.meta)())
}

/// Find a registered entity by its simple type name.
pub fn find_entity(name: &str) -> Option<&'static EntityMeta> {
    registered_entities().find(|meta| meta.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UserAccount;

    impl Entity for UserAccount {
        fn meta() -> &'static EntityMeta {
            static META: EntityMeta = EntityMeta::new(
                "UserAccount",
                None,
                &[
                    FieldMeta::new("id", None),
                    FieldMeta::new("displayName", None),
                    FieldMeta::new("email", Some("email_address")),
                ],
            );
            &META
        }
    }

    struct Profile;

    impl Entity for Profile {
        fn meta() -> &'static EntityMeta {
            static META: EntityMeta =
                EntityMeta::new("Profile", Some("user_profiles"), &[FieldMeta::new("id", None)]);
            &META
        }
    }

    #[test]
    fn snake_case_transform() {
        assert_eq!(to_snake_case("User"), "user");
        assert_eq!(to_snake_case("UserAccount"), "user_account");
        assert_eq!(to_snake_case("userId"), "user_id");
        assert_eq!(to_snake_case("userID"), "user_id");
        assert_eq!(to_snake_case("HTTPServer"), "httpserver");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn table_name_prefers_metadata() {
        assert_eq!(table_name::<Profile>(), "user_profiles");
        assert_eq!(table_name::<UserAccount>(), "user_account");
    }

    #[test]
    fn column_name_prefers_metadata() {
        assert_eq!(column_name::<UserAccount>("email").unwrap(), "email_address");
        assert_eq!(column_name::<UserAccount>("displayName").unwrap(), "display_name");
        assert_eq!(column_name::<UserAccount>("id").unwrap(), "id");
    }

    #[test]
    fn column_name_unknown_field() {
        let err = column_name::<UserAccount>("nickname").unwrap_err();
        assert_eq!(
            err,
            CriteriaError::FieldNotFound {
                entity: "UserAccount",
                field: "nickname".to_string(),
            }
        );
    }

    #[test]
    fn typed_field_matches_string_lookup() {
        let field: Field<UserAccount> = Field::new("email");
        assert_eq!(field.name(), "email");
        assert_eq!(field.column_name(), column_name::<UserAccount>("email").unwrap());
    }

    #[test]
    fn abbreviations() {
        assert_eq!(abbreviate("order_line"), "ol");
        assert_eq!(abbreviate("OrderLine"), "ol");
        assert_eq!(abbreviate("users"), "u");
        assert_eq!(abbreviate("Address"), "a");
        assert_eq!(abbreviate("_leading"), "l");
    }
}
