//! Tests for `#[derive(Entity)]` and the criteria DSL on derived types.
//!
//! Nothing here touches a database; queries are checked as rendered text.

#![allow(dead_code)]

use chrono::NaiveDate;
use pgcriteria::prelude::*;
use pgcriteria::{Field, find_entity, registered_entities};
use uuid::Uuid;

// ── Entity definitions ──────────────────────────────────────────────────────

#[derive(Entity)]
#[orm(table = "users")]
struct User {
    id: i64,
    status: String,
    #[orm(column = "email_address")]
    email: String,
    signed_up_on: NaiveDate,
}

#[derive(Entity)]
#[orm(table = "address")]
struct Address {
    id: i64,
    user_id: i64,
    city: String,
}

#[derive(Entity)]
struct OrderLine {
    id: Uuid,
    user_id: i64,
    r#type: String,
}

#[derive(Entity)]
#[orm(table = "audit.login_event")]
struct LoginEvent {
    id: i64,
    user_id: i64,
}

// ── Schema metadata ─────────────────────────────────────────────────────────

#[test]
fn derived_table_names() {
    assert_eq!(pgcriteria::table_name::<User>(), "users");
    assert_eq!(pgcriteria::table_name::<OrderLine>(), "order_line");
    assert_eq!(pgcriteria::table_name::<LoginEvent>(), "audit.login_event");
}

#[test]
fn derived_column_names() {
    assert_eq!(pgcriteria::column_name::<User>("email").unwrap(), "email_address");
    assert_eq!(pgcriteria::column_name::<User>("signed_up_on").unwrap(), "signed_up_on");
    assert_eq!(pgcriteria::column_name::<OrderLine>("type").unwrap(), "type");

    let err = pgcriteria::column_name::<User>("nickname").unwrap_err();
    assert_eq!(
        err,
        CriteriaError::FieldNotFound {
            entity: "User",
            field: "nickname".to_string(),
        }
    );
}

#[test]
fn derived_field_constants() {
    let _: Field<User> = User::COL_EMAIL;
    assert_eq!(User::COL_EMAIL.name(), "email");
    assert_eq!(User::COL_EMAIL.column_name(), "email_address");
    assert_eq!(User::COL_SIGNED_UP_ON.column_name(), "signed_up_on");
    assert_eq!(OrderLine::COL_TYPE.name(), "type");
}

#[test]
fn registry_finds_derived_entities() {
    let user = find_entity("User").expect("User should be registered");
    assert_eq!(user.table_name(), "users");
    assert_eq!(user.fields.len(), 4);

    let names: Vec<&str> = registered_entities().map(|meta| meta.name).collect();
    for expected in ["User", "Address", "OrderLine", "LoginEvent"] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }

    assert!(find_entity("Nope").is_none());
}

// ── Queries ─────────────────────────────────────────────────────────────────

#[test]
fn end_to_end_inline_query() -> CriteriaResult<()> {
    let mut cb = CriteriaBuilder::new();
    let user = cb.from::<User>()?;
    cb.join::<Address>(&user.column("id")?, "user_id", JoinKind::LeftOuter)?;

    let sql = cb
        .query()
        .select(cb.select(&user))
        .distinct(true)
        .where_(cb.and([cb.equals(&user.column("status")?, "ACTIVE")]))
        .limit(10)
        .get_query()?;

    assert_eq!(
        sql,
        "SELECT DISTINCT m.* FROM users m LEFT OUTER JOIN address j ON m.id = j.user_id WHERE ( m.status = 'ACTIVE' ) LIMIT 10"
    );
    Ok(())
}

#[test]
fn typed_join_matches_string_join() -> CriteriaResult<()> {
    let mut typed = CriteriaBuilder::new();
    let user = typed.from::<User>()?;
    typed.join_on(&user.get(User::COL_ID), Address::COL_USER_ID, JoinKind::Inner)?;

    let mut named = CriteriaBuilder::new();
    let user2 = named.from::<User>()?;
    named.join::<Address>(&user2.column("id")?, "user_id", JoinKind::Inner)?;

    let a = typed.query().select(typed.select(&user)).get_query()?;
    let b = named.query().select(named.select(&user2)).get_query()?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn built_query_binds_typed_values() -> CriteriaResult<()> {
    let config = CriteriaConfig::new().with_join_alias(JoinAlias::Abbreviated);
    let mut cb = CriteriaBuilder::with_config(config);
    let user = cb.from::<User>()?;
    let line = cb.join_on(&user.get(User::COL_ID), OrderLine::COL_USER_ID, JoinKind::Inner)?;

    let since = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let until = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let line_id = Uuid::nil();

    let built = cb
        .query()
        .select(cb.multi_select(&[user.get(User::COL_EMAIL), line.get(OrderLine::COL_TYPE)]))
        .where_(cb.and([
            cb.between(&user.get(User::COL_SIGNED_UP_ON), since, until),
            cb.not_in(&line.get(OrderLine::COL_ID), [line_id]),
        ]))
        .order_by([cb.asc(&user.get(User::COL_EMAIL))])
        .build()?;

    assert_eq!(
        built.sql(),
        "SELECT m.email_address, ol.type FROM users m JOIN order_line ol ON m.id = ol.user_id \
         WHERE ( m.signed_up_on BETWEEN $1 and $2 and ol.id NOT IN ($3) ) ORDER BY m.email_address ASC"
    );
    assert_eq!(built.params_ref().len(), 3);
    Ok(())
}

#[test]
fn unknown_join_field_is_reported() {
    let mut cb = CriteriaBuilder::new();
    let user = cb.from::<User>().unwrap();
    let err = cb
        .join::<Address>(&user.all_columns(), "owner_id", JoinKind::Inner)
        .unwrap_err();
    assert!(err.is_field_not_found());
    assert_eq!(err.to_string(), "field 'owner_id' not found on entity 'Address'");
}
