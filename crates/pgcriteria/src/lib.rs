//! # pgcriteria
//!
//! A criteria-style SQL builder for PostgreSQL.
//!
//! ## Features
//!
//! - **Schema-driven names**: table and column names come from `#[derive(Entity)]`
//!   metadata, falling back to snake_case of the Rust names
//! - **Managed aliases**: the `from` entity is `m`, joins get `j`, `j1`, `j2`, ...
//! - **Fixed clause order**: setters can be called in any order
//! - **Checked combinations**: DISTINCT vs DISTINCT ON and OFFSET without LIMIT
//!   are rejected at render time
//! - **Two renderers**: inline literals (`get_query`) or `$n` placeholders with
//!   `tokio-postgres` parameters (`build`)
//!
//! ## Example
//!
//! ```ignore
//! use pgcriteria::prelude::*;
//!
//! #[derive(Entity)]
//! #[orm(table = "users")]
//! struct User {
//!     id: i64,
//!     status: String,
//! }
//!
//! #[derive(Entity)]
//! #[orm(table = "address")]
//! struct Address {
//!     id: i64,
//!     user_id: i64,
//! }
//!
//! let mut cb = CriteriaBuilder::new();
//! let user = cb.from::<User>()?;
//! cb.join_on(&user.get(User::COL_ID), Address::COL_USER_ID, JoinKind::LeftOuter)?;
//!
//! let sql = cb
//!     .query()
//!     .select(cb.select(&user))
//!     .distinct(true)
//!     .where_(cb.and([cb.equals(&user.get(User::COL_STATUS), "ACTIVE")]))
//!     .limit(10)
//!     .get_query()?;
//!
//! assert_eq!(
//!     sql,
//!     "SELECT DISTINCT m.* FROM users m LEFT OUTER JOIN address j ON m.id = j.user_id WHERE ( m.status = 'ACTIVE' ) LIMIT 10"
//! );
//! ```

pub mod column;
pub mod config;
pub mod criteria;
pub mod error;
pub mod param;
pub mod predicate;
pub mod prelude;
pub mod projection;
pub mod query;
pub mod root;
pub mod schema;

pub use column::{Column, Order, OrderType};
pub use config::{CriteriaConfig, JoinAlias};
pub use criteria::CriteriaBuilder;
pub use error::{CriteriaError, CriteriaResult};
pub use param::{Param, ParamList};
pub use predicate::{CompareOp, LikeMode, Predicate};
pub use projection::{DistinctOn, Select};
pub use query::{BuiltQuery, CriteriaQuery};
pub use root::{JoinInfo, JoinKind, Root};
pub use schema::{
    Entity, EntityMeta, EntityRegistration, Field, FieldMeta, abbreviate, column_name,
    find_entity, registered_entities, table_name, to_snake_case,
};

#[cfg(feature = "derive")]
pub use pgcriteria_derive::Entity;

// Re-export inventory for use by derive macros
pub use inventory;
