//! Convenient imports for typical `pgcriteria` usage.
//!
//! ```ignore
//! use pgcriteria::prelude::*;
//! ```

pub use crate::{
    BuiltQuery, Column, CriteriaBuilder, CriteriaConfig, CriteriaError, CriteriaQuery,
    CriteriaResult, Entity, JoinAlias, JoinKind, LikeMode, Order, OrderType, Predicate, Root,
};
