//! `stockflow-core` — shared domain building blocks.
//!
//! Identifiers, the entity trait and the error model used by the inventory
//! ledger and the order scheduler. No IO lives here.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ItemId, OrderId, Priority};
