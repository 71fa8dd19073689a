//! Order scheduler.
//!
//! Priority-ordered queue of purchase orders, fulfilled one at a time against
//! an inventory [`Ledger`](stockflow_inventory::Ledger).

pub mod order;
pub mod scheduler;

pub use order::{Order, OrderStatus};
pub use scheduler::{FulfillmentOutcome, Scheduler};
