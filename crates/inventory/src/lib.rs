//! Inventory ledger.
//!
//! Insertion-ordered stock records with constant-time keyed access. Pure
//! in-memory domain logic (no IO, no persistence).

pub mod ledger;
pub mod record;

pub use ledger::{Ledger, Records, Reduction, StockChange};
pub use record::InventoryRecord;
