//! Script format: a JSON array of steps tagged by `op`.
//!
//! ```json
//! [
//!   { "op": "add_or_update", "id": 1, "name": "Widget", "quantity": 10, "price": 2.5 },
//!   { "op": "place_order", "item_id": 1, "quantity": 4, "priority": 2 },
//!   { "op": "process_next" }
//! ]
//! ```

use anyhow::Context;
use serde::Deserialize;

use stockflow_core::{DomainError, DomainResult, ItemId, Priority};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    AddOrUpdate {
        id: ItemId,
        name: String,
        quantity: i64,
        price: f64,
    },
    Remove {
        id: ItemId,
    },
    ReduceQuantity {
        id: ItemId,
        quantity: i64,
    },
    Lookup {
        id: ItemId,
    },
    Display,
    PlaceOrder {
        item_id: ItemId,
        quantity: i64,
        priority: Priority,
    },
    ProcessNext,
    ProcessAll,
    DisplayPending,
}

impl Step {
    /// Range checks on the step's own arguments. The ledger and scheduler take
    /// their arguments as given. Checks that depend on current stock (restock
    /// overflow) happen in [`Simulation::apply`](crate::Simulation::apply).
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Step::AddOrUpdate {
                name,
                quantity,
                price,
                ..
            } => {
                if name.trim().is_empty() {
                    return Err(DomainError::validation("name cannot be empty"));
                }
                if *quantity < 0 {
                    return Err(DomainError::validation("quantity cannot be negative"));
                }
                if !price.is_finite() || *price < 0.0 {
                    return Err(DomainError::validation("price must be a non-negative number"));
                }
                Ok(())
            }
            Step::ReduceQuantity { quantity, .. } if *quantity < 0 => {
                Err(DomainError::validation("quantity cannot be negative"))
            }
            Step::PlaceOrder { quantity, .. } if *quantity <= 0 => {
                Err(DomainError::validation("order quantity must be positive"))
            }
            _ => Ok(()),
        }
    }
}

/// Parse a script document.
pub fn parse(json: &str) -> anyhow::Result<Vec<Step>> {
    serde_json::from_str(json).context("failed to parse script")
}
