use serde::Serialize;

use stockflow_core::{DomainError, DomainResult, ItemId};
use stockflow_inventory::{InventoryRecord, Ledger};
use stockflow_orders::{FulfillmentOutcome, Order, Scheduler};

use crate::script::Step;

/// End-of-run snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub inventory: Vec<InventoryRecord>,
    pub pending: Vec<Order>,
    pub total_value: f64,
}

/// One ledger plus one scheduler, driven step by step.
#[derive(Debug, Default)]
pub struct Simulation {
    ledger: Ledger,
    scheduler: Scheduler,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Apply one step and return the status text to show for it.
    pub fn apply(&mut self, step: &Step) -> String {
        if let Err(e) = step.validate().and_then(|()| self.check_headroom(step)) {
            tracing::warn!(error = %e, ?step, "step rejected");
            return format!("Invalid step: {e}");
        }

        match step {
            Step::AddOrUpdate {
                id,
                name,
                quantity,
                price,
            } => self
                .ledger
                .add_or_update(*id, name.as_str(), *quantity, *price)
                .to_string(),
            Step::Remove { id } => match self.ledger.remove(*id) {
                Ok(record) => format!("Removed item ID {} ({})", *id, record.name()),
                Err(e) => format!("Cannot remove: {e}"),
            },
            Step::ReduceQuantity { id, quantity } => {
                match self.ledger.reduce_quantity(*id, *quantity) {
                    Ok(reduction) => reduction.to_string(),
                    Err(e) => format!("Cannot reduce quantity: {e}"),
                }
            }
            Step::Lookup { id } => self.describe(*id),
            Step::Display => self.ledger.to_string(),
            Step::PlaceOrder {
                item_id,
                quantity,
                priority,
            } => {
                let order = self.scheduler.place_order(*item_id, *quantity, *priority);
                format!("Order placed: {order}")
            }
            Step::ProcessNext => self.scheduler.process_next(&mut self.ledger).to_string(),
            Step::ProcessAll => {
                let outcomes = self.scheduler.process_all(&mut self.ledger);
                if outcomes.is_empty() {
                    return FulfillmentOutcome::EmptyQueue.to_string();
                }
                outcomes
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Step::DisplayPending => self.scheduler.to_string(),
        }
    }

    /// Apply every step in order, collecting the status text.
    pub fn run<'a>(&mut self, steps: impl IntoIterator<Item = &'a Step>) -> Vec<String> {
        steps.into_iter().map(|step| self.apply(step)).collect()
    }

    pub fn report(&self) -> Report {
        Report {
            inventory: self.ledger.snapshot(),
            pending: self.scheduler.pending(),
            total_value: self.ledger.total_value(),
        }
    }

    /// Restocking accumulates quantity, so the new total must still fit.
    fn check_headroom(&self, step: &Step) -> DomainResult<()> {
        let Step::AddOrUpdate { id, quantity, .. } = step else {
            return Ok(());
        };
        let Some(record) = self.ledger.lookup(*id) else {
            return Ok(());
        };
        if record.quantity().checked_add(*quantity).is_none() {
            return Err(DomainError::validation(format!(
                "restocking item {id} would overflow its quantity"
            )));
        }
        Ok(())
    }

    fn describe(&self, id: ItemId) -> String {
        match self.ledger.lookup(id) {
            Some(record) => format!(
                "Item ID {}: {}, quantity {}, price {}",
                id,
                record.name(),
                record.quantity(),
                record.price()
            ),
            None => format!("Item ID {id} not found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockflow_core::Priority;

    #[test]
    fn invalid_step_does_not_touch_state() {
        let mut sim = Simulation::new();
        let line = sim.apply(&Step::AddOrUpdate {
            id: ItemId::new(1),
            name: "Widget".into(),
            quantity: -5,
            price: 1.0,
        });
        assert!(line.starts_with("Invalid step:"));
        assert!(sim.ledger().is_empty());
    }

    #[test]
    fn restock_past_quantity_limit_is_rejected() {
        let mut sim = Simulation::new();
        let lines = sim.run(&[
            Step::AddOrUpdate {
                id: ItemId::new(1),
                name: "Widget".into(),
                quantity: i64::MAX,
                price: 1.0,
            },
            Step::AddOrUpdate {
                id: ItemId::new(1),
                name: "Widget".into(),
                quantity: 1,
                price: 2.0,
            },
        ]);

        assert_eq!(
            lines[1],
            "Invalid step: validation failed: restocking item 1 would overflow its quantity"
        );
        let record = sim.ledger().lookup(ItemId::new(1)).unwrap();
        assert_eq!(record.quantity(), i64::MAX);
        assert_eq!(record.price(), 1.0);
    }

    #[test]
    fn lookup_reports_record_or_absence() {
        let mut sim = Simulation::new();
        sim.apply(&Step::AddOrUpdate {
            id: ItemId::new(1),
            name: "Widget".into(),
            quantity: 10,
            price: 2.5,
        });
        assert_eq!(
            sim.apply(&Step::Lookup { id: ItemId::new(1) }),
            "Item ID 1: Widget, quantity 10, price 2.5"
        );
        assert_eq!(
            sim.apply(&Step::Lookup { id: ItemId::new(2) }),
            "Item ID 2 not found"
        );
    }

    #[test]
    fn process_all_on_empty_queue_reports_sentinel() {
        let mut sim = Simulation::new();
        assert_eq!(sim.apply(&Step::ProcessAll), "No pending orders.");
    }

    #[test]
    fn report_reflects_remaining_state() {
        let mut sim = Simulation::new();
        sim.run(&[
            Step::AddOrUpdate {
                id: ItemId::new(1),
                name: "Widget".into(),
                quantity: 4,
                price: 2.5,
            },
            Step::PlaceOrder {
                item_id: ItemId::new(1),
                quantity: 1,
                priority: Priority::new(3),
            },
        ]);

        let report = sim.report();
        assert_eq!(report.inventory.len(), 1);
        assert_eq!(report.pending.len(), 1);
        assert_eq!(report.total_value, 10.0);
    }
}
