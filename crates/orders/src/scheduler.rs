use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use stockflow_core::{DomainError, Entity, ItemId, OrderId, Priority};
use stockflow_inventory::Ledger;

use crate::order::{Order, OrderStatus};

/// Heap entry ordered by [`Order::queue_key`] only.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Queued(Order);

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.queue_key().cmp(&other.0.queue_key())
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// What happened to the order taken off the queue by
/// [`Scheduler::process_next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FulfillmentOutcome {
    /// Nothing was pending; the ledger was not touched.
    EmptyQueue,
    Fulfilled {
        order: Order,
        sold: i64,
    },
    /// Stock ran out: everything on hand was sold and the rest is dropped.
    PartiallyFulfilled {
        order: Order,
        sold: i64,
        unfulfilled: i64,
    },
    /// The item does not exist in the ledger. The order is still consumed.
    Rejected {
        order: Order,
        reason: DomainError,
    },
}

impl FulfillmentOutcome {
    /// True for full and partial fulfilment. Partial fulfilment counts as a
    /// handled order.
    pub fn fulfilled(&self) -> bool {
        matches!(
            self,
            FulfillmentOutcome::Fulfilled { .. } | FulfillmentOutcome::PartiallyFulfilled { .. }
        )
    }

    pub fn order(&self) -> Option<&Order> {
        match self {
            FulfillmentOutcome::EmptyQueue => None,
            FulfillmentOutcome::Fulfilled { order, .. }
            | FulfillmentOutcome::PartiallyFulfilled { order, .. }
            | FulfillmentOutcome::Rejected { order, .. } => Some(order),
        }
    }

    /// Terminal state of the processed order, if there was one.
    pub fn status(&self) -> Option<OrderStatus> {
        match self {
            FulfillmentOutcome::EmptyQueue => None,
            FulfillmentOutcome::Fulfilled { .. } => Some(OrderStatus::Fulfilled),
            FulfillmentOutcome::PartiallyFulfilled { .. } => Some(OrderStatus::PartiallyFulfilled),
            FulfillmentOutcome::Rejected { .. } => Some(OrderStatus::RejectedNoItem),
        }
    }
}

impl core::fmt::Display for FulfillmentOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FulfillmentOutcome::EmptyQueue => write!(f, "No pending orders."),
            FulfillmentOutcome::Fulfilled { order, sold } => write!(
                f,
                "Order #{} fulfilled: sold {} of item {}",
                order.id(),
                sold,
                order.item_id()
            ),
            FulfillmentOutcome::PartiallyFulfilled {
                order,
                sold,
                unfulfilled,
            } => write!(
                f,
                "Order #{} partially fulfilled: sold {} of item {}, {} unfulfilled",
                order.id(),
                sold,
                order.item_id(),
                unfulfilled
            ),
            FulfillmentOutcome::Rejected { order, reason } => {
                write!(f, "Order #{} rejected: {}", order.id(), reason)
            }
        }
    }
}

/// Priority queue of pending orders.
///
/// Lowest priority value is served first; ties go to the earlier order id.
/// Order ids start at 1 and are never reused. The ledger is borrowed per call
/// and never stored.
#[derive(Debug, Clone)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Queued>>,
    next_id: OrderId,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            next_id: OrderId::FIRST,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Enqueue an order under the next sequential id. Stock is not checked.
    pub fn place_order(&mut self, item_id: ItemId, quantity: i64, priority: Priority) -> Order {
        let order_id = self.next_id;
        self.next_id = order_id.next();

        let order = Order::new(order_id, item_id, quantity, priority);
        tracing::info!(
            order_id = %order_id,
            item_id = %item_id,
            quantity,
            priority = %priority,
            "order placed"
        );
        self.queue.push(Reverse(Queued(order.clone())));
        order
    }

    /// Take the highest-priority order and fulfil it from `ledger`.
    pub fn process_next(&mut self, ledger: &mut Ledger) -> FulfillmentOutcome {
        let Some(Reverse(Queued(order))) = self.queue.pop() else {
            tracing::info!("no pending orders");
            return FulfillmentOutcome::EmptyQueue;
        };

        // The ledger clamps the sale to what is on hand.
        match ledger.reduce_quantity(order.item_id(), order.quantity()) {
            Err(reason) => {
                tracing::warn!(
                    order_id = %order.id(),
                    item_id = %order.item_id(),
                    "order rejected: item not found"
                );
                FulfillmentOutcome::Rejected { order, reason }
            }
            Ok(reduction) if reduction.sold < order.quantity() => {
                let unfulfilled = order.quantity() - reduction.sold;
                tracing::info!(
                    order_id = %order.id(),
                    item_id = %order.item_id(),
                    sold = reduction.sold,
                    unfulfilled,
                    "order partially fulfilled"
                );
                FulfillmentOutcome::PartiallyFulfilled {
                    order,
                    sold: reduction.sold,
                    unfulfilled,
                }
            }
            Ok(reduction) => {
                tracing::info!(
                    order_id = %order.id(),
                    item_id = %order.item_id(),
                    sold = reduction.sold,
                    "order fulfilled"
                );
                FulfillmentOutcome::Fulfilled {
                    order,
                    sold: reduction.sold,
                }
            }
        }
    }

    /// Process until the queue is empty. The trailing `EmptyQueue` is not
    /// included.
    pub fn process_all(&mut self, ledger: &mut Ledger) -> Vec<FulfillmentOutcome> {
        let mut outcomes = Vec::with_capacity(self.len());
        while !self.is_empty() {
            outcomes.push(self.process_next(ledger));
        }
        outcomes
    }

    /// Pending orders in service order. The queue is not modified.
    pub fn pending(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .queue
            .iter()
            .map(|Reverse(Queued(order))| order.clone())
            .collect();
        orders.sort_by_key(Order::queue_key);
        orders
    }
}

impl core::fmt::Display for Scheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return write!(f, "No pending orders.");
        }
        let mut first = true;
        for order in self.pending() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{order}")?;
            first = false;
        }
        Ok(())
    }
}
