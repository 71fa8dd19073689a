use serde::Serialize;

use stockflow_core::{Entity, ItemId, OrderId, Priority};

/// Terminal state of a processed order. A pending order has no status; it
/// is simply in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Fulfilled,
    PartiallyFulfilled,
    RejectedNoItem,
}

/// A pending purchase order.
///
/// `item_id` is not checked against the ledger when the order is placed; a
/// missing item is only discovered when the order is processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    order_id: OrderId,
    item_id: ItemId,
    quantity: i64,
    priority: Priority,
}

impl Order {
    pub(crate) fn new(
        order_id: OrderId,
        item_id: ItemId,
        quantity: i64,
        priority: Priority,
    ) -> Self {
        Self {
            order_id,
            item_id,
            quantity,
            priority,
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Service order: lower priority value first, then earlier order id.
    pub fn queue_key(&self) -> (Priority, OrderId) {
        (self.priority, self.order_id)
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.order_id
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Order #{}: item {} x {} (priority {})",
            self.order_id, self.item_id, self.quantity, self.priority
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_key_orders_by_priority_then_id() {
        let early_low = Order::new(OrderId::new(1), ItemId::new(1), 1, Priority::new(5));
        let late_high = Order::new(OrderId::new(2), ItemId::new(1), 1, Priority::new(1));
        let later_high = Order::new(OrderId::new(3), ItemId::new(1), 1, Priority::new(1));

        assert!(late_high.queue_key() < later_high.queue_key());
        assert!(later_high.queue_key() < early_low.queue_key());
    }

    #[test]
    fn display_names_every_field() {
        let order = Order::new(OrderId::new(7), ItemId::new(3), 4, Priority::new(2));
        assert_eq!(order.to_string(), "Order #7: item 3 x 4 (priority 2)");
    }
}
