use serde::Serialize;

use stockflow_core::{Entity, ItemId};

/// One stock-keeping unit held by the ledger.
///
/// Only the ledger mutates a record; callers get shared references or clones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryRecord {
    id: ItemId,
    name: String,
    quantity: i64,
    price: f64,
}

impl InventoryRecord {
    pub fn new(id: ItemId, name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Quantity times unit price.
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    /// Add `delta` to the quantity and overwrite the price. The name is kept.
    pub(crate) fn restock(&mut self, delta: i64, price: f64) {
        self.quantity += delta;
        self.price = price;
    }

    /// Take up to `requested` units, never more than are on hand.
    /// Returns the amount actually taken.
    pub(crate) fn take(&mut self, requested: i64) -> i64 {
        let sold = requested.min(self.quantity);
        self.quantity -= sold;
        sold
    }
}

impl Entity for InventoryRecord {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

impl core::fmt::Display for InventoryRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:<6} {:<20} {:>8} {:>10.2}",
            self.id, self.name, self.quantity, self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restock_accumulates_quantity_and_overwrites_price() {
        let mut record = InventoryRecord::new(ItemId::new(1), "Widget", 10, 2.5);
        record.restock(5, 3.0);
        assert_eq!(record.quantity(), 15);
        assert_eq!(record.price(), 3.0);
        assert_eq!(record.name(), "Widget");
    }

    #[test]
    fn take_is_clamped_to_stock_on_hand() {
        let mut record = InventoryRecord::new(ItemId::new(1), "Widget", 4, 1.0);
        assert_eq!(record.take(10), 4);
        assert_eq!(record.quantity(), 0);
    }

    #[test]
    fn value_is_quantity_times_price() {
        let record = InventoryRecord::new(ItemId::new(2), "Bolt", 4, 0.25);
        assert_eq!(record.value(), 1.0);
    }
}
