use std::collections::HashMap;

use stockflow_core::{DomainError, DomainResult, Entity, ItemId};

use crate::record::InventoryRecord;

/// Arena slot: a record plus its neighbours in insertion order.
#[derive(Debug, Clone)]
struct Slot {
    record: InventoryRecord,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Insertion-ordered inventory with O(1) lookup, update and removal.
///
/// Records live in an arena (`slots`) and are chained by slot index in the
/// order they were first created. `index` maps every live id to its slot; the
/// two always describe the same set of ids. Freed slots are recycled without
/// affecting traversal order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    index: HashMap<ItemId, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

/// Result of [`Ledger::add_or_update`].
#[derive(Debug, Clone, PartialEq)]
pub enum StockChange {
    Created { id: ItemId, name: String },
    Updated { id: ItemId, quantity: i64, price: f64 },
}

/// Result of [`Ledger::reduce_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reduction {
    pub id: ItemId,
    /// Units actually taken (clamped to what was on hand).
    pub sold: i64,
    pub remaining: i64,
    /// The record hit zero and was dropped from the ledger.
    pub removed: bool,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Restock an existing item or append a new one.
    ///
    /// For an existing id the quantity is incremented by `quantity` and the
    /// price overwritten; the name and position stay as they were. Values are
    /// taken as given.
    pub fn add_or_update(
        &mut self,
        id: ItemId,
        name: impl Into<String>,
        quantity: i64,
        price: f64,
    ) -> StockChange {
        if let Some(record) = self.record_mut(id) {
            record.restock(quantity, price);
            let quantity = record.quantity();
            tracing::info!(item_id = %id, quantity, price, "inventory item updated");
            return StockChange::Updated { id, quantity, price };
        }

        let record = InventoryRecord::new(id, name, quantity, price);
        let name = record.name().to_string();
        self.push_back(record);
        tracing::info!(item_id = %id, name = %name, quantity, price, "inventory item added");
        StockChange::Created { id, name }
    }

    /// Drop the record for `id`.
    pub fn remove(&mut self, id: ItemId) -> DomainResult<InventoryRecord> {
        match self.detach(id) {
            Some(record) => {
                tracing::info!(item_id = %id, "inventory item removed");
                Ok(record)
            }
            None => {
                tracing::warn!(item_id = %id, "remove: item not found");
                Err(DomainError::not_found(id))
            }
        }
    }

    /// Sell up to `sold` units of `id`.
    ///
    /// Selling more than is on hand sells only what exists. A record that
    /// reaches exactly zero is removed.
    pub fn reduce_quantity(&mut self, id: ItemId, sold: i64) -> DomainResult<Reduction> {
        let Some(record) = self.record_mut(id) else {
            tracing::warn!(item_id = %id, "reduce quantity: item not found");
            return Err(DomainError::not_found(id));
        };

        let sold = record.take(sold);
        let remaining = record.quantity();
        let removed = remaining == 0;
        if removed {
            self.detach(id);
        }

        tracing::info!(item_id = %id, sold, remaining, removed, "inventory quantity reduced");
        Ok(Reduction {
            id,
            sold,
            remaining,
            removed,
        })
    }

    pub fn lookup(&self, id: ItemId) -> Option<&InventoryRecord> {
        let slot = *self.index.get(&id)?;
        self.slot(slot).map(|s| &s.record)
    }

    /// Records in insertion order (order of first creation).
    pub fn records(&self) -> Records<'_> {
        Records {
            ledger: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.records().map(Entity::id).collect()
    }

    /// Owned copy of every record, in insertion order.
    pub fn snapshot(&self) -> Vec<InventoryRecord> {
        self.records().cloned().collect()
    }

    /// Sum of quantity × price across all records.
    pub fn total_value(&self) -> f64 {
        self.records().map(InventoryRecord::value).sum()
    }

    fn slot(&self, idx: usize) -> Option<&Slot> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, idx: usize) -> Option<&mut Slot> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn record_mut(&mut self, id: ItemId) -> Option<&mut InventoryRecord> {
        let idx = *self.index.get(&id)?;
        self.slot_mut(idx).map(|s| &mut s.record)
    }

    fn push_back(&mut self, record: InventoryRecord) {
        let id = record.id();
        let slot = Slot {
            record,
            prev: self.tail,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(slot);
                idx
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };

        match self.tail.and_then(|t| self.slot_mut(t)) {
            Some(tail) => tail.next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.index.insert(id, idx);
    }

    /// Unlink `id` from the chain and the index, freeing its slot.
    fn detach(&mut self, id: ItemId) -> Option<InventoryRecord> {
        let idx = self.index.remove(&id)?;
        let Slot { record, prev, next } = self.slots.get_mut(idx)?.take()?;

        match prev.and_then(|p| self.slot_mut(p)) {
            Some(p) => p.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.slot_mut(n)) {
            Some(n) => n.prev = prev,
            None => self.tail = prev,
        }

        self.free.push(idx);
        Some(record)
    }
}

/// Insertion-order iterator over a [`Ledger`].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    ledger: &'a Ledger,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a InventoryRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.ledger.slot(self.cursor?)?;
        self.cursor = slot.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&slot.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Records<'_> {}

impl core::fmt::Display for StockChange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StockChange::Created { id, name } => write!(f, "Added new item: {name} (ID: {id})"),
            StockChange::Updated {
                id,
                quantity,
                price,
            } => write!(
                f,
                "Updated item ID {id} with new quantity {quantity} and price {price}"
            ),
        }
    }
}

impl core::fmt::Display for Reduction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Sold {} of item ID {}", self.sold, self.id)?;
        if self.removed {
            write!(f, "; item is out of stock and was removed")
        } else {
            write!(f, "; {} remaining", self.remaining)
        }
    }
}

impl core::fmt::Display for Ledger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return write!(f, "Inventory is empty.");
        }
        write!(f, "{:<6} {:<20} {:>8} {:>10}", "ID", "Name", "Quantity", "Price")?;
        for record in self.records() {
            write!(f, "\n{record}")?;
        }
        Ok(())
    }
}
