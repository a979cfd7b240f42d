// src/model/item_list.rs

use crate::model::item::Item;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-item-type ledger for one order, warehouse or drone.
///
/// Backed by a `BTreeMap` so iteration order is the item type order and
/// simulations stay reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemList {
    items: BTreeMap<usize, Item>,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger where `counts[t]` is the quantity of item type `t`.
    /// Used for warehouse stock.
    pub fn from_counts(counts: &[u32]) -> Self {
        let items = counts
            .iter()
            .enumerate()
            .map(|(item_type, &quantity)| (item_type, Item::new(item_type, quantity)))
            .collect();
        Self { items }
    }

    /// Builds a ledger from a list with one entry per requested unit.
    /// Used for order demand.
    pub fn from_index_list(index_list: &[usize]) -> Self {
        let mut list = Self::new();
        for &item_type in index_list {
            list.add(item_type, 1);
        }
        list
    }

    pub fn get(&self, item_type: usize) -> Option<&Item> {
        self.items.get(&item_type)
    }

    /// Units of `item_type` left; zero for unknown types.
    pub fn remains(&self, item_type: usize) -> u32 {
        self.items.get(&item_type).map_or(0, Item::remains)
    }

    /// Takes up to `amount` units of `item_type`. Returns the units taken.
    pub fn consume(&mut self, item_type: usize, amount: u32) -> u32 {
        match self.items.get_mut(&item_type) {
            Some(item) => item.consume(amount),
            None => 0,
        }
    }

    pub fn add(&mut self, item_type: usize, amount: u32) {
        self.items
            .entry(item_type)
            .or_insert_with(|| Item::new(item_type, 0))
            .add(amount);
    }

    pub fn is_empty(&self) -> bool {
        self.items.values().all(Item::is_empty)
    }

    pub fn total_remaining(&self) -> u32 {
        self.items.values().map(Item::remains).sum()
    }

    /// Number of item types with something left.
    pub fn distinct_types(&self) -> usize {
        self.items.values().filter(|item| !item.is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Moves every remaining unit into `other`, leaving this ledger empty.
    pub fn transfer_all(&mut self, other: &mut ItemList) {
        for item in self.items.values() {
            if !item.is_empty() {
                other.add(item.item_type, item.current);
            }
        }
        self.items.clear();
    }

    /// Total weight of the remaining units. Types without a listed weight count as 1.
    pub fn weight(&self, item_weights: &[u32]) -> u32 {
        self.items
            .values()
            .map(|item| item.remains() * item_weights.get(item.item_type).copied().unwrap_or(1))
            .sum()
    }
}
