// src/model/order.rs

use crate::model::geometry::Coordinates;
use crate::model::item_list::ItemList;
use serde::Serialize;

/// A customer request waiting for items.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: usize,
    pub coordinates: Coordinates,
    /// Requested quantities; `current` only goes down as drones deliver.
    pub items: ItemList,
    /// Scratch ranking key, rewritten every time the pending queue is ranked.
    #[serde(skip)]
    pub score: f64,
}

impl Order {
    pub fn new(id: usize, coordinates: Coordinates, items: ItemList) -> Self {
        Self {
            id,
            coordinates,
            items,
            score: 0.0,
        }
    }

    /// Total units still requested.
    pub fn amount(&self) -> u32 {
        self.items.total_remaining()
    }

    pub fn is_complete(&self) -> bool {
        self.items.is_empty()
    }
}
