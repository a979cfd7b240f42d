// src/model/warehouse.rs

use crate::model::geometry::Coordinates;
use crate::model::item_list::ItemList;
use serde::Serialize;

/// A supply depot. Its stock only ever decreases.
#[derive(Debug, Clone, Serialize)]
pub struct Warehouse {
    pub id: usize,
    pub coordinates: Coordinates,
    pub stock: ItemList,
    /// Scratch ranking key, rewritten every time warehouses are ranked for a drone.
    #[serde(skip)]
    pub score: f64,
}

impl Warehouse {
    pub fn new(id: usize, coordinates: Coordinates, stock: ItemList) -> Self {
        Self {
            id,
            coordinates,
            stock,
            score: 0.0,
        }
    }

    /// How many of the `needed` units this warehouse could hand out.
    pub fn available_for(&self, needed: &ItemList) -> u32 {
        needed
            .iter()
            .map(|item| item.remains().min(self.stock.remains(item.item_type)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::order::Order;

    #[test]
    fn availability_is_the_overlap_with_demand() {
        let warehouse = Warehouse::new(0, Coordinates::new(0, 0), ItemList::from_counts(&[5, 0, 1]));
        let order = Order::new(
            0,
            Coordinates::new(1, 1),
            ItemList::from_index_list(&[0, 0, 1, 2, 2]),
        );
        // 2 of type 0, none of type 1, 1 of type 2
        assert_eq!(warehouse.available_for(&order.items), 3);
    }
}
