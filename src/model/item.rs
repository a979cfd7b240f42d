// src/model/item.rs

use serde::Serialize;

/// A quantity of one item type.
///
/// `quantity` is fixed at creation (the original request or stock level),
/// `current` is what is left of it. Only `add` may raise either, and it is
/// reserved for drone-side ledgers (cargo, reservations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub item_type: usize,
    pub quantity: u32,
    pub current: u32,
}

impl Item {
    pub fn new(item_type: usize, quantity: u32) -> Self {
        Self {
            item_type,
            quantity,
            current: quantity,
        }
    }

    /// Units still outstanding (demand) or still available (stock).
    pub fn remains(&self) -> u32 {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Takes up to `amount` units. Returns how many were actually taken.
    pub fn consume(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.current);
        self.current -= taken;
        taken
    }

    pub fn add(&mut self, amount: u32) {
        self.quantity += amount;
        self.current += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_is_capped_at_current() {
        let mut item = Item::new(3, 4);
        assert_eq!(item.consume(3), 3);
        assert_eq!(item.consume(3), 1);
        assert!(item.is_empty());
        assert_eq!(item.remains(), 0);
        assert_eq!(item.quantity, 4);
    }
}
