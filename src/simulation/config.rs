// src/simulation/config.rs

use crate::model::drone::Drone;
use crate::model::order::Order;
use crate::model::warehouse::Warehouse;

/// A scenario template. Every simulation works on its own deep copy.
#[derive(Debug, Clone)]
pub struct SimulationParameters {
    pub rows: u32,
    pub columns: u32,
    pub max_turns: usize,
    pub max_payload: u32,
    /// Weight of one unit per item type. Types past the end weigh 1.
    pub item_weights: Vec<u32>,
    pub drones: Vec<Drone>,
    pub orders: Vec<Order>,
    pub warehouses: Vec<Warehouse>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            rows: 100,
            columns: 100,
            max_turns: 1000,
            max_payload: 200,
            item_weights: Vec::new(),
            drones: Vec::new(),
            orders: Vec::new(),
            warehouses: Vec::new(),
        }
    }
}

impl SimulationParameters {
    /// Total units requested across all orders.
    pub fn total_demand(&self) -> u32 {
        self.orders.iter().map(Order::amount).sum()
    }
}
