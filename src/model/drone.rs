// src/model/drone.rs

use crate::model::geometry::Coordinates;
use crate::model::item_list::ItemList;
use crate::model::order::Order;
use crate::model::warehouse::Warehouse;
use serde::Serialize;

/// Where a drone is in its delivery cycle.
///
/// `NoOrder -> NoTarget -> ReadyToLoad -> NoTarget -> ReadyToDeliver -> ReadyToScore -> NoOrder`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DroneStatus {
    NoOrder,
    NoTarget,
    ReadyToLoad,
    ReadyToDeliver,
    ReadyToScore,
}

/// A delivery drone.
#[derive(Debug, Clone)]
pub struct Drone {
    // Identity
    pub id: usize,

    // State Variables
    pub coordinates: Coordinates,
    pub status: DroneStatus,
    pub order: Option<Order>,
    pub cargo: ItemList,
    pub reserved: ItemList, // Units claimed at a warehouse, not yet loaded
    pub max_payload: u32,

    busy_turns: u32,
    stalled_turns: u32,
}

impl Drone {
    pub fn new(id: usize, coordinates: Coordinates, max_payload: u32) -> Self {
        Self {
            id,
            coordinates,
            status: DroneStatus::NoOrder,
            order: None,
            cargo: ItemList::new(),
            reserved: ItemList::new(),
            max_payload,
            busy_turns: 0,
            stalled_turns: 0,
        }
    }

    /// A drone in flight, loading or unloading cannot act this turn.
    pub fn is_ready(&self) -> bool {
        self.busy_turns == 0
    }

    pub fn busy_turns(&self) -> u32 {
        self.busy_turns
    }

    pub fn set_order(&mut self, order: Order) {
        self.order = Some(order);
        self.stalled_turns = 0;
        self.status = DroneStatus::NoTarget;
    }

    /// Units the order still needs that are neither carried nor reserved.
    pub fn outstanding(&self) -> ItemList {
        let mut needed = ItemList::new();
        if let Some(order) = &self.order {
            for item in order.items.iter() {
                let covered = self.cargo.remains(item.item_type) + self.reserved.remains(item.item_type);
                let missing = item.remains().saturating_sub(covered);
                if missing > 0 {
                    needed.add(item.item_type, missing);
                }
            }
        }
        needed
    }

    pub fn has_all_items(&self) -> bool {
        self.outstanding().is_empty()
    }

    pub fn payload_left(&self, item_weights: &[u32]) -> u32 {
        let load = self.cargo.weight(item_weights) + self.reserved.weight(item_weights);
        self.max_payload.saturating_sub(load)
    }

    /// Claims as much of the outstanding demand as the warehouse holds and the
    /// payload allows. Claimed units leave the warehouse ledger immediately,
    /// so no other drone can claim them.
    ///
    /// Returns the number of units reserved.
    pub fn reserve_goods(&mut self, warehouse: &mut Warehouse, item_weights: &[u32]) -> u32 {
        let needed = self.outstanding();
        let mut capacity = self.payload_left(item_weights);
        let mut total = 0;

        for item in needed.iter() {
            let weight = item_weights.get(item.item_type).copied().unwrap_or(1);
            let fits = if weight == 0 { item.remains() } else { capacity / weight };
            let wanted = item.remains().min(fits);
            if wanted == 0 {
                continue;
            }

            let taken = warehouse.stock.consume(item.item_type, wanted);
            if taken > 0 {
                self.reserved.add(item.item_type, taken);
                capacity -= taken * weight;
                total += taken;
            }
        }
        total
    }

    fn fly_to(&mut self, destination: Coordinates) {
        self.busy_turns = self.coordinates.flight_turns(&destination);
        self.coordinates = destination;
        self.stalled_turns = 0;
    }

    pub fn fly_to_warehouse(&mut self, warehouse: &Warehouse) {
        self.fly_to(warehouse.coordinates);
        self.status = DroneStatus::ReadyToLoad;
    }

    pub fn fly_to_order(&mut self) {
        if let Some(destination) = self.order.as_ref().map(|order| order.coordinates) {
            self.fly_to(destination);
            self.status = DroneStatus::ReadyToDeliver;
        }
    }

    /// Moves reserved units into the cargo hold. Takes one turn.
    pub fn load(&mut self) -> u32 {
        let loaded = self.reserved.total_remaining();
        self.reserved.transfer_all(&mut self.cargo);
        self.busy_turns = 1;
        self.status = DroneStatus::NoTarget;
        loaded
    }

    /// Hands carried units over to the order. Takes one turn.
    ///
    /// Returns the number of units delivered.
    pub fn deliver(&mut self) -> u32 {
        let Some(order) = self.order.as_mut() else {
            self.status = DroneStatus::NoOrder;
            return 0;
        };

        let mut delivered = 0;
        let carried: Vec<(usize, u32)> = self
            .cargo
            .iter()
            .map(|item| (item.item_type, item.remains()))
            .collect();
        for (item_type, quantity) in carried {
            let accepted = order.items.consume(item_type, quantity);
            self.cargo.consume(item_type, accepted);
            delivered += accepted;
        }

        self.busy_turns = 1;
        self.status = if order.is_complete() {
            DroneStatus::ReadyToScore
        } else {
            DroneStatus::NoTarget
        };
        delivered
    }

    /// Closes a completed order and returns the points it earned together
    /// with the order. Earlier completion earns more, up to 100 points.
    pub fn calc_score(&mut self, max_turns: usize, turn: usize) -> Option<(u64, Order)> {
        if self.status != DroneStatus::ReadyToScore {
            return None;
        }
        let order = self.order.take()?;
        self.status = DroneStatus::NoOrder;

        if max_turns == 0 || turn >= max_turns {
            return Some((0, order));
        }
        let remaining = (max_turns - turn) as u64;
        let total = max_turns as u64;
        Some(((remaining * 100).div_ceil(total), order))
    }

    /// Records a turn without a reachable target. Returns the streak length.
    pub fn stall(&mut self) -> u32 {
        self.stalled_turns += 1;
        self.stalled_turns
    }

    /// Gives up the current order. Anything still carried is dropped with it.
    pub fn abandon_order(&mut self) -> Option<Order> {
        self.status = DroneStatus::NoOrder;
        self.stalled_turns = 0;
        self.cargo = ItemList::new();
        self.reserved = ItemList::new();
        self.order.take()
    }

    /// Advances the flight/loading timer by one turn.
    pub fn update_time(&mut self) {
        self.busy_turns = self.busy_turns.saturating_sub(1);
    }
}
