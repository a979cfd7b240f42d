// src/simulation/engine.rs

use crate::model::drone::{Drone, DroneStatus};
use crate::model::order::Order;
use crate::model::warehouse::Warehouse;
use crate::simulation::config::SimulationParameters;
use crate::simulation::weights::{Coefficient, WeightVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What a drone does when its order needs items no warehouse can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StallPolicy {
    /// Keep the order and try again every turn.
    #[default]
    Wait,
    /// Drop the order after this many consecutive stalled turns.
    Abandon { after_turns: u32 },
}

/// One full run of a scenario under one weight vector.
#[derive(Debug, Clone)]
pub struct Simulation {
    parameters: SimulationParameters,
    weights: WeightVector,
    stall_policy: StallPolicy,
    score: u64,

    completed_orders: Vec<Order>,
    abandoned_orders: Vec<Order>,
}

impl Simulation {
    /// Binds `weights` to a private copy of the scenario template.
    pub fn new(template: &SimulationParameters, weights: WeightVector) -> Self {
        Self {
            parameters: template.clone(),
            weights,
            stall_policy: StallPolicy::default(),
            score: 0,
            completed_orders: Vec::new(),
            abandoned_orders: Vec::new(),
        }
    }

    pub fn with_stall_policy(mut self, stall_policy: StallPolicy) -> Self {
        self.stall_policy = stall_policy;
        self
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// Current scenario state. After `run` this is the final state.
    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    pub fn completed_orders(&self) -> &[Order] {
        &self.completed_orders
    }

    pub fn abandoned_orders(&self) -> &[Order] {
        &self.abandoned_orders
    }

    /// Plays every turn of the scenario. Drones act one after another in
    /// their scenario order, which makes the outcome reproducible.
    pub fn run(&mut self) {
        let max_turns = self.parameters.max_turns;
        for turn in 0..max_turns {
            if turn % 100 == 0 {
                debug!(turn, score = self.score, "simulation progress");
            }
            for index in 0..self.parameters.drones.len() {
                if self.parameters.drones[index].is_ready() {
                    self.step_drone(index, turn);
                }
                self.parameters.drones[index].update_time();
            }
        }
        debug!(
            score = self.score,
            completed = self.completed_orders.len(),
            "total simulation score"
        );
    }

    fn step_drone(&mut self, index: usize, turn: usize) {
        let SimulationParameters {
            max_turns,
            item_weights,
            drones,
            orders,
            warehouses,
            ..
        } = &mut self.parameters;
        let drone = &mut drones[index];

        if drone.status == DroneStatus::NoOrder && !orders.is_empty() {
            rank_orders(orders, &self.weights);
            drone.set_order(orders.remove(0));
        }

        if drone.status == DroneStatus::NoTarget
            && drone.is_ready()
            && !dispatch(drone, warehouses, item_weights, &self.weights)
        {
            let streak = drone.stall();
            if let StallPolicy::Abandon { after_turns } = self.stall_policy {
                if streak >= after_turns {
                    if let Some(order) = drone.abandon_order() {
                        warn!(drone = drone.id, order = order.id, turn, "abandoning unfulfillable order");
                        self.abandoned_orders.push(order);
                    }
                }
            }
        }

        if drone.status == DroneStatus::ReadyToLoad && drone.is_ready() {
            drone.load();
        }

        if drone.status == DroneStatus::ReadyToDeliver && drone.is_ready() {
            drone.deliver();
        }

        if drone.status == DroneStatus::ReadyToScore {
            if let Some((points, order)) = drone.calc_score(*max_turns, turn) {
                self.score += points;
                self.completed_orders.push(order);
            }
        }
    }
}

/// Ranks pending orders best-first. The sort is stable, so equal scores keep
/// their queue order.
fn rank_orders(orders: &mut [Order], weights: &WeightVector) {
    let w_amount = weights.get(Coefficient::OrderAmount);
    let w_diversity = weights.get(Coefficient::OrderDiversity);
    for order in orders.iter_mut() {
        order.score = w_amount * order.amount() as f64 + w_diversity * order.items.distinct_types() as f64;
    }
    orders.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Scores every warehouse for the drone's outstanding demand and returns the
/// index of the best one. Warehouses with nothing useful score `-inf` and are
/// never returned.
fn rank_warehouses(warehouses: &mut [Warehouse], drone: &Drone, weights: &WeightVector) -> Option<usize> {
    let order = drone.order.as_ref()?;
    let needed = drone.outstanding();

    let w_order = weights.get(Coefficient::OrderDistance);
    let w_drone = weights.get(Coefficient::DroneDistance);
    let w_stock = weights.get(Coefficient::StockQuantity);

    for warehouse in warehouses.iter_mut() {
        let available = warehouse.available_for(&needed);
        warehouse.score = if available == 0 {
            f64::NEG_INFINITY
        } else {
            w_order * order.coordinates.distance(&warehouse.coordinates)
                + w_drone * drone.coordinates.distance(&warehouse.coordinates)
                + w_stock * available as f64
        };
    }

    let mut ranking: Vec<usize> = (0..warehouses.len()).collect();
    ranking.sort_by(|&a, &b| warehouses[b].score.total_cmp(&warehouses[a].score));
    ranking
        .into_iter()
        .next()
        .filter(|&best| warehouses[best].score > f64::NEG_INFINITY)
}

/// Sends a drone without a target somewhere useful. Returns `false` when the
/// drone has nowhere to go.
fn dispatch(drone: &mut Drone, warehouses: &mut [Warehouse], item_weights: &[u32], weights: &WeightVector) -> bool {
    if drone.has_all_items() {
        drone.fly_to_order();
        return true;
    }

    if let Some(best) = rank_warehouses(warehouses, drone, weights) {
        if drone.reserve_goods(&mut warehouses[best], item_weights) > 0 {
            drone.fly_to_warehouse(&warehouses[best]);
            return true;
        }
    }

    // Full, or nothing left to pick up: bring what is on board.
    if !drone.cargo.is_empty() {
        drone.fly_to_order();
        return true;
    }
    false
}
