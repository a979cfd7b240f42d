// src/simulation/weights.rs

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named terms of the order and warehouse ranking formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coefficient {
    /// Order ranking: total units requested.
    OrderAmount,
    /// Order ranking: number of distinct item types requested.
    OrderDiversity,
    /// Warehouse ranking: distance from the warehouse to the order.
    OrderDistance,
    /// Warehouse ranking: distance from the drone to the warehouse.
    DroneDistance,
    /// Warehouse ranking: units of the order the warehouse can supply.
    StockQuantity,
}

impl Coefficient {
    pub const COUNT: usize = 5;

    pub const ALL: [Coefficient; Self::COUNT] = [
        Coefficient::OrderAmount,
        Coefficient::OrderDiversity,
        Coefficient::OrderDistance,
        Coefficient::DroneDistance,
        Coefficient::StockQuantity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Coefficient::OrderAmount => "order_amount",
            Coefficient::OrderDiversity => "order_diversity",
            Coefficient::OrderDistance => "order_distance",
            Coefficient::DroneDistance => "drone_distance",
            Coefficient::StockQuantity => "stock_quantity",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One candidate set of heuristic coefficients.
///
/// Every coefficient always has a value. Only the genetic operators create
/// new vectors; a simulation just reads the one it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<Coefficient, f64>", from = "BTreeMap<Coefficient, f64>")]
pub struct WeightVector {
    values: [f64; Coefficient::COUNT],
}

impl WeightVector {
    pub fn new(values: [f64; Coefficient::COUNT]) -> Self {
        Self { values }
    }

    /// Draws every coefficient uniformly from `range`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, range: (f64, f64)) -> Self {
        let (low, high) = range;
        let mut values = [0.0; Coefficient::COUNT];
        for value in values.iter_mut() {
            *value = if low < high { rng.gen_range(low..high) } else { low };
        }
        Self { values }
    }

    pub fn get(&self, coefficient: Coefficient) -> f64 {
        self.values[coefficient.index()]
    }

    pub fn set(&mut self, coefficient: Coefficient, value: f64) {
        self.values[coefficient.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coefficient, f64)> + '_ {
        Coefficient::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    /// Applies `f` to each coefficient pair of `self` and `other`.
    pub fn zip_with(&self, other: &WeightVector, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        let mut values = self.values;
        for (value, other_value) in values.iter_mut().zip(other.values.iter()) {
            *value = f(*value, *other_value);
        }
        Self { values }
    }
}

impl From<WeightVector> for BTreeMap<Coefficient, f64> {
    fn from(weights: WeightVector) -> Self {
        weights.iter().collect()
    }
}

impl From<BTreeMap<Coefficient, f64>> for WeightVector {
    fn from(map: BTreeMap<Coefficient, f64>) -> Self {
        let mut weights = WeightVector::default();
        for (coefficient, value) in map {
            weights.set(coefficient, value);
        }
        weights
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            values: [0.0; Coefficient::COUNT],
        }
    }
}

impl fmt::Display for WeightVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(c, v)| format!("{}={:.4}", c.name(), v))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
