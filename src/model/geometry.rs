// src/model/geometry.rs

use serde::{Deserialize, Serialize};

/// A cell on the delivery grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub row: u32,
    pub column: u32,
}

impl Coordinates {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Euclidean distance between two cells.
    pub fn distance(&self, other: &Coordinates) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.column as f64 - other.column as f64;
        (dr * dr + dc * dc).sqrt()
    }

    /// Number of turns a flight between two cells takes.
    pub fn flight_turns(&self, other: &Coordinates) -> u32 {
        self.distance(other).ceil() as u32
    }
}
