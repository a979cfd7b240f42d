// src/io/scenario.rs

use crate::error::{DispatchError, Result};
use crate::model::drone::Drone;
use crate::model::geometry::Coordinates;
use crate::model::item_list::ItemList;
use crate::model::order::Order;
use crate::model::warehouse::Warehouse;
use crate::simulation::config::SimulationParameters;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Reads a scenario file.
///
/// # Format
/// Whitespace separated numbers, one record per line:
///
/// ```text
/// rows columns drones turns max_payload
/// P                      (number of item types)
/// w_0 .. w_P-1           (weight of each item type)
/// W                      (number of warehouses)
/// row column             \ once per warehouse
/// s_0 .. s_P-1           / (stock of each item type)
/// C                      (number of orders)
/// row column             \
/// L                      | once per order
/// t_0 .. t_L-1           / (item type of each requested unit)
/// ```
///
/// All drones start at the first warehouse.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<SimulationParameters> {
    let text = fs::read_to_string(path)?;
    parse_scenario(&text)
}

pub fn parse_scenario(text: &str) -> Result<SimulationParameters> {
    let mut reader = RecordReader::new(text);

    let header: Vec<u32> = reader.record(Some(5))?;
    let (rows, columns, drone_count, max_turns, max_payload) =
        (header[0], header[1], header[2], header[3] as usize, header[4]);

    let item_types: usize = reader.single()?;
    let item_weights: Vec<u32> = reader.record(Some(item_types))?;

    let warehouse_count: usize = reader.single()?;
    let mut warehouses = Vec::with_capacity(warehouse_count);
    for id in 0..warehouse_count {
        let coordinates = reader.coordinates(rows, columns)?;
        let stock: Vec<u32> = reader.record(Some(item_types))?;
        warehouses.push(Warehouse::new(id, coordinates, ItemList::from_counts(&stock)));
    }

    let order_count: usize = reader.single()?;
    let mut orders = Vec::with_capacity(order_count);
    for id in 0..order_count {
        let coordinates = reader.coordinates(rows, columns)?;
        let units: usize = reader.single()?;
        let requested: Vec<usize> = reader.record(Some(units))?;
        if let Some(&bad) = requested.iter().find(|&&t| t >= item_types) {
            return Err(reader.error(format!("order {id} requests unknown item type {bad}")));
        }
        orders.push(Order::new(id, coordinates, ItemList::from_index_list(&requested)));
    }

    let start = warehouses.first().map(|w| w.coordinates).unwrap_or_default();
    let drones = (0..drone_count as usize)
        .map(|id| Drone::new(id, start, max_payload))
        .collect();

    Ok(SimulationParameters {
        rows,
        columns,
        max_turns,
        max_payload,
        item_weights,
        drones,
        orders,
        warehouses,
    })
}

/// Walks non-blank lines and remembers where it is for error messages.
struct RecordReader<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> RecordReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    fn error(&self, reason: String) -> DispatchError {
        DispatchError::Parse {
            line: self.line,
            reason,
        }
    }

    fn record<T: FromStr>(&mut self, expected: Option<usize>) -> Result<Vec<T>> {
        // An empty record (e.g. zero item types) may sit on a blank line
        if expected == Some(0) {
            return Ok(Vec::new());
        }

        let raw = loop {
            match self.lines.next() {
                Some(raw) => {
                    self.line += 1;
                    if !raw.trim().is_empty() {
                        break raw;
                    }
                }
                None => return Err(self.error("unexpected end of file".to_string())),
            }
        };

        let values = raw
            .split_whitespace()
            .map(|token| {
                token
                    .parse()
                    .map_err(|_| self.error(format!("'{token}' is not a valid number")))
            })
            .collect::<Result<Vec<T>>>()?;

        match expected {
            Some(n) if values.len() != n => Err(self.error(format!("expected {n} values, found {}", values.len()))),
            _ => Ok(values),
        }
    }

    fn single<T: FromStr>(&mut self) -> Result<T> {
        let mut values = self.record(Some(1))?;
        values
            .pop()
            .ok_or_else(|| self.error("expected a single value".to_string()))
    }

    fn coordinates(&mut self, rows: u32, columns: u32) -> Result<Coordinates> {
        let values: Vec<u32> = self.record(Some(2))?;
        let (row, column) = (values[0], values[1]);
        if row >= rows || column >= columns {
            return Err(self.error(format!("({row}, {column}) is outside the {rows}x{columns} grid")));
        }
        Ok(Coordinates::new(row, column))
    }
}
