#![allow(dead_code)]

use drone_dispatch_ga::io::scenario::parse_scenario;
use drone_dispatch_ga::model::drone::Drone;
use drone_dispatch_ga::model::geometry::Coordinates;
use drone_dispatch_ga::model::item_list::ItemList;
use drone_dispatch_ga::model::order::Order;
use drone_dispatch_ga::model::warehouse::Warehouse;
use drone_dispatch_ga::simulation::config::SimulationParameters;

/// Three drones, three warehouses, six orders on a 20x20 grid.
pub const CITY: &str = "\
20 20 3 120 50
4
5 10 3 8
3
0 0
10 4 6 2
10 15
3 8 0 5
18 2
0 5 9 1
6
3 4
3
0 1 2
12 12
2
3 3
19 19
4
0 0 2 1
7 16
1
3
15 5
5
2 2 2 1 0
2 9
2
1 3
";

pub fn city() -> SimulationParameters {
    parse_scenario(CITY).expect("fixture scenario should parse")
}

/// One drone and one warehouse at the origin, one order at (2, 2).
pub fn single_delivery(order_items: &[usize], stock: &[u32], max_turns: usize) -> SimulationParameters {
    SimulationParameters {
        rows: 10,
        columns: 10,
        max_turns,
        max_payload: 1000,
        item_weights: vec![1; stock.len()],
        drones: vec![Drone::new(0, Coordinates::new(0, 0), 1000)],
        orders: vec![Order::new(0, Coordinates::new(2, 2), ItemList::from_index_list(order_items))],
        warehouses: vec![Warehouse::new(0, Coordinates::new(0, 0), ItemList::from_counts(stock))],
    }
}
