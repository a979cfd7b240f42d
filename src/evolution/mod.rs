pub mod algorithm;
pub mod config;
pub mod population;
pub mod stats;
