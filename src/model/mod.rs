pub mod drone;
pub mod geometry;
pub mod item;
pub mod item_list;
pub mod order;
pub mod warehouse;
