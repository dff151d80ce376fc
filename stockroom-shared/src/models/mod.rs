pub mod item;
pub mod stock;
pub mod transaction;
