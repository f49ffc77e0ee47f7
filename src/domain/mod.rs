pub mod config;
pub mod results;
pub mod side;
pub mod strategy;
