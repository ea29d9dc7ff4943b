pub mod catalog;
pub mod cli;
pub mod energy;
pub mod error;
pub mod generator;
pub mod plan;
pub mod planner;
pub mod session;
pub mod summary;
