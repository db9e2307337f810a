//! Driving the external benchmark executable and summarizing its results.

pub mod runner;
pub mod table;
