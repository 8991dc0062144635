//! Command implementations of the `fiquote` binary

pub mod batch;
pub mod price;
pub mod schedule;
pub mod setup;
pub mod ui;
