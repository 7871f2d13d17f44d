//! Compiles structured log filter conditions into ClickHouse predicate
//! fragments for the loghouse logs table.

pub mod app;
pub mod core;
pub mod data;
pub mod utils;
