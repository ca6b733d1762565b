//! Wallet to RPC provider privacy exposure analysis.
//!
//! Scenarios drive JSON-RPC calls through a recording client; every call
//! record is analyzed against a fixed set of privacy dimensions and the
//! findings are folded into one report per run.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod reporting;
pub mod scenarios;
pub mod transport;
pub mod utils;
