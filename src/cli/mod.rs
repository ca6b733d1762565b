pub mod check;
pub mod commands;
pub mod ping;
pub mod run;

pub use commands::{Cli, Commands};
