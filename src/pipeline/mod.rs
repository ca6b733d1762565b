pub mod metrics;
pub mod orchestrator;
pub mod progress;
pub mod state;

pub use orchestrator::BatchRunner;
