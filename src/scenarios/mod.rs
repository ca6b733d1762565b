pub mod abi;
pub mod balance_query;
pub mod block_query;
pub mod registry;
pub mod scenario;
pub mod token_transfer;
pub mod uniswap_swap;

pub use registry::{builtin_scenarios, select_scenarios};
pub use scenario::{Scenario, ScenarioContext};
