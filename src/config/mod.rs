pub mod parser;
pub mod schema;
pub mod types;
pub mod security;
pub mod credentials;
pub mod defaults;
pub mod endpoints;

pub use types::*;
pub use parser::{load_config, parse_config, parse_config_str};
pub use endpoints::ResolvedEndpoint;
