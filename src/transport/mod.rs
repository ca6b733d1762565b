pub mod provider;
pub mod http;
pub mod simulated;
pub mod client;

pub use provider::RpcTransport;
pub use http::HttpTransport;
pub use simulated::SimulatedTransport;
pub use client::RpcClient;
