pub mod finding;
pub mod record;
pub mod report;

pub use finding::*;
pub use record::{CallError, CallOutcome, CallRecord, CallRequest};
pub use report::*;
