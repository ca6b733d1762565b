pub mod export;
pub mod formatter;
pub mod metadata;

pub use export::{export_json, save_json, save_report};
pub use formatter::generate_markdown_report;
