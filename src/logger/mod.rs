//! Console logger façade built on the hook pipeline.

pub mod config;
pub mod console;
pub mod format;

pub use config::ConsoleConfig;
pub use console::ConsoleLogger;
pub use format::format_line;
