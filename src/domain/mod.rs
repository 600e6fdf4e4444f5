//! Domain layer for termlog.
//!
//! Contains the canonical types shared across all modules:
//! - `LogEntry`: the pipeline's core data type, plus `EntryPatch`
//! - `LogLevel`: log severity (Trace/Debug/Info/Warn/Error)
//! - Error taxonomy: `PipelineError`, `ConsoleError`, `ConfigError`

pub mod error;
pub mod log_entry;
pub mod log_level;

pub use error::{BoxError, ConfigError, ConsoleError, PipelineError};
pub use log_entry::{EntryPatch, LogEntry};
pub use log_level::LogLevel;
