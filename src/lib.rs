#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. HookEvent in hooks module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

pub mod domain;
pub mod hooks;
pub mod logger;

// Re-export main types for easy access
pub use domain::{BoxError, ConfigError, ConsoleError, EntryPatch, LogEntry, LogLevel, PipelineError};
pub use hooks::{
    AsyncFnHook, Chain, DEFAULT_PRIORITY, FnHook, FnMiddleware, Hook, HookEvent, HookManager,
    HookResult, HookToken, Middleware, MiddlewareToken, Next, PipelineStats,
};
pub use logger::{ConsoleConfig, ConsoleLogger};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
