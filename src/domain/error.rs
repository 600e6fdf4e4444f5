use thiserror::Error;

/// Open error type returned by hook callbacks and middleware.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure surfaced by `HookManager::process`.
///
/// Hook callback failures never reach this type; they are rerouted to the
/// `on_error` event inside the emission engine. Only middleware failures
/// propagate to the caller.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Middleware failed: {0}")]
    Middleware(#[source] BoxError),
}

/// Configuration error for the console façade.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Unknown hook event: {0}")]
    InvalidEvent(String),
}

/// Top-level error type for the console façade.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Sink error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
