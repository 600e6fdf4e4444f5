use super::config::ConsoleConfig;
use super::format::format_line;
use crate::domain::{ConsoleError, LogEntry, LogLevel};
use crate::hooks::HookManager;
use parking_lot::Mutex;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;

/// Minimal console logger routing every record through the hook pipeline.
///
/// The flow per call is: build entry → [`HookManager::process`] → format →
/// write to the sink → [`HookManager::after_process`]. Middleware failures
/// surface to the caller as [`ConsoleError::Pipeline`]; hook failures never
/// reach here.
pub struct ConsoleLogger {
    config: ConsoleConfig,
    manager: Arc<HookManager>,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleLogger {
    /// Build a logger with its own pipeline, writing to stdout.
    pub fn new(config: ConsoleConfig) -> Self {
        Self::with_manager(config, Arc::new(HookManager::new()))
    }

    /// Build a logger sharing an existing pipeline. This is the intended way
    /// to have several loggers observe the same hooks: construct one
    /// `HookManager` at startup and pass it in, rather than relying on a
    /// hidden process-wide instance.
    pub fn with_manager(config: ConsoleConfig, manager: Arc<HookManager>) -> Self {
        Self {
            config,
            manager,
            sink: Mutex::new(Box::new(std::io::stdout())),
        }
    }

    /// Redirect output, e.g. to stderr or an in-memory buffer in tests.
    pub fn with_sink(mut self, sink: Box<dyn Write + Send>) -> Self {
        self.sink = Mutex::new(sink);
        self
    }

    /// The pipeline this logger routes through. Registration methods
    /// (`on`, `once`, `off`, `use_middleware`, `clear`, `stats`) are exposed
    /// to end users through this handle.
    pub fn hooks(&self) -> &Arc<HookManager> {
        &self.manager
    }

    /// Log one record at `level`. Records below the configured minimum are
    /// dropped before the pipeline runs.
    pub async fn log(
        &self,
        level: LogLevel,
        message: &str,
        args: Vec<Value>,
    ) -> Result<(), ConsoleError> {
        if level < self.config.min_level {
            return Ok(());
        }

        let mut entry = LogEntry::new(level, message).with_args(args);
        if let Some(prefix) = &self.config.prefix {
            entry.prefix = Some(prefix.clone());
        }

        let processed = self.manager.process(entry).await?;
        let line = format_line(&processed, &self.config);
        {
            let mut sink = self.sink.lock();
            writeln!(sink, "{line}")?;
            sink.flush()?;
        }
        self.manager.after_process(&processed).await;
        Ok(())
    }

    pub async fn trace(&self, message: &str) -> Result<(), ConsoleError> {
        self.log(LogLevel::Trace, message, Vec::new()).await
    }

    pub async fn debug(&self, message: &str) -> Result<(), ConsoleError> {
        self.log(LogLevel::Debug, message, Vec::new()).await
    }

    pub async fn info(&self, message: &str) -> Result<(), ConsoleError> {
        self.log(LogLevel::Info, message, Vec::new()).await
    }

    pub async fn warn(&self, message: &str) -> Result<(), ConsoleError> {
        self.log(LogLevel::Warn, message, Vec::new()).await
    }

    pub async fn error(&self, message: &str) -> Result<(), ConsoleError> {
        self.log(LogLevel::Error, message, Vec::new()).await
    }
}
