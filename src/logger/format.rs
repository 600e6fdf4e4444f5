use super::config::ConsoleConfig;
use crate::domain::LogEntry;
use std::fmt::Write;

/// Render one entry as a plain text line:
/// `[timestamp] LEVEL [prefix] message args... key=value...`
///
/// Context pairs are sorted by key so output is deterministic regardless of
/// map iteration order.
pub fn format_line(entry: &LogEntry, config: &ConsoleConfig) -> String {
    let mut line = String::new();

    if config.show_timestamp {
        let _ = write!(line, "[{}] ", entry.timestamp);
    }
    let _ = write!(line, "{:<5}", entry.level.as_tag());
    if let Some(prefix) = &entry.prefix {
        let _ = write!(line, " [{prefix}]");
    }
    let _ = write!(line, " {}", entry.message);

    for arg in &entry.args {
        let _ = write!(line, " {arg}");
    }

    let mut context: Vec<_> = entry.context.iter().collect();
    context.sort_by_key(|(key, _)| key.as_str());
    for (key, value) in context {
        let _ = write!(line, " {key}={value}");
    }

    line
}
