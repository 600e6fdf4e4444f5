use super::log_level::LogLevel;
use crate::hooks::HookEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One log record as it flows through the pipeline.
///
/// This is the canonical representation of a log call from the façade
/// through hooks and middleware to the output sink. The typed fields cover
/// the known schema; `fields` is the open extension bag — any additional
/// key is legal and is preserved across stages that do not explicitly
/// overwrite it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub args: Vec<Value>,
    pub timestamp: String,

    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub stack_info: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,

    /// Free-form context attached by callers, hooks, or middleware.
    #[serde(default)]
    pub context: HashMap<String, Value>,

    /// Extension bag for keys outside the known schema.
    #[serde(default)]
    pub fields: HashMap<String, Value>,

    /// Set only on entries delivered to `on_error` hooks: the failure
    /// produced by the offending callback, stringified.
    #[serde(default)]
    pub error: Option<String>,
    /// Set only on entries delivered to `on_error` hooks: the event whose
    /// processing triggered the failure.
    #[serde(default)]
    pub hook_event: Option<HookEvent>,
}

impl LogEntry {
    /// Create an entry with the current UTC timestamp and no optional fields.
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            args: Vec::new(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            prefix: None,
            stack_info: None,
            correlation_id: None,
            context: HashMap::new(),
            fields: HashMap::new(),
            error: None,
            hook_event: None,
        }
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Attach a freshly generated v4 correlation id.
    pub fn with_correlation_id(mut self) -> Self {
        self.correlation_id = Some(uuid::Uuid::new_v4().to_string());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Merge a patch into this entry with shallow field overwrite: a field
    /// present in the patch replaces the entry's field wholesale, absent
    /// fields pass through unchanged. Extension keys overwrite per key.
    pub fn apply(&mut self, patch: EntryPatch) {
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(args) = patch.args {
            self.args = args;
        }
        if let Some(timestamp) = patch.timestamp {
            self.timestamp = timestamp;
        }
        if let Some(prefix) = patch.prefix {
            self.prefix = Some(prefix);
        }
        if let Some(stack_info) = patch.stack_info {
            self.stack_info = Some(stack_info);
        }
        if let Some(correlation_id) = patch.correlation_id {
            self.correlation_id = Some(correlation_id);
        }
        if let Some(context) = patch.context {
            self.context = context;
        }
        self.fields.extend(patch.fields);
    }
}

/// Partial-field mapping a hook may return to mutate the working entry.
///
/// `None` leaves the corresponding entry field untouched. `context`, when
/// present, replaces the whole map (shallow overwrite); keys in `fields`
/// overwrite individually, since extension keys are top-level fields of the
/// open schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryPatch {
    #[serde(default)]
    pub level: Option<LogLevel>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub args: Option<Vec<Value>>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub stack_info: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,
    #[serde(default)]
    pub context: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl EntryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn context(mut self, context: HashMap<String, Value>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// True when the patch would not change any field.
    pub fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.message.is_none()
            && self.args.is_none()
            && self.timestamp.is_none()
            && self.prefix.is_none()
            && self.stack_info.is_none()
            && self.correlation_id.is_none()
            && self.context.is_none()
            && self.fields.is_empty()
    }
}
