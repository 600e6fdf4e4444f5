use crate::domain::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle events hooks can subscribe to.
///
/// The vocabulary is closed: there is no mechanism to register custom event
/// names, and emitting outside this set is unrepresentable. String surfaces
/// (configuration, pass-through APIs) go through `FromStr`, which rejects
/// unknown names instead of creating a new bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEvent {
    /// Fired before the middleware chain and the record emission.
    BeforeLog,
    /// Fired after the record has been emitted; observation only.
    AfterLog,
    /// Fired when a hook callback fails during another emission.
    OnError,
}

impl HookEvent {
    /// All events, in lifecycle order. Used to pre-create registry buckets.
    pub const ALL: [HookEvent; 3] = [HookEvent::BeforeLog, HookEvent::AfterLog, HookEvent::OnError];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookEvent::BeforeLog => "before_log",
            HookEvent::AfterLog => "after_log",
            HookEvent::OnError => "on_error",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookEvent {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before_log" => Ok(HookEvent::BeforeLog),
            "after_log" => Ok(HookEvent::AfterLog),
            "on_error" => Ok(HookEvent::OnError),
            other => Err(ConfigError::InvalidEvent(other.to_string())),
        }
    }
}
