//! Export job identity and lifecycle state

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Opaque export job identifier issued by the service
///
/// The service returns numeric ids today; string ids are accepted as well so
/// the client does not depend on the representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// Wrap an id as received from the service
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id as it appears in job URLs
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a job id from a JSON value, accepting numbers and strings
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for JobId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for JobId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).ok_or_else(|| {
            serde::de::Error::custom(format!("job id must be a string or number, got {value}"))
        })
    }
}

/// Export job state as reported by the service
///
/// The set of strings is owned by the remote API; anything unrecognised is
/// kept in [`JobState::Other`] and treated as non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobState {
    /// Accepted, not started yet
    Queued,
    /// Export in progress
    Running,
    /// Output ready for download
    Completed,
    /// Stopped before completion
    Canceled,
    /// Ended without output
    Failed,
    /// Any state this client does not know
    Other(String),
}

impl JobState {
    /// State as reported by the service
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "Queued",
            Self::Running => "Running",
            Self::Completed => "Completed",
            Self::Canceled => "Canceled",
            Self::Failed => "Failed",
            Self::Other(state) => state.as_str(),
        }
    }

    /// No further transition happens after this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled | Self::Failed)
    }

    /// Terminal state without usable output
    pub fn is_unsuccessful(&self) -> bool {
        matches!(self, Self::Canceled | Self::Failed)
    }
}

impl From<String> for JobState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Queued" => Self::Queued,
            "Running" => Self::Running,
            "Completed" => Self::Completed,
            "Canceled" => Self::Canceled,
            "Failed" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for JobState {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<JobState> for String {
    fn from(value: JobState) -> Self {
        match value {
            JobState::Other(state) => state,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
