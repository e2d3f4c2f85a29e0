//! Page session identifiers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one page rendering session
///
/// UUIDv7 so identifiers sort by creation time, which keeps session logs
/// chronologically greppable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a new session identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a session identifier from its string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid session id: {}", e))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
