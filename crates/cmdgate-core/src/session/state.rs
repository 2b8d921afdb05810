//! Per-session approval state.

use crate::validation::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use uuid::Uuid;

/// Unique identifier for a session.
///
/// Callers normally supply their own ids; [`SessionId::new`] generates
/// a fresh UUID for callers that have none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
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

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Approval state for one session.
///
/// Sessions are created lazily on first touch and live until a sweep
/// evicts them for idleness. They never reference each other.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier
    pub id: SessionId,

    /// When the session record was created
    pub created_at: DateTime<Utc>,

    /// Last time the session was looked up or granted an approval;
    /// drives idle eviction
    pub last_active: Instant,

    /// Literal command strings the caller has approved
    pub approved_commands: HashSet<String>,

    /// Whole categories the caller has approved
    pub approved_categories: HashSet<Category>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            last_active: Instant::now(),
            approved_commands: HashSet::new(),
            approved_categories: HashSet::new(),
        }
    }

    /// Refresh the idle clock; any touch counts as activity.
    pub(crate) fn touch(&mut self) {
        self.last_active = Instant::now();
    }
}
