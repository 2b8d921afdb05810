//! Per-call classification configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::default_commands::{
    DEFAULT_BLOCKED_COMMANDS, DEFAULT_DANGEROUS_PATTERNS, DEFAULT_READ_COMMANDS,
    DEFAULT_SYSTEM_COMMANDS, DEFAULT_WRITE_COMMANDS,
};

/// Category lists and dangerous-pattern configuration for
/// [`classify`](super::classify).
///
/// The registry is borrowed on every call and never cached by the
/// engine, so a caller that reloads its configuration sees the new
/// lists take effect on the next call. The category sets are disjoint
/// by convention only: a name appearing in several sets resolves to the
/// first category checked (read, then write, then system).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandRegistry {
    /// Commands that only observe state.
    pub read: HashSet<String>,
    /// Commands that modify files or the environment.
    pub write: HashSet<String>,
    /// Commands that touch processes, networking, or the wider system.
    pub system: HashSet<String>,
    /// Commands that are always refused.
    pub blocked: HashSet<String>,
    /// Regex strings matched against the whole raw command string, in
    /// scan order.
    pub dangerous_patterns: Vec<String>,
    /// Whether `|`, `;`, and `&` are permitted at all.
    pub allow_separators: bool,
}

impl CommandRegistry {
    /// Registry with empty lists and separators allowed.
    pub fn new() -> Self {
        Self {
            allow_separators: true,
            ..Self::default()
        }
    }

    /// Registry seeded with the stock command lists and patterns.
    pub fn with_default_commands() -> Self {
        Self {
            read: owned(&DEFAULT_READ_COMMANDS),
            write: owned(&DEFAULT_WRITE_COMMANDS),
            system: owned(&DEFAULT_SYSTEM_COMMANDS),
            blocked: owned(&DEFAULT_BLOCKED_COMMANDS),
            dangerous_patterns: DEFAULT_DANGEROUS_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            allow_separators: true,
        }
    }

    /// Union of all allowed command names, grouped read, write, system
    /// and sorted within each group so rejection messages are stable.
    pub fn allowed_commands(&self) -> Vec<String> {
        let mut allowed =
            Vec::with_capacity(self.read.len() + self.write.len() + self.system.len());
        for set in [&self.read, &self.write, &self.system] {
            let mut names: Vec<String> = set.iter().cloned().collect();
            names.sort();
            allowed.extend(names);
        }
        allowed
    }
}

fn owned(set: &HashSet<&'static str>) -> HashSet<String> {
    set.iter().map(|name| name.to_string()).collect()
}
