//! Command classification.
//!
//! Decides whether a raw shell command string may run and at which
//! trust tier, based on:
//! - Dangerous-pattern regexes matched against the whole raw string
//! - Per-category allow lists and a block list for each chain segment
//! - A highest-privilege-wins rule across chain segments

mod command_parser;
mod default_commands;
mod registry;

pub use command_parser::{detect_chain, parse_segment, ChainKind, CommandSpec};
pub use default_commands::{
    DEFAULT_BLOCKED_COMMANDS, DEFAULT_DANGEROUS_PATTERNS, DEFAULT_READ_COMMANDS,
    DEFAULT_SYSTEM_COMMANDS, DEFAULT_WRITE_COMMANDS,
};
pub use registry::CommandRegistry;

use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Trust tier of a permitted command.
///
/// Ordered by privilege so a chain resolves to the maximum across its
/// segments: `Read < Write < System`. A blocked command never resolves
/// to a category; it is rejected outright.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Observes state without modifying it.
    Read,
    /// Modifies files or the environment.
    Write,
    /// Touches processes, networking, or the wider system.
    System,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Read => write!(f, "read"),
            Category::Write => write!(f, "write"),
            Category::System => write!(f, "system"),
        }
    }
}

/// Why a command was refused.
///
/// Every variant carries a user-facing message; classification never
/// panics and never partially succeeds: one bad segment invalidates
/// the whole chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Empty command")]
    EmptyCommand,

    #[error("Command separators (|, ;, &) are not allowed in the current configuration")]
    SeparatorsDisabled,

    #[error("Command contains command substitution $(). This is blocked for security reasons.")]
    CommandSubstitution,

    #[error("Command contains variable substitution ${{var}}. This is blocked for security reasons.")]
    VariableSubstitution,

    #[error("Command contains backtick command substitution. This is blocked for security reasons.")]
    BacktickSubstitution,

    #[error("Command contains dangerous pattern: {0}")]
    DangerousPattern(String),

    #[error("Command '{}'{} is blocked for security reasons", .name, chain_suffix(.chain))]
    BlockedCommand {
        name: String,
        chain: Option<ChainKind>,
    },

    #[error(
        "Command '{}'{} is not recognized or supported. Supported commands: {}",
        .name,
        chain_suffix(.chain),
        .allowed.join(", ")
    )]
    UnsupportedCommand {
        name: String,
        chain: Option<ChainKind>,
        allowed: Vec<String>,
    },

    #[error("Empty command in {0}")]
    EmptySegment(ChainKind),
}

fn chain_suffix(chain: &Option<ChainKind>) -> String {
    match chain {
        Some(kind) => format!(" in {kind}"),
        None => String::new(),
    }
}

/// Classify a raw command string against the given registry.
///
/// Returns the resolved trust tier for a permitted command, or the
/// reason it was refused. Check order:
/// 1. blank input is rejected;
/// 2. with separators disabled, any `|`, `;`, or `&` rejects the whole
///    string before further analysis;
/// 3. dangerous patterns are scanned over the unsplit string, so a
///    pattern cannot hide inside one segment of a chain;
/// 4. chains split on a single separator kind (pipe > semicolon >
///    ampersand) and every real segment must name an allowed command;
///    the chain resolves to its most privileged segment;
/// 5. a plain command resolves from its leading token alone.
///
/// Pure over its inputs: no caching, no ambient state, no panics. The
/// same command and registry always yield the same verdict.
pub fn classify(command: &str, registry: &CommandRegistry) -> Result<Category, ValidationError> {
    if command.trim().is_empty() {
        return Err(ValidationError::EmptyCommand);
    }

    if !registry.allow_separators && command.contains(['|', ';', '&']) {
        return Err(ValidationError::SeparatorsDisabled);
    }

    scan_dangerous_patterns(command, &registry.dangerous_patterns)?;

    match detect_chain(command) {
        Some(kind) => classify_chain(command, kind, registry),
        None => {
            let spec = parse_segment(command);
            classify_command(&spec.command, None, registry)
        }
    }
}

fn scan_dangerous_patterns(command: &str, patterns: &[String]) -> Result<(), ValidationError> {
    for pattern in patterns {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(err) => {
                warn!("skipping unparseable dangerous pattern {pattern:?}: {err}");
                continue;
            }
        };
        if regex.is_match(command) {
            return Err(match pattern.as_str() {
                r"\$\(" => ValidationError::CommandSubstitution,
                r"\$\{\w+\}" => ValidationError::VariableSubstitution,
                "`" => ValidationError::BacktickSubstitution,
                _ => ValidationError::DangerousPattern(pattern.clone()),
            });
        }
    }
    Ok(())
}

fn classify_chain(
    command: &str,
    kind: ChainKind,
    registry: &CommandRegistry,
) -> Result<Category, ValidationError> {
    let mut resolved = Vec::new();

    for segment in command.split(kind.separator()) {
        if segment.trim().is_empty() {
            return Err(ValidationError::EmptySegment(kind));
        }

        let spec = parse_segment(segment);
        // Flag continuations (`cmd | -v`) ride along with the previous
        // stage and are not commands of their own.
        if spec.is_continuation() {
            continue;
        }

        resolved.push(classify_command(&spec.command, Some(kind), registry)?);
    }

    // A chain is only as trustworthy as its most privileged stage. A
    // chain of nothing but continuations resolves to read.
    Ok(resolved.into_iter().max().unwrap_or(Category::Read))
}

fn classify_command(
    name: &str,
    chain: Option<ChainKind>,
    registry: &CommandRegistry,
) -> Result<Category, ValidationError> {
    if registry.blocked.contains(name) {
        return Err(ValidationError::BlockedCommand {
            name: name.to_string(),
            chain,
        });
    }

    // Overlapping membership resolves to the first category checked.
    if registry.read.contains(name) {
        Ok(Category::Read)
    } else if registry.write.contains(name) {
        Ok(Category::Write)
    } else if registry.system.contains(name) {
        Ok(Category::System)
    } else {
        Err(ValidationError::UnsupportedCommand {
            name: name.to_string(),
            chain,
            allowed: registry.allowed_commands(),
        })
    }
}
