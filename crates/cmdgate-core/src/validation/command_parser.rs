//! Command segment parsing.
//!
//! Splits raw command strings into chain segments and parses each
//! segment into a leading command name plus arguments, handling:
//! - Quote-aware tokenization (shlex, with a naive fallback)
//! - Flag-only segments that continue a previous pipeline stage
//! - Chain detection with a single separator kind per command

use std::fmt;

/// One parsed chain segment: the leading command name and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandSpec {
    /// Leading command name; empty for pipeline continuations.
    pub command: String,
    /// Arguments following the command name.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// True when this segment does not name a command of its own
    /// (a flag continuation like `-v`, or a blank segment).
    pub fn is_continuation(&self) -> bool {
        self.command.is_empty()
    }
}

/// The kind of chain a separator introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainKind {
    /// Segments joined by `|`.
    Pipeline,
    /// Segments joined by `;`.
    Sequence,
    /// Segments joined by `&`.
    Background,
}

impl ChainKind {
    /// The separator character this chain kind splits on.
    pub fn separator(self) -> char {
        match self {
            ChainKind::Pipeline => '|',
            ChainKind::Sequence => ';',
            ChainKind::Background => '&',
        }
    }
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainKind::Pipeline => write!(f, "pipeline"),
            ChainKind::Sequence => write!(f, "command sequence"),
            ChainKind::Background => write!(f, "background command"),
        }
    }
}

/// Detect the chain kind of a command, if any.
///
/// Only one separator kind is honored per command, chosen by priority
/// pipe > semicolon > ampersand. A command mixing `|` and `;` splits on
/// `|` only; the remaining separators stay inside their segments.
pub fn detect_chain(command: &str) -> Option<ChainKind> {
    [ChainKind::Pipeline, ChainKind::Sequence, ChainKind::Background]
        .into_iter()
        .find(|kind| command.contains(kind.separator()))
}

/// Parse one chain segment into a command name and arguments.
///
/// A segment starting with `-` is a flag continuation of the previous
/// pipeline stage, not a command: it yields an empty command name with
/// the trimmed text as its single argument. Tokenization is quote-aware;
/// when shlex fails (unbalanced quotes) it falls back to naive
/// whitespace splitting, so parsing is total and never errors.
pub fn parse_segment(text: &str) -> CommandSpec {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return CommandSpec::default();
    }

    if trimmed.starts_with('-') {
        return CommandSpec {
            command: String::new(),
            args: vec![trimmed.to_string()],
        };
    }

    let mut tokens = match shlex::split(trimmed) {
        Some(tokens) => tokens,
        None => trimmed.split_whitespace().map(str::to_string).collect(),
    };

    if tokens.is_empty() {
        return CommandSpec::default();
    }

    let command = tokens.remove(0);
    CommandSpec {
        command,
        args: tokens,
    }
}
