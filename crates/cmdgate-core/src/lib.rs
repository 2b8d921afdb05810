//! # cmdgate-core
//!
//! Command classification and session approval for agent-driven shell
//! execution.
//!
//! This crate is framework-agnostic and can be used by:
//! - A tool server exposing gated command execution to an agent
//! - A CLI wrapper vetting commands before spawning them
//! - A daemon enforcing per-session approval policy
//!
//! ## Key Concepts
//!
//! - **Category**: trust tier of a permitted command (read / write / system)
//! - **CommandRegistry**: per-call category lists and dangerous patterns
//! - **SessionManager**: session-scoped approval grants with idle eviction
//!
//! The crate decides; it never executes. Spawning processes, loading
//! configuration, and exposing a protocol surface belong to the caller.

pub mod session;
pub mod validation;

// Re-export commonly used types
pub use session::{Session, SessionId, SessionManager};
pub use validation::{classify, Category, ChainKind, CommandRegistry, ValidationError};
