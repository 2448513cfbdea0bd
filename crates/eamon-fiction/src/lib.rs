//! Command pipeline and game session for the Eamon adventure engine.
//!
//! Raw input is split into a verb and an argument, matched against the
//! aliases of every registered command (adventure commands shadow built-in
//! ones), and run between `before` and `after` hooks. Hooks may veto a
//! command or start another one within the same turn. Each submitted line
//! and its result is kept in a history with a recall cursor.

/// Adventure-specific content.
pub mod adventure;
/// The command binding trait.
pub mod command;
/// The built-in command set.
pub mod commands;
/// Session configuration.
pub mod config;
/// Per-turn handle for commands and hooks.
pub mod context;
/// Error types for the command pipeline.
pub mod error;
/// Session transcript and command recall.
pub mod history;
/// Hook stages and bindings.
pub mod hook;
/// Verb resolution and dispatch.
pub mod parser;
/// A running adventure.
pub mod session;

pub use adventure::{Adventure, PlainAdventure, PowerFn};
pub use command::{Command, FnCommand};
pub use config::SessionConfig;
pub use context::TurnContext;
pub use error::{FictionError, FictionResult};
pub use history::{History, HistoryEntry};
pub use hook::{HookBinding, HookEvent, HookOutcome, HookStage};
pub use parser::CommandParser;
pub use session::{Session, SessionId, TurnResult};
