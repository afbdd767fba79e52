//! Command arguments, permission gating and dispatch
//!
//! The host parses raw input into an [`ArgumentStore`]; the grammar that does
//! so lives outside this crate. Executors read typed values back out and
//! call [`check_permission`] before touching anything privileged. Commands
//! registered with a required permission get that check from the
//! [`CommandManager`] for free.
//!
//! # Architecture
//!
//! ```text
//! host parser → ArgumentStore → CommandManager::dispatch → check_permission → executor
//!                                      │
//!                                      └─ errors are sent back via Commander::reply
//! ```
//!
//! # Example
//!
//! ```ignore
//! use permhub_core::commands::{ArgKey, CommandManager, CommandSpec, CommandError};
//!
//! const TARGET: ArgKey<String> = ArgKey::new("target");
//!
//! let mut manager = CommandManager::new();
//! manager.register(
//!     CommandSpec::new(&["kick"], "Kick a player", |src, args| {
//!         let target = args
//!             .get_one(&TARGET)
//!             .ok_or_else(|| CommandError::MissingArgument("target".into()))?;
//!         src.reply(&format!("Kicked {}", target));
//!         Ok(())
//!     })
//!     .with_permission("moderation.kick"),
//! );
//! ```

mod args;
pub mod callback;
mod gate;
mod manager;
#[cfg(test)]
pub(crate) mod testing;

pub use args::{ArgKey, ArgumentStore};
pub use callback::{CallbackController, CALLBACK_ID};
pub use gate::{check_permission, Commander};
pub use manager::{CommandExecutor, CommandKey, CommandManager, CommandResult, CommandSpec};

/// Errors raised while running commands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// A value stored into the argument store was missing
    #[error("Invalid argument: no value given for '{0}'")]
    InvalidArgument(String),

    /// The caller lacks a permission
    #[error("{message}")]
    PermissionDenied { permission: String, message: String },

    /// No command is registered under the alias
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The executor needed an argument that was not parsed
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// No callback exists with this id
    #[error("Unknown callback id {0}")]
    UnknownCallback(String),

    /// The callback belongs to another commander
    #[error("You can only run callbacks that were sent to you")]
    OnlyOwnCallbacks,
}
