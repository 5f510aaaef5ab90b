//! This module defines the console commands and their dispatching logic.
pub mod commands;
mod context;
mod dispatch;
mod prompt;

pub use context::CommandContext;
pub use dispatch::{dispatch_command, DispatchOutcome};
pub use prompt::{InteractivePrompts, PromptSource, ScriptedPrompts};
