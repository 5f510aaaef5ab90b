//! Interactive parameter collection for command handlers.
use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

/// Supplies named parameters to dispatchers.
///
/// A provider may decline (`None`), in which case the dispatcher aborts
/// silently: no request is issued and nothing is logged.
#[async_trait]
pub trait PromptSource: Send + Sync {
    /// Asks for one parameter, offering a default value.
    async fn ask(&self, label: &str, default: &str) -> Option<String>;
}

/// Prompt provider backed by the console's line editor.
///
/// The default value is prefilled in the input line: accepting it returns
/// the default, clearing the line declines, and Ctrl-C/Ctrl-D decline.
pub struct InteractivePrompts {
    editor: AsyncMutex<DefaultEditor>,
}

impl InteractivePrompts {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: AsyncMutex::new(DefaultEditor::new()?),
        })
    }

    /// Reads one command line from the console. Returns `None` on Ctrl-C or
    /// end of input.
    pub async fn read_command(&self, prompt: &str) -> Option<String> {
        let mut editor = self.editor.lock().await;
        match tokio::task::block_in_place(|| editor.readline(prompt)) {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                Some(line)
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                debug!("Console input error: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl PromptSource for InteractivePrompts {
    async fn ask(&self, label: &str, default: &str) -> Option<String> {
        let mut editor = self.editor.lock().await;
        let prompt = format!("{}: ", label);
        match tokio::task::block_in_place(|| editor.readline_with_initial(&prompt, (default, "")))
        {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                debug!("Prompt input error: {}", e);
                None
            }
        }
    }
}

/// Prompt provider that replays a fixed queue of answers.
///
/// Used for scripted sessions and for exercising dispatchers without a
/// terminal. An exhausted queue declines every further prompt.
pub struct ScriptedPrompts {
    answers: Mutex<VecDeque<Option<String>>>,
}

impl ScriptedPrompts {
    pub fn new<I>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
        }
    }
}

#[async_trait]
impl PromptSource for ScriptedPrompts {
    async fn ask(&self, _label: &str, _default: &str) -> Option<String> {
        self.answers.lock().unwrap().pop_front().flatten()
    }
}
