//! This module defines the `CommandContext`, which provides access to the
//! API client, the output log, and the prompt provider for command handlers.
use std::sync::Arc;

use crate::api::ApiClient;
use crate::console::prompt::PromptSource;
use crate::output::LogSink;

/// Provides context and utilities to command handlers.
///
/// This struct gives dispatchers their one network door (the API client),
/// their one output door (the log sink), and their input source. Cloning is
/// cheap; every dispatched request task carries its own copy.
#[derive(Clone)]
pub struct CommandContext {
    /// The catalog service client.
    api: Arc<ApiClient>,
    /// The session output log.
    sink: Arc<dyn LogSink>,
    /// The provider for interactive parameter prompts.
    prompts: Arc<dyn PromptSource>,
}

impl CommandContext {
    /// Creates a new `CommandContext`.
    pub fn new(
        api: Arc<ApiClient>,
        sink: Arc<dyn LogSink>,
        prompts: Arc<dyn PromptSource>,
    ) -> Self {
        Self { api, sink, prompts }
    }

    /// Returns the catalog service client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Returns the prompt provider.
    pub fn prompts(&self) -> &dyn PromptSource {
        &*self.prompts
    }

    /// Records one entry in the session output log.
    ///
    /// # Arguments
    ///
    /// * `message` - The message content.
    /// * `is_error` - Whether the entry carries the error label.
    pub fn record<S: AsRef<str>>(&self, message: S, is_error: bool) {
        self.sink.record(message.as_ref(), is_error);
    }
}
