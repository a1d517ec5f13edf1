//! Travel Buddy chat panel state

use anyhow::Result;
use tracing::warn;

use super::TravelApi;
use crate::gateway::prompts::CHAT_FALLBACK;
use crate::models::{ChatMessage, ChatReply, ChatRequest, Role};

pub const GREETING: &str = "Hi there! I'm Travel Buddy ✈️🐨 I'm here to help you discover amazing places around you! What would you like to find today?";

/// Context label sent with every message from the panel
pub const PANEL_CONTEXT: &str = "travel assistance";

pub struct ChatPanel {
    open: bool,
    messages: Vec<ChatMessage>,
    pending: bool,
    next_id: u64,
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPanel {
    /// Starts closed, with the greeting as its only message.
    pub fn new() -> Self {
        let mut panel = Self {
            open: false,
            messages: Vec::new(),
            pending: false,
            next_id: 1,
        };
        panel.push(Role::Assistant, GREETING.to_string());
        panel
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    fn push(&mut self, role: Role, text: String) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage { id, role, text });
    }

    /// Appends the user's message and builds the request to send.
    ///
    /// Returns `None` for blank input or while a reply is still outstanding.
    pub fn begin_send(&mut self, input: &str, location: Option<&str>) -> Option<ChatRequest> {
        let text = input.trim();
        if text.is_empty() || self.pending {
            return None;
        }

        self.push(Role::User, text.to_string());
        self.pending = true;

        Some(
            ChatRequest::new(text)
                .with_location(location.map(str::to_string))
                .with_context(PANEL_CONTEXT),
        )
    }

    /// Records the outcome of the request started by [`Self::begin_send`].
    pub fn finish(&mut self, outcome: Result<ChatReply>) {
        let text = match outcome {
            Ok(reply) => reply.text,
            Err(e) => {
                warn!("Chat request failed: {:#}", e);
                CHAT_FALLBACK.to_string()
            }
        };
        self.push(Role::Assistant, text);
        self.pending = false;
    }

    /// Full round trip. Returns false when nothing was sent.
    pub async fn send<A: TravelApi + ?Sized>(
        &mut self,
        api: &A,
        input: &str,
        location: Option<&str>,
    ) -> bool {
        let Some(request) = self.begin_send(input, location) else {
            return false;
        };
        let outcome = api.chat(&request).await;
        self.finish(outcome);
        true
    }
}
