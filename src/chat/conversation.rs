//! Conversation state machine
//!
//! Owns the ordered transcript, the draft input, and the loading flag. The
//! transcript is optimistic-then-authoritative: the just-sent user message is
//! appended locally, and a successful exchange replaces the whole log with
//! the backend's `updated_chat_history`. The loading flag is the only
//! backpressure: a send while one is in flight is a no-op, nothing queues.

use log::debug;

use super::{Chat, Message, MessageRole};
use crate::auth::{Auth, Role, UserProfile};
use crate::error::Error;

/// Greeting seeded into an empty transcript after login
pub const WELCOME_MESSAGE: &str = "Hello! I'm your Smart Doctor Assistant. \
    I can help you check doctor availability and book appointments. \
    How can I help you today?";

/// Fixed message sent by the doctor-only report shortcut
pub const DAILY_REPORT_REQUEST: &str = "Get my daily report for today.";

/// Notice shown when the client returns to the logged-out state
pub const LOGGED_OUT_NOTICE: &str = "You have been logged out. Please log in to continue.";

/// Notice shown when the backend rejects the bearer token mid-conversation
pub const SESSION_EXPIRED_NOTICE: &str = "Your session has expired. Please log in again.";

const NETWORK_ERROR: &str = "Network error or server unavailable";

/// Client-side controller for one user's conversation with the assistant
pub struct Conversation {
    auth: Auth,
    chat: Chat,
    history_limit: Option<usize>,
    profile: Option<UserProfile>,
    messages: Vec<Message>,
    draft: String,
    loading: bool,
}

impl Conversation {
    /// Create a controller in the logged-out state
    pub(crate) fn new(auth: Auth, chat: Chat, history_limit: Option<usize>) -> Self {
        Self {
            auth,
            chat,
            history_limit,
            profile: None,
            messages: Vec::new(),
            draft: String::new(),
            loading: false,
        }
    }

    /// The ordered transcript
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The profile fetched at bootstrap, absent when logged out
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Whether an exchange is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a session is currently held
    pub fn is_logged_in(&self) -> bool {
        self.auth.current_session().is_some()
    }

    /// The draft input text
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft input text
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Fetch profile and stored history for the current session
    ///
    /// Called once after login, or at startup when a persisted token exists.
    /// Any failure here forces a logout: at this layer a dead server and a
    /// dead token are indistinguishable, and neither is retried.
    pub async fn bootstrap(&mut self) {
        let profile = match self.auth.get_user().await {
            Ok(profile) => profile,
            Err(err) => {
                debug!("bootstrap profile fetch failed: {}", err);
                self.force_logout(LOGGED_OUT_NOTICE);
                return;
            }
        };

        let history = match self.chat.history(self.history_limit).await {
            Ok(history) => history,
            Err(err) => {
                debug!("bootstrap history fetch failed: {}", err);
                self.force_logout(LOGGED_OUT_NOTICE);
                return;
            }
        };

        self.profile = Some(profile);
        self.messages = if history.is_empty() {
            vec![Message::ai(WELCOME_MESSAGE)]
        } else {
            history
        };
    }

    /// Send one user message through the assistant
    ///
    /// Preconditions: non-blank text, no exchange in flight, a session held.
    /// Violating any of them is a silent no-op.
    pub async fn send_message(&mut self, text: &str) {
        let text = text.trim().to_string();
        if text.is_empty() || self.loading || !self.is_logged_in() {
            return;
        }

        // The outgoing payload is the transcript before the optimistic
        // append, filtered to the roles the backend knows about.
        let history: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| matches!(m.role, MessageRole::Human | MessageRole::Ai))
            .cloned()
            .collect();

        self.messages.push(Message::human(text.clone()));
        self.draft.clear();
        self.loading = true;

        match self.chat.send(&text, &history).await {
            Ok(response) => {
                // Canonical replacement: the backend's transcript supersedes
                // the optimistic append.
                self.messages = response.updated_chat_history;
            }
            Err(Error::SessionExpired) => {
                self.force_logout(SESSION_EXPIRED_NOTICE);
            }
            Err(err) => {
                // Transcript keeps the optimistic user message; the failure
                // is rendered as an inline assistant-style entry.
                self.messages
                    .push(Message::ai(format!("Error: {}", failure_reason(&err))));
            }
        }
        self.loading = false;
    }

    /// Send whatever is in the draft input
    ///
    /// The draft is cleared by the send, exactly as if the text had been
    /// passed to [`send_message`](Self::send_message) directly.
    pub async fn send_draft(&mut self) {
        let draft = self.draft.clone();
        self.send_message(&draft).await;
    }

    /// Request the daily summary report, a doctor-only shortcut
    ///
    /// Sends a fixed message through [`send_message`](Self::send_message);
    /// the wrong role, a pending exchange, or a missing session is the same
    /// silent no-op.
    pub async fn request_daily_report(&mut self) {
        match self.profile {
            Some(ref profile) if profile.role == Role::Doctor => {}
            _ => return,
        }
        self.send_message(DAILY_REPORT_REQUEST).await;
    }

    /// Drop the session and return to the logged-out state
    pub fn logout(&mut self) {
        self.force_logout(LOGGED_OUT_NOTICE);
    }

    fn force_logout(&mut self, notice: &str) {
        self.auth.sign_out();
        self.profile = None;
        self.messages = vec![Message::system(notice)];
    }
}

fn failure_reason(err: &Error) -> String {
    match err {
        Error::Api { detail, .. } if !detail.is_empty() => detail.clone(),
        Error::Http(_) => NETWORK_ERROR.to_string(),
        other => other.to_string(),
    }
}
