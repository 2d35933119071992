//! Smart Doctor Assistant Rust Client Library
//!
//! A Rust client for the appointment-booking chat assistant backend,
//! providing authentication, durable session storage, the conversation
//! state machine, and the doctor/patient directory endpoints.

pub mod auth;
pub mod chat;
pub mod config;
pub mod directory;
pub mod error;
pub mod fetch;
pub mod session;

use reqwest::Client;

use crate::auth::Auth;
use crate::chat::{Chat, Conversation};
use crate::config::ClientOptions;
use crate::directory::Directory;
use crate::session::SessionStore;

/// The main entry point for the Doctor Assistant client
pub struct DocAssist {
    /// The base URL for the assistant backend
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth client for registration, login, and session handling
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
}

impl DocAssist {
    /// Create a new client for a backend base URL
    ///
    /// # Example
    ///
    /// ```
    /// use docassist_client::DocAssist;
    ///
    /// let client = DocAssist::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use docassist_client::{config::ClientOptions, DocAssist};
    /// use std::time::Duration;
    ///
    /// let options = ClientOptions::default()
    ///     .with_request_timeout(Some(Duration::from_secs(30)));
    /// let client = DocAssist::new_with_options("http://localhost:8000", options);
    /// ```
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Self {
        let url = base_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().expect("failed to build HTTP client");

        let store = match options.session_file {
            Some(ref path) => SessionStore::with_path(path.clone()),
            None => SessionStore::new(),
        };

        let auth = Auth::new(&url, http_client.clone(), store);

        Self {
            url,
            http_client,
            auth,
            options,
        }
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Create a chat client sharing this client's session
    pub fn chat(&self) -> Chat {
        Chat::new(&self.url, self.http_client.clone(), self.auth.session_handle())
    }

    /// Create a directory client for the non-LLM endpoints
    pub fn directory(&self) -> Directory {
        Directory::new(&self.url, self.http_client.clone())
    }

    /// Create a conversation controller bound to this client's session
    pub fn conversation(&self) -> Conversation {
        Conversation::new(self.auth.clone(), self.chat(), self.options.history_limit)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{AuthForm, AuthMode, Role, SubmitOutcome};
    pub use crate::chat::{Conversation, Message, MessageRole};
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::DocAssist;
}
