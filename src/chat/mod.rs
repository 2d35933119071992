//! Chat exchange and conversation history for the assistant backend

mod conversation;
mod types;

use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::Session;

pub use conversation::*;
pub use types::*;

/// Client for the backend's authenticated chat endpoints
#[derive(Clone)]
pub struct Chat {
    /// The base URL for the assistant backend
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session, shared with the auth client
    session: Arc<Mutex<Option<Session>>>,
}

impl Chat {
    /// Create a new Chat client
    pub(crate) fn new(url: &str, client: Client, session: Arc<Mutex<Option<Session>>>) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    fn bearer(&self) -> Result<String, Error> {
        let current_session = self.session.lock().unwrap();
        match *current_session {
            Some(ref session) => Ok(session.access_token.clone()),
            None => Err(Error::auth("Not logged in")),
        }
    }

    /// Fetch the stored conversation transcript, oldest first
    pub async fn history(&self, limit: Option<usize>) -> Result<Vec<Message>, Error> {
        let url = self.endpoint("/history/");
        let token = self.bearer()?;

        let mut request = Fetch::get(&self.client, &url).bearer_auth(&token);
        if let Some(limit) = limit {
            let mut params = HashMap::new();
            params.insert("limit".to_string(), limit.to_string());
            request = request.query(params);
        }

        let history = request.execute::<Vec<Message>>().await?;
        Ok(history)
    }

    /// Send one user message together with the prior transcript and get back
    /// the assistant's reply and the updated canonical transcript
    pub async fn send(
        &self,
        user_message: &str,
        chat_history: &[Message],
    ) -> Result<ChatResponse, Error> {
        let url = self.endpoint("/chat/");
        let token = self.bearer()?;

        let body = ChatRequest {
            user_message: user_message.to_string(),
            chat_history: chat_history.to_vec(),
        };

        let response = Fetch::post(&self.client, &url)
            .bearer_auth(&token)
            .json(&body)?
            .execute::<ChatResponse>()
            .await?;

        Ok(response)
    }
}
