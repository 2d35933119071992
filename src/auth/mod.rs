//! Authentication and session handling for the assistant backend

mod form;
mod types;

use log::{debug, warn};
use reqwest::Client;
use std::sync::{Arc, Mutex};

use crate::error::Error;
use crate::fetch::Fetch;
use crate::session::{Session, SessionStore};

pub use form::*;
pub use types::*;

/// Client for the backend's authentication endpoints
///
/// Holds the current session in memory and mirrors it into the session
/// store, so a restarted process can pick up where it left off. Clones share
/// the same in-memory session.
#[derive(Clone)]
pub struct Auth {
    /// The base URL for the assistant backend
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session, shared with the chat client
    session: Arc<Mutex<Option<Session>>>,

    /// Durable storage for the session
    store: SessionStore,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(url: &str, client: Client, store: SessionStore) -> Self {
        Self {
            url: url.to_string(),
            client,
            session: Arc::new(Mutex::new(None)),
            store,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    /// Register a new account. Registration does not create a session; the
    /// caller is expected to log in afterwards.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, Error> {
        let url = self.endpoint("/register/");

        let user = Fetch::post(&self.client, &url)
            .json(request)?
            .execute::<UserProfile>()
            .await?;

        debug!("registered {} as {}", user.email, user.role);
        Ok(user)
    }

    /// Log in with email and password, establishing a session
    ///
    /// The token endpoint takes form-urlencoded credentials with the field
    /// names `username`/`password`, even though the login identifier is an
    /// email address.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, Error> {
        let url = self.endpoint("/token/");

        let token = Fetch::post(&self.client, &url)
            .form(&[("username", email), ("password", password)])
            .execute::<TokenResponse>()
            .await?;

        let session = Session::new(token.access_token);

        // Persist first, then publish to the shared handle
        if let Err(err) = self.store.save(&session) {
            warn!("failed to persist session: {}", err);
        }
        let mut current_session = self.session.lock().unwrap();
        *current_session = Some(session.clone());

        Ok(session)
    }

    /// Get the profile of the currently authenticated user
    pub async fn get_user(&self) -> Result<UserProfile, Error> {
        let url = self.endpoint("/users/me/");
        let token = self.bearer()?;

        let user = Fetch::get(&self.client, &url)
            .bearer_auth(&token)
            .execute::<UserProfile>()
            .await?;

        Ok(user)
    }

    /// Load any persisted session from the store into memory. Called once at
    /// startup; no network round trip is made.
    pub fn restore_session(&self) -> Option<Session> {
        let restored = self.store.load();
        let mut current_session = self.session.lock().unwrap();
        *current_session = restored.clone();
        restored
    }

    /// Get the current session
    pub fn current_session(&self) -> Option<Session> {
        let current_session = self.session.lock().unwrap();
        current_session.clone()
    }

    /// Discard the session, in memory and on disk. The backend has no logout
    /// endpoint; a bearer token is abandoned, not revoked.
    pub fn sign_out(&self) {
        let mut current_session = self.session.lock().unwrap();
        *current_session = None;
        drop(current_session);

        if let Err(err) = self.store.clear() {
            warn!("failed to clear persisted session: {}", err);
        }
    }

    /// Shared handle to the in-memory session, for sibling clients
    pub(crate) fn session_handle(&self) -> Arc<Mutex<Option<Session>>> {
        self.session.clone()
    }

    fn bearer(&self) -> Result<String, Error> {
        let current_session = self.session.lock().unwrap();
        match *current_session {
            Some(ref session) => Ok(session.access_token.clone()),
            None => Err(Error::auth("Not logged in")),
        }
    }
}
