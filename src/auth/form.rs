//! Login/registration form state machine
//!
//! Mirrors the auth view: one set of fields shared between the login and
//! register modes, a single inline error line, and a pending flag that keeps
//! resubmission disabled while a request is in flight.

use super::{Auth, RegisterRequest, Role};
use crate::error::Error;

/// Message shown after a successful registration
pub const REGISTERED_NOTICE: &str = "Registration successful. Please log in.";

const AUTH_FAILED: &str = "Authentication failed";
const NETWORK_ERROR: &str = "Network error or server unavailable";

/// Which view the form is presenting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// What a `submit` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A session was established; run the conversation bootstrap next
    LoggedIn,
    /// The account was created; the form switched back to login
    Registered,
    /// The backend rejected the request; see [`AuthForm::error`]
    Rejected,
    /// A submit was already pending, nothing was done
    Ignored,
}

/// Transient state of the auth form. Never persisted; discarded on every
/// mode toggle and after successful registration.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    /// Current mode
    pub mode: AuthMode,

    /// Email address (sent as `username` on login)
    pub email: String,

    /// Password
    pub password: String,

    /// Requested role, registration only
    pub role: Option<Role>,

    /// Doctor's full name, required when registering a doctor
    pub doctor_name: String,

    /// Doctor's specialty, required when registering a doctor
    pub doctor_specialty: String,

    /// Inline error from the last rejected submit
    pub error: Option<String>,

    /// Informational message, set after successful registration
    pub notice: Option<String>,

    pending: bool,
}

impl AuthForm {
    /// Create a form in login mode with default fields
    pub fn new() -> Self {
        Self::default()
    }

    /// The role field as submitted; defaults to patient
    pub fn effective_role(&self) -> Role {
        self.role.unwrap_or(Role::Patient)
    }

    /// Whether a submit is currently in flight
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Flip between login and register, resetting every other field to its
    /// default, including any error or notice.
    pub fn toggle_mode(&mut self) {
        let mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        *self = Self {
            mode,
            ..Self::default()
        };
    }

    /// Submit the form, issuing exactly one HTTP request
    ///
    /// A call while another submit is pending is ignored. On success the
    /// fields are cleared; registration additionally flips the form back to
    /// login mode and leaves a notice telling the user to log in. A rejected
    /// submit surfaces the backend's `detail` (or a generic message) in
    /// [`AuthForm::error`] and leaves the session untouched.
    pub async fn submit(&mut self, auth: &Auth) -> SubmitOutcome {
        if self.pending {
            return SubmitOutcome::Ignored;
        }
        self.pending = true;
        self.error = None;
        self.notice = None;

        let outcome = match self.mode {
            AuthMode::Register => self.submit_register(auth).await,
            AuthMode::Login => self.submit_login(auth).await,
        };

        self.pending = false;
        outcome
    }

    async fn submit_register(&mut self, auth: &Auth) -> SubmitOutcome {
        let request = match self.effective_role() {
            Role::Doctor => RegisterRequest::doctor(
                self.email.clone(),
                self.password.clone(),
                self.doctor_name.clone(),
                self.doctor_specialty.clone(),
            ),
            Role::Patient => RegisterRequest::patient(self.email.clone(), self.password.clone()),
        };

        match auth.register(&request).await {
            Ok(_) => {
                // No session is created by registration; send the user back
                // to the login view with fresh fields.
                *self = Self {
                    mode: AuthMode::Login,
                    notice: Some(REGISTERED_NOTICE.to_string()),
                    ..Self::default()
                };
                SubmitOutcome::Registered
            }
            Err(err) => {
                self.error = Some(failure_message(&err));
                SubmitOutcome::Rejected
            }
        }
    }

    async fn submit_login(&mut self, auth: &Auth) -> SubmitOutcome {
        match auth.login(&self.email, &self.password).await {
            Ok(_) => {
                *self = Self::default();
                SubmitOutcome::LoggedIn
            }
            Err(err) => {
                self.error = Some(failure_message(&err));
                SubmitOutcome::Rejected
            }
        }
    }
}

fn failure_message(err: &Error) -> String {
    match err {
        Error::Api { detail, .. } if !detail.is_empty() => detail.clone(),
        Error::Http(_) => NETWORK_ERROR.to_string(),
        _ => AUTH_FAILED.to_string(),
    }
}
