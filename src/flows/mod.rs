//! Auth orchestration over the API client and session store.
//!
//! These flows are what the platform's forms do, minus any UI: validate
//! input, call the API, and decide what to persist. Validation failures are
//! reported per field and never reach the network. Server and transport
//! failures come back as a displayable message; nothing here panics or
//! propagates raw errors to callers.

use anyhow::Result;
use tracing::debug;

use crate::api::{ApiClient, ApiOutcome};
use crate::api::types::{Ack, UserProfile};
use crate::session::{Session, SessionStore};
use crate::validate::{self, PasswordReport};

/// A validation failure tied to one input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Outcome of a flow.
///
/// `Invalid` is produced before any network call; `Failed` carries a
/// server-reported or normalized transport message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome<T> {
    Success(T),
    Invalid(Vec<FieldError>),
    Failed { message: String },
}

impl<T> FlowOutcome<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    fn from_api(outcome: ApiOutcome<T>) -> Self {
        match outcome {
            ApiOutcome::Success(value) => Self::Success(value),
            ApiOutcome::Failure { message } => Self::Failed { message },
        }
    }
}

/// Login, registration, password reset and logout flows.
///
/// Owns the only mutable state in the client (the session store); the API
/// client itself stays stateless.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    api: ApiClient,
    store: SessionStore,
}

impl AuthFlow {
    #[must_use]
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Logs in and persists the session. A failed call leaves any previously
    /// stored session untouched.
    pub async fn login(&self, email: &str, password: &str) -> FlowOutcome<Session> {
        let email = email.trim();

        let mut errors = Vec::new();
        if email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        }
        if password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        if !errors.is_empty() {
            return FlowOutcome::Invalid(errors);
        }

        match self.api.login(email, password).await {
            ApiOutcome::Success(payload) => {
                if let Err(err) = self.store.save(&payload.access_token, &payload.user) {
                    debug!("failed to persist session: {err:#}");
                    return FlowOutcome::failed("Failed to persist session");
                }
                FlowOutcome::Success(Session {
                    token: payload.access_token,
                    user: payload.user,
                })
            }
            ApiOutcome::Failure { message } => FlowOutcome::Failed { message },
        }
    }

    /// Registers a new account. Password policy and confirmation are checked
    /// locally first; the server remains authoritative.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> FlowOutcome<Ack> {
        let email = email.trim();

        let mut errors = Vec::new();
        if email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !validate::is_valid_email(email) {
            errors.push(FieldError::new("email", "Email is not valid"));
        }
        if password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        } else if let Some(message) = PasswordReport::evaluate(password).first_unmet() {
            errors.push(FieldError::new("password", message));
        }
        if password != confirm {
            errors.push(FieldError::new("confirm_password", "Passwords do not match"));
        }
        if !errors.is_empty() {
            return FlowOutcome::Invalid(errors);
        }

        FlowOutcome::from_api(self.api.register(email, password).await)
    }

    /// Step one of the reset: request an OTP and remember which email it was
    /// sent to, so the confirm step can resend it.
    pub async fn request_password_reset(&self, email: &str) -> FlowOutcome<Ack> {
        let email = email.trim();

        if email.is_empty() {
            return FlowOutcome::Invalid(vec![FieldError::new("email", "Email is required")]);
        }

        match self.api.request_password_reset(email).await {
            ApiOutcome::Success(ack) => {
                if let Err(err) = self.store.set_pending_reset(email) {
                    debug!("failed to record pending reset: {err:#}");
                    return FlowOutcome::failed("Failed to record pending reset");
                }
                FlowOutcome::Success(ack)
            }
            ApiOutcome::Failure { message } => FlowOutcome::Failed { message },
        }
    }

    /// Step two of the reset. Requires a pending request; the OTP is
    /// sanitized to digits before checking. On success the pending email is
    /// consumed.
    pub async fn confirm_password_reset(
        &self,
        otp: &str,
        new_password: &str,
        confirm: &str,
    ) -> FlowOutcome<Ack> {
        let Some(email) = self.store.pending_reset() else {
            return FlowOutcome::failed("No pending password reset");
        };

        let otp = validate::sanitize_otp(otp);

        let mut errors = Vec::new();
        if !validate::is_valid_otp(&otp) {
            errors.push(FieldError::new("otp", "OTP must be 6 digits"));
        }
        if new_password.is_empty() {
            errors.push(FieldError::new("new_password", "New password is required"));
        } else if let Some(message) = PasswordReport::evaluate(new_password).first_unmet() {
            errors.push(FieldError::new("new_password", message));
        }
        if new_password != confirm {
            errors.push(FieldError::new("confirm_password", "Passwords do not match"));
        }
        if !errors.is_empty() {
            return FlowOutcome::Invalid(errors);
        }

        match self.api.reset_password(&email, &otp, new_password).await {
            ApiOutcome::Success(ack) => {
                if let Err(err) = self.store.clear_pending_reset() {
                    debug!("failed to clear pending reset: {err:#}");
                }
                FlowOutcome::Success(ack)
            }
            ApiOutcome::Failure { message } => FlowOutcome::Failed { message },
        }
    }

    /// Abandons a pending reset without contacting the server.
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn cancel_password_reset(&self) -> Result<()> {
        self.store.clear_pending_reset()
    }

    /// Fetches the profile for the stored session. When the server rejects
    /// the token the local session is cleared, forcing a fresh login.
    pub async fn current_user(&self) -> FlowOutcome<UserProfile> {
        let Some(session) = self.store.load() else {
            return FlowOutcome::failed("Not logged in");
        };

        match self.api.current_user(&session.token).await {
            ApiOutcome::Success(user) => FlowOutcome::Success(user),
            ApiOutcome::Failure { message } => {
                if let Err(err) = self.store.clear() {
                    debug!("failed to clear rejected session: {err:#}");
                }
                FlowOutcome::Failed { message }
            }
        }
    }

    /// Clears the local session first, then notifies the server with the old
    /// token. The server call is best-effort and its result is ignored.
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub async fn logout(&self) -> Result<()> {
        let session = self.store.load();
        self.store.clear()?;

        if let Some(session) = session {
            if let ApiOutcome::Failure { message } = self.api.logout(&session.token).await {
                debug!("logout call failed (ignored): {message}");
            }
        }

        Ok(())
    }
}
