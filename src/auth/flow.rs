// src/auth/flow.rs
//! Signup / login / logout flows and the auth form state behind them.
//!
//! Login is a trust-on-email lookup: the user list is fetched and the first
//! record with an identical email becomes the session. Signup creates the user
//! and signs the returned record in.

use tracing::{info, warn};

use super::models::{CreateUserRequest, LoginRequest, User};
use super::session::{SessionError, SessionStore};
use super::validators::{LoginValidator, SignupValidator};
use crate::common::{safe_email_log, ClientContext, Validator};
use crate::gateway::{Gateway, GatewayError, Scope};

pub const SIGNUP_REJECTED_MESSAGE: &str = "Email already exists or invalid data";
pub const UNKNOWN_EMAIL_MESSAGE: &str = "No account found with this email. Please sign up first.";
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Could not connect to server";
pub const UNREACHABLE_MESSAGE: &str = "Could not connect to server. Make sure backend is running.";

/// Failures of an auth flow. `Display` is the message shown on the form.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("{}", .0.as_deref().unwrap_or(SIGNUP_REJECTED_MESSAGE))]
    Rejected(Option<String>),
    #[error("{}", UNKNOWN_EMAIL_MESSAGE)]
    UnknownEmail,
    #[error("{}", SERVICE_UNAVAILABLE_MESSAGE)]
    ServiceUnavailable(#[source] GatewayError),
    #[error("{}", UNREACHABLE_MESSAGE)]
    Unreachable(#[source] GatewayError),
    #[error("Could not save session: {0}")]
    Session(#[from] SessionError),
}

/// Creates the user and starts a session for the record the service returns.
pub async fn signup<G: Gateway, S: SessionStore>(
    ctx: &ClientContext<G, S>,
    request: &CreateUserRequest,
) -> Result<User, AuthError> {
    let request = CreateUserRequest {
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
    };

    let validation = SignupValidator.validate(&request);
    if !validation.is_valid {
        return Err(AuthError::Validation(validation.summary()));
    }

    info!(email = %safe_email_log(&request.email), "Signing up");

    let user: User = ctx
        .gateway
        .create::<User>(&request)
        .await
        .map_err(|e| match e {
            GatewayError::Status { detail, .. } => AuthError::Rejected(detail),
            other => {
                warn!(error = %other, "Signup request failed");
                AuthError::Unreachable(other)
            }
        })?;

    ctx.session.sign_in(&user)?;
    Ok(user)
}

/// Finds the user whose email matches exactly and starts a session for it.
pub async fn login<G: Gateway, S: SessionStore>(
    ctx: &ClientContext<G, S>,
    request: &LoginRequest,
) -> Result<User, AuthError> {
    let email = request.email.trim().to_string();

    let validation = LoginValidator.validate(&LoginRequest {
        email: email.clone(),
    });
    if !validation.is_valid {
        return Err(AuthError::Validation(validation.summary()));
    }

    info!(email = %safe_email_log(&email), "Logging in");

    let users = ctx.gateway.list::<User>(Scope::All).await.map_err(|e| {
        warn!(error = %e, "User lookup failed");
        match e {
            GatewayError::Status { .. } => AuthError::ServiceUnavailable(e),
            other => AuthError::Unreachable(other),
        }
    })?;

    let user = users
        .into_iter()
        .find(|u| u.email == email)
        .ok_or(AuthError::UnknownEmail)?;

    ctx.session.sign_in(&user)?;
    Ok(user)
}

/// Ends the session. Remote data is untouched.
pub fn logout<G, S: SessionStore>(ctx: &ClientContext<G, S>) -> Result<(), SessionError> {
    ctx.session.sign_out()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Signup,
    Login,
}

/// Signup/login form state. `error` is the dismissable inline message.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub error: Option<String>,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            mode: AuthMode::Signup,
            name: String::new(),
            email: String::new(),
            error: None,
        }
    }
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Signup => AuthMode::Login,
            AuthMode::Login => AuthMode::Signup,
        };
        self.error = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Runs signup or login depending on the mode. Clears the previous error
    /// first; on failure the new message is stored on the form.
    pub async fn submit<G: Gateway, S: SessionStore>(
        &mut self,
        ctx: &ClientContext<G, S>,
    ) -> Option<User> {
        self.error = None;

        let outcome = match self.mode {
            AuthMode::Signup => {
                signup(
                    ctx,
                    &CreateUserRequest {
                        name: self.name.clone(),
                        email: self.email.clone(),
                    },
                )
                .await
            }
            AuthMode::Login => {
                login(
                    ctx,
                    &LoginRequest {
                        email: self.email.clone(),
                    },
                )
                .await
            }
        };

        match outcome {
            Ok(user) => Some(user),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}
