//! Login and register form state.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──ok──▶ Idle (navigate to /)
//!   ▲                  │
//!   └──submit── Error ◀┘ err
//! ```

use crate::application::services::AuthError;

/// State of an authentication form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthFormState {
    #[default]
    Idle,
    Submitting,
    Error(String),
}

/// Returned when a submit arrives while another one is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadySubmitting;

/// Where the form goes after a finished submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Navigate to the given route.
    Redirect(&'static str),
    /// Stay on the form and show the message.
    ShowError(String),
}

/// Route the auth views send the user to after success.
pub const DASHBOARD_ROUTE: &str = "/";

/// Form state machine shared by the login and register views.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    state: AuthFormState,
}

impl AuthForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AuthFormState {
        &self.state
    }

    /// True while a submission is in flight; the submit controls are disabled.
    pub fn is_submitting(&self) -> bool {
        self.state == AuthFormState::Submitting
    }

    /// Message to show next to the form, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            AuthFormState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Starts a submission, clearing any previous error.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadySubmitting`] if a submission is already in flight.
    pub fn begin_submit(&mut self) -> Result<(), AlreadySubmitting> {
        if self.is_submitting() {
            return Err(AlreadySubmitting);
        }
        self.state = AuthFormState::Submitting;
        Ok(())
    }

    /// Records a failure detected before any request was sent.
    pub fn reject(&mut self, error: &AuthError) -> AuthOutcome {
        let message = error.to_string();
        self.state = AuthFormState::Error(message.clone());
        AuthOutcome::ShowError(message)
    }

    /// Finishes the in-flight submission.
    pub fn finish<T>(&mut self, result: &Result<T, AuthError>) -> AuthOutcome {
        match result {
            Ok(_) => {
                self.state = AuthFormState::Idle;
                AuthOutcome::Redirect(DASHBOARD_ROUTE)
            }
            Err(error) => self.reject(error),
        }
    }
}
