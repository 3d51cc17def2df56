//! Login, registration and logout against the leads backend.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::Credentials;
use crate::domain::session::BackendSession;
use crate::infrastructure::api::{LeadsApi, RequestError};

/// Message shown when a guest login fails without a usable server message.
const GUEST_LOGIN_FAILED: &str = "Guest login failed";

/// Why an authentication attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Registration password and confirmation differ; no request was made.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The backend rejected the request or could not be reached.
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Service for the login and register views.
///
/// Every successful call returns the [`BackendSession`] the backend issued so
/// the caller can carry it on subsequent requests.
pub struct AuthService<A: LeadsApi> {
    api: Arc<A>,
}

impl<A: LeadsApi> AuthService<A> {
    /// Creates a new authentication service.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Authenticates with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Request`] carrying the server's message.
    pub async fn login(&self, credentials: &Credentials) -> Result<BackendSession, AuthError> {
        tracing::info!(email = %credentials.email, "Login attempt");
        Ok(self.api.login(credentials).await?)
    }

    /// Creates an account after checking the confirmation locally.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::PasswordMismatch`] without touching the network
    /// when `confirm_password` differs from the password, otherwise
    /// [`AuthError::Request`] on backend failure.
    pub async fn register(
        &self,
        credentials: &Credentials,
        confirm_password: &str,
    ) -> Result<BackendSession, AuthError> {
        if credentials.password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        tracing::info!(email = %credentials.email, "Registration attempt");
        Ok(self.api.register(credentials).await?)
    }

    /// Logs in with the fixed demo account.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`]; an empty server message is replaced with
    /// "Guest login failed".
    pub async fn guest_login(&self) -> Result<BackendSession, AuthError> {
        tracing::info!("Guest login");
        self.api
            .login(&Credentials::guest())
            .await
            .map_err(|mut err| {
                if err.message.is_empty() {
                    err.message = GUEST_LOGIN_FAILED.to_string();
                }
                AuthError::Request(err)
            })
    }

    /// Ends the backend session.
    ///
    /// Best effort: a failure is logged and otherwise ignored, the caller
    /// always proceeds to the login page.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!(error = %e, "Logout failed");
        }
    }
}
