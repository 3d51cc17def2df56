//! Login and registration payload.

use serde::Serialize;

/// Email and password sent to `/auth/login` and `/auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub const GUEST_EMAIL: &'static str = "test@gmail.com";
    pub const GUEST_PASSWORD: &'static str = "Test@123";

    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Fixed demo account used by the "Explore App as Guest" shortcut.
    pub fn guest() -> Self {
        Self::new(Self::GUEST_EMAIL, Self::GUEST_PASSWORD)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
