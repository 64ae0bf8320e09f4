//! Authentication context for the signed-in user.
//!
//! The context is an explicit value: created when the user signs in (the
//! access token plus the stored profile) and handed by reference to the
//! wizard session and the submission handler. Signing out consumes it.
//!
//! # Example
//!
//! ```ignore
//! let auth = AuthContext::sign_in("token-abc", profile)?;
//! let session = WizardSession::start(&auth);
//! handler.handle(&mut session, &auth).await?;
//! auth.sign_out();
//! ```

use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use super::ValidationError;
use crate::domain::profile::UserProfile;

/// Signed-in user: bearer token and profile.
#[derive(Debug, Clone)]
pub struct AuthContext {
    access_token: Secret<String>,
    profile: UserProfile,
}

impl AuthContext {
    /// Creates the context on sign-in. The token must not be blank.
    pub fn sign_in(
        access_token: impl Into<String>,
        profile: UserProfile,
    ) -> Result<Self, ValidationError> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(ValidationError::empty_field("access_token"));
        }
        Ok(Self {
            access_token: Secret::new(access_token),
            profile,
        })
    }

    /// The stored profile of the signed-in user.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Value for the `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.access_token.expose_secret())
    }

    /// Tears the context down. The token is zeroed on drop.
    pub fn sign_out(self) {
        tracing::debug!("Auth context torn down");
    }
}

/// Authentication failures reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token was rejected (missing, malformed or expired).
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The authentication service could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken)
    }
}
