//! Authentication check
//!
//! Reads the session token, evicts it when expired or rejected, and
//! resolves the current user profile.

use crate::error::AuthError;
use crate::profile::{AuthInfo, UserProfile};
use crate::session::Session;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Profile lookup for an access token
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch the profile the token belongs to
    async fn current_user(&self, access_token: &str) -> Result<UserProfile, AuthError>;
}

/// Outcome of an authentication check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCheck {
    /// Whether a live token resolved to a profile
    pub is_authenticated: bool,
    /// Profile and repository details when signed in
    pub info: Option<AuthInfo>,
}

impl AuthCheck {
    /// Signed out
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self {
            is_authenticated: false,
            info: None,
        }
    }

    /// Signed in as `info.user`
    #[must_use]
    pub fn authenticated(info: AuthInfo) -> Self {
        Self {
            is_authenticated: true,
            info: Some(info),
        }
    }
}

/// Check the persisted session at `now`
///
/// A token without an expiry is not trusted. Expired tokens are evicted.
///
/// # Errors
/// Profile lookup failures are returned after the token has been evicted;
/// callers treat them as signed out.
pub async fn check_auth(
    session: &Session,
    api: &dyn UserApi,
    now: DateTime<Utc>,
) -> Result<AuthCheck, AuthError> {
    let Some(token) = session.token() else {
        return Ok(AuthCheck::unauthenticated());
    };
    if token.expires_at.is_none() {
        return Ok(AuthCheck::unauthenticated());
    }
    if token.is_expired_at(now) {
        tracing::info!("Session token expired");
        evict(session);
        return Ok(AuthCheck::unauthenticated());
    }

    match api.current_user(&token.access_token).await {
        Ok(user) => {
            tracing::info!(login = %user.login, "Authenticated");
            Ok(AuthCheck::authenticated(AuthInfo::for_user(user)))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Error checking authentication");
            evict(session);
            Err(e)
        }
    }
}

fn evict(session: &Session) {
    if let Err(e) = session.evict() {
        tracing::warn!(error = %e, "Failed to evict session token");
    }
}
