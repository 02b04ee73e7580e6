//! Session token ownership
//!
//! One `Session` exists per editor process. It is created at start-up,
//! read by the auth check, written by sign-in and cleared on logout or
//! expiry. When opened from a path every mutation is written through.

use crate::error::AuthError;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Access token with its expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Bearer token
    pub access_token: String,
    /// Expiry; tokens without one are not trusted
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionToken {
    /// Token expiring at `expires_at`
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Whether the token is past its expiry at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    token: Option<SessionToken>,
    code_verifier: Option<String>,
}

/// Persisted session state
#[derive(Debug, Default)]
pub struct Session {
    data: RwLock<SessionData>,
    path: Option<PathBuf>,
}

impl Session {
    /// Session that lives only as long as the process
    #[inline]
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Session persisted at `path`, loading existing state if present
    ///
    /// # Errors
    /// - `AuthError::Storage` if the file exists but cannot be read
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref().to_path_buf();
        let data = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| AuthError::Storage(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionData::default(),
            Err(e) => return Err(AuthError::Storage(format!("{}: {e}", path.display()))),
        };
        Ok(Self {
            data: RwLock::new(data),
            path: Some(path),
        })
    }

    /// Current token, if any
    #[must_use]
    pub fn token(&self) -> Option<SessionToken> {
        self.data.read().token.clone()
    }

    /// Store a freshly issued token
    ///
    /// # Errors
    /// - `AuthError::Storage` if persisting fails
    pub fn store_token(&self, token: SessionToken) -> Result<(), AuthError> {
        self.update(|data| data.token = Some(token))
    }

    /// Forget the token
    ///
    /// # Errors
    /// - `AuthError::Storage` if persisting fails
    pub fn evict(&self) -> Result<(), AuthError> {
        tracing::debug!("Evicting session token");
        self.update(|data| data.token = None)
    }

    /// Remember the PKCE verifier for the return trip
    ///
    /// # Errors
    /// - `AuthError::Storage` if persisting fails
    pub fn set_code_verifier(&self, verifier: impl Into<String>) -> Result<(), AuthError> {
        let verifier = verifier.into();
        self.update(|data| data.code_verifier = Some(verifier))
    }

    /// Consume the PKCE verifier
    ///
    /// # Errors
    /// - `AuthError::Storage` if persisting fails
    pub fn take_code_verifier(&self) -> Result<Option<String>, AuthError> {
        let mut taken = None;
        self.update(|data| taken = data.code_verifier.take())?;
        Ok(taken)
    }

    fn update(&self, mutate: impl FnOnce(&mut SessionData)) -> Result<(), AuthError> {
        let mut data = self.data.write();
        mutate(&mut data);
        if let Some(path) = &self.path {
            let text = serde_json::to_string_pretty(&*data)
                .map_err(|e| AuthError::Storage(e.to_string()))?;
            std::fs::write(path, text)
                .map_err(|e| AuthError::Storage(format!("{}: {e}", path.display())))?;
        }
        Ok(())
    }
}
