//! PKCE sign-in
//!
//! Sign-in generates a verifier, stores it in the session and hands the
//! authorization URL to a `Redirect` sink. Completing the flow happens
//! outside this process when the authorization server calls back.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::session::Session;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use url::Url;

/// Where the user agent is sent to authorize
#[cfg_attr(test, mockall::automock)]
pub trait Redirect: Send + Sync {
    /// Navigate the user agent to `url`
    fn redirect(&self, url: &Url) -> Result<(), AuthError>;
}

/// A prepared authorization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRequest {
    /// Hex secret kept in the session for the token exchange
    pub code_verifier: String,
    /// S256 digest of the verifier, base64url without padding
    pub code_challenge: String,
}

impl SignInRequest {
    /// Fresh request with a random verifier
    #[must_use]
    pub fn generate() -> Self {
        Self::from_verifier(generate_code_verifier())
    }

    /// Request for a known verifier
    #[must_use]
    pub fn from_verifier(code_verifier: String) -> Self {
        let code_challenge = code_challenge(&code_verifier);
        Self {
            code_verifier,
            code_challenge,
        }
    }

    /// Authorization endpoint URL carrying this request
    ///
    /// # Errors
    /// - `AuthError::InvalidUrl` if the configured endpoint does not parse
    pub fn authorization_url(&self, config: &AuthConfig) -> Result<Url, AuthError> {
        let mut url = Url::parse(&config.authorize_url).map_err(|e| AuthError::InvalidUrl {
            url: config.authorize_url.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("client_id", &config.client_id)
            .append_pair("redirect_uri", &config.redirect_uri)
            .append_pair("scope", &config.scope)
            .append_pair("code_challenge", &self.code_challenge)
            .append_pair("code_challenge_method", "S256");
        Ok(url)
    }
}

/// 32 random bytes, hex encoded
#[must_use]
pub fn generate_code_verifier() -> String {
    hex::encode(rand::random::<[u8; 32]>())
}

/// Unpadded base64url of the verifier's SHA-256
#[must_use]
pub fn code_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

/// Start a sign-in
///
/// # Errors
/// Fails if the verifier cannot be stored, the endpoint is invalid or the
/// redirect sink refuses.
pub fn sign_in(
    config: &AuthConfig,
    session: &Session,
    redirect: &dyn Redirect,
) -> Result<SignInRequest, AuthError> {
    let request = SignInRequest::generate();
    session.set_code_verifier(request.code_verifier.clone())?;
    let url = request.authorization_url(config)?;
    tracing::info!(endpoint = %config.authorize_url, "Redirecting to sign in");
    redirect.redirect(&url)?;
    Ok(request)
}
