//! check-auth and sign-in actors

use crate::error::ActorError;
use crate::event::ActorOutput;
use chrono::Utc;
use vocedit_auth::{AuthConfig, Redirect, Session, UserApi};

/// Validate the persisted session and resolve the user
///
/// # Errors
/// Profile lookup failures, after the token has been evicted.
pub async fn check_auth(session: &Session, api: &dyn UserApi) -> Result<ActorOutput, ActorError> {
    let check = vocedit_auth::check_auth(session, api, Utc::now()).await?;
    Ok(ActorOutput::AuthChecked(check))
}

/// Send the user agent to the authorization endpoint
///
/// # Errors
/// Failures before the redirect happens.
pub fn sign_in(
    config: &AuthConfig,
    session: &Session,
    redirect: &dyn Redirect,
) -> Result<ActorOutput, ActorError> {
    vocedit_auth::sign_in(config, session, redirect)?;
    Ok(ActorOutput::SignInStarted)
}
