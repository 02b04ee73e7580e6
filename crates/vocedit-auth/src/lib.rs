//! VocEdit Auth - who is signed in
//!
//! Owns the persisted session token and everything that reads or writes it:
//! - `Session`: token, expiry and PKCE verifier, optionally persisted as JSON
//! - `check_auth`: token validation and profile lookup
//! - `sign_in`: PKCE authorization request handed to a `Redirect` sink
//! - `GitHubClient`: the profile API
//!
//! Failures here are never fatal to the editor; callers treat them as
//! "signed out".

#![warn(unreachable_pub)]

pub mod check;
pub mod config;
pub mod error;
pub mod github;
pub mod profile;
pub mod session;
pub mod sign_in;

pub use check::{check_auth, AuthCheck, UserApi};
pub use config::AuthConfig;
pub use error::AuthError;
pub use github::GitHubClient;
pub use profile::{AuthInfo, RepositoryRef, UserProfile};
pub use session::{Session, SessionToken};
pub use sign_in::{sign_in, Redirect, SignInRequest};
