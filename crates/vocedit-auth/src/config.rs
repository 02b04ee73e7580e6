//! Sign-in endpoint configuration

use serde::{Deserialize, Serialize};

/// OAuth application and API endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// OAuth application client id
    pub client_id: String,
    /// Callback the authorization server returns to
    pub redirect_uri: String,
    /// Authorization endpoint
    pub authorize_url: String,
    /// REST API base for profile lookups
    pub api_base_url: String,
    /// Requested scopes, space separated
    pub scope: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_id: "Iv23liLBJLbc4eJCCmiI".to_string(),
            redirect_uri: "http://localhost:5173/github/auth/callback".to_string(),
            authorize_url: "https://github.com/login/oauth/authorize".to_string(),
            api_base_url: "https://api.github.com".to_string(),
            scope: "read:user user:email".to_string(),
        }
    }
}
