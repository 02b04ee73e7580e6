//! GitHub REST client for profile lookups

use crate::check::UserApi;
use crate::error::AuthError;
use crate::profile::UserProfile;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("vocedit/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// Profile API backed by `GET {api_base_url}/user`
#[derive(Debug, Clone)]
pub struct GitHubClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl GitHubClient {
    /// Create a client for the given API base
    ///
    /// # Errors
    /// - `AuthError::InvalidUrl` if `api_base_url` does not parse
    /// - `AuthError::Request` if the HTTP client cannot be built
    pub fn new(api_base_url: &str) -> Result<Self, AuthError> {
        let mut base_url = Url::parse(api_base_url).map_err(|e| AuthError::InvalidUrl {
            url: api_base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    fn user_url(&self) -> Result<Url, AuthError> {
        self.base_url.join("user").map_err(|e| AuthError::InvalidUrl {
            url: self.base_url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl UserApi for GitHubClient {
    async fn current_user(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        let url = self.user_url()?;
        tracing::debug!(%url, "Fetching user profile");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<UserProfile>()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))
    }
}
