//! Signed-in user records
//!
//! Profile payloads are narrowed to named fields at the boundary; anything
//! else the API returns is dropped during deserialization.

use serde::{Deserialize, Deserializer, Serialize};

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account handle
    pub login: String,
    /// Numeric account id
    pub id: u64,
    /// Display name
    #[serde(default, deserialize_with = "blank_as_none")]
    pub name: Option<String>,
    /// Public email
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email: Option<String>,
    /// Avatar image
    #[serde(default, deserialize_with = "blank_as_none")]
    pub avatar_url: Option<String>,
    /// Profile page
    #[serde(default, deserialize_with = "blank_as_none")]
    pub html_url: Option<String>,
    /// Company
    #[serde(default, deserialize_with = "blank_as_none")]
    pub company: Option<String>,
    /// Location
    #[serde(default, deserialize_with = "blank_as_none")]
    pub location: Option<String>,
    /// Bio
    #[serde(default, deserialize_with = "blank_as_none")]
    pub bio: Option<String>,
    /// Twitter handle
    #[serde(default, deserialize_with = "blank_as_none")]
    pub twitter_username: Option<String>,
}

impl UserProfile {
    /// Profile with only the required fields
    pub fn new(login: impl Into<String>, id: u64) -> Self {
        Self {
            login: login.into(),
            id,
            name: None,
            email: None,
            avatar_url: None,
            html_url: None,
            company: None,
            location: None,
            bio: None,
            twitter_username: None,
        }
    }

    /// Name to show in the UI
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

/// A repository selected as project source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// Owning account
    pub owner: String,
    /// Repository name
    pub name: String,
    /// Branch to read from, when known
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// What the editor knows about the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    /// Signed-in user
    pub user: UserProfile,
    /// Selected repository
    pub repository: Option<RepositoryRef>,
}

impl AuthInfo {
    /// Signed-in user without a selected repository
    #[must_use]
    pub fn for_user(user: UserProfile) -> Self {
        Self {
            user,
            repository: None,
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
