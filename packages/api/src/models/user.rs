use serde::{Deserialize, Serialize};

/// Profile of the signed-in user, as returned by the token exchange.
///
/// The backend derives this from the identity-provider token, which uses
/// `uid` for the subject id; both spellings are accepted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "uid")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl UserProfile {
    /// Display name, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Result of trading an identity-provider token for an application token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenExchange {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    pub user: UserProfile,
}

fn bearer() -> String {
    "bearer".to_string()
}
