//! Profile of the logged-in user.

use serde::{Deserialize, Serialize};

/// Snapshot of the user returned by `GET /private/me`.
///
/// Fetched once per login and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Backend user identifier.
    pub id: String,
    /// Login name used to authenticate.
    pub login: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    #[serde(rename = "avatar", alias = "avatarUrl")]
    pub avatar_url: String,
}
