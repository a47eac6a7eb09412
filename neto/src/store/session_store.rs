//! Persistence of the token/profile pair.

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::{Profile, Session};

use super::KeyValueStore;

/// Key holding the raw token string.
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON-serialized profile.
pub const PROFILE_KEY: &str = "profile";

/// Reads and writes the session through a [`KeyValueStore`].
///
/// Token and profile are written separately with no transaction between
/// them; a token without a profile is a valid (incomplete) session.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Restore the persisted session.
    ///
    /// A missing, unreadable or unparseable profile is treated as absent.
    pub fn load(&self) -> Result<Session, StoreError> {
        let token = self.backend.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let profile = match self.backend.get(PROFILE_KEY) {
            Ok(raw) => raw.and_then(|raw| {
                serde_json::from_str::<Profile>(&raw)
                    .map_err(|e| warn!(error = %e, "ignoring corrupt stored profile"))
                    .ok()
            }),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable stored profile");
                None
            }
        };

        if token.is_none() && profile.is_some() {
            debug!("stored profile has no token, ignoring it");
        }

        Ok(Session::from_parts(token, profile))
    }

    /// Persist a new token.
    ///
    /// A stored profile belongs to the previous token and is removed.
    pub fn save_token(&self, token: &str) -> Result<(), StoreError> {
        self.backend.set(TOKEN_KEY, token)?;
        self.backend.remove(PROFILE_KEY)
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let json = serde_json::to_string(profile)?;
        self.backend.set(PROFILE_KEY, &json)
    }

    /// Remove both the token and the profile.
    ///
    /// Both removals are attempted; the first failure is returned.
    pub fn clear(&self) -> Result<(), StoreError> {
        let token = self.backend.remove(TOKEN_KEY);
        let profile = self.backend.remove(PROFILE_KEY);
        token.and(profile)
    }
}
