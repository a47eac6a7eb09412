//! Session model: the authentication token and the profile fetched with it.

use super::Profile;

/// Current authentication state.
///
/// A profile is only ever present together with a token. A token without a
/// profile means the login has not finished (or the profile write was lost).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    profile: Option<Profile>,
}

impl Session {
    /// An anonymous session.
    pub const fn empty() -> Self {
        Self {
            token: None,
            profile: None,
        }
    }

    /// Build a session from possibly inconsistent parts.
    ///
    /// A profile without a token is dropped.
    pub fn from_parts(token: Option<String>, profile: Option<Profile>) -> Self {
        let profile = if token.is_some() { profile } else { None };
        Self { token, profile }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub const fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Whether both the token and the profile are known.
    pub const fn is_complete(&self) -> bool {
        self.token.is_some() && self.profile.is_some()
    }

    /// Replace the token. Any profile belongs to the previous token and is dropped.
    pub(crate) fn set_token(&mut self, token: String) {
        self.token = Some(token);
        self.profile = None;
    }

    /// Attach a profile. Ignored on an anonymous session.
    pub(crate) fn set_profile(&mut self, profile: Profile) {
        if self.token.is_some() {
            self.profile = Some(profile);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.token = None;
        self.profile = None;
    }
}
