//! Session context: current token and profile, kept in sync with the store.

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::{SessionError, StoreError};
use crate::models::{Profile, Session};
use crate::store::{KeyValueStore, SessionStore};

/// Holder of the current [`Session`], passed explicitly to the views.
///
/// Every change is mirrored to the [`SessionStore`] and published to
/// subscribers. Concurrent logins are not serialized.
pub struct SessionContext<S> {
    api: ApiClient,
    store: SessionStore<S>,
    state: watch::Sender<Session>,
}

impl<S: KeyValueStore> SessionContext<S> {
    /// Build the context from whatever the store holds.
    pub fn restore(api: ApiClient, store: SessionStore<S>) -> Result<Self, StoreError> {
        let session = store.load()?;
        info!(
            authenticated = session.is_authenticated(),
            complete = session.is_complete(),
            "session restored"
        );
        let (state, _) = watch::channel(session);
        Ok(Self { api, store, state })
    }

    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    pub fn profile(&self) -> Option<Profile> {
        self.state.borrow().profile().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Observe session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Authenticate, then fetch the profile.
    ///
    /// Each step is applied to memory and the store as soon as it succeeds.
    /// On failure the state left by the completed steps is kept; a rejected
    /// authentication leaves the previous session untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<Profile, SessionError> {
        let token = self.api.authenticate(username, password).await?;
        self.state.send_modify(|s| s.set_token(token.clone()));
        self.store.save_token(&token)?;
        info!(username, "authenticated");

        let profile = self.api.fetch_profile(&token).await?;
        self.state.send_modify(|s| s.set_profile(profile.clone()));
        self.store.save_profile(&profile)?;
        info!(login = %profile.login, "profile loaded");

        Ok(profile)
    }

    /// Forget the session in memory and in the store. No backend call.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.state.send_modify(Session::clear);
        let cleared = self.store.clear();
        if let Err(ref e) = cleared {
            warn!(error = %e, "failed to clear stored session");
        }
        info!("logged out");
        cleared
    }
}
