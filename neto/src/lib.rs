//! Neto Social - client for the Neto social network.
//!
//! Architecture:
//! - `store` persists the token/profile pair in client-local key/value storage
//! - `api` talks to the backend (`/auth`, `/private/me`, `/private/news`)
//! - `session` holds the current session and mirrors it to the store
//! - `feed` loads the news once per session, cancelled on logout
//! - `view` derives what to show from session and feed state
//! - `app` runs user actions against all of the above

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod view;

#[cfg(test)]
mod testing;

pub use api::ApiClient;
pub use app::{Action, App, Notice};
pub use error::{ApiError, SessionError, StoreError};
pub use models::{NewsItem, Profile, Session};
pub use session::SessionContext;
