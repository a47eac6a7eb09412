//! News feed state machine.
//!
//! The feed is driven by session changes instead of by rendering: a fetch
//! starts when a token appears, and is cancelled when the session goes away.
//!
//! ```text
//! Idle --(token present)--> Loading --> Loaded | Failed
//!   ^                                       |
//!   +------------(token cleared)------------+
//! ```

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{NewsItem, Session};

/// Where the feed currently is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FeedState {
    /// No fetch has been started for the current session.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The fetch finished.
    Loaded(Vec<NewsItem>),
    /// The fetch failed. Not retried.
    Failed(ApiError),
}

impl FeedState {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Permission to run one fetch for one session.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    token: String,
    generation: u64,
    cancel: CancellationToken,
}

impl FetchTicket {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fetch the news, giving up as soon as the ticket is cancelled.
    ///
    /// Returns `None` when cancelled.
    pub async fn run(&self, api: &ApiClient) -> Option<Result<Vec<NewsItem>, ApiError>> {
        tokio::select! {
            () = self.cancel.cancelled() => {
                debug!(generation = self.generation, "news fetch cancelled");
                None
            }
            result = api.fetch_news(&self.token) => Some(result),
        }
    }
}

/// News widget state, tied to the lifetime of a session.
#[derive(Debug, Default)]
pub struct NewsFeed {
    state: FeedState,
    token: Option<String>,
    generation: u64,
    cancel: Option<CancellationToken>,
}

impl NewsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> &FeedState {
        &self.state
    }

    /// React to the current session.
    ///
    /// Returns a ticket when a fetch must start: the token has just appeared
    /// or changed. The same token never yields a second ticket.
    pub fn on_session(&mut self, session: &Session) -> Option<FetchTicket> {
        match session.token() {
            None => {
                if self.token.take().is_some() {
                    debug!(generation = self.generation, "session ended, resetting feed");
                    self.teardown();
                }
                None
            }
            Some(token) if self.token.as_deref() == Some(token) => None,
            Some(token) => {
                self.teardown();
                let cancel = CancellationToken::new();
                self.token = Some(token.to_string());
                self.cancel = Some(cancel.clone());
                self.state = FeedState::Loading;
                debug!(generation = self.generation, "session established, loading feed");
                Some(FetchTicket {
                    token: token.to_string(),
                    generation: self.generation,
                    cancel,
                })
            }
        }
    }

    /// Apply the outcome of a ticket.
    ///
    /// Returns `false` when the ticket no longer belongs to the current
    /// session; its result is dropped.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<Vec<NewsItem>, ApiError>) -> bool {
        if ticket.generation != self.generation || ticket.is_cancelled() {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale news result"
            );
            return false;
        }
        self.cancel = None;
        self.state = match result {
            Ok(items) => FeedState::Loaded(items),
            Err(e) => FeedState::Failed(e),
        };
        true
    }

    fn teardown(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        self.generation += 1;
        self.state = FeedState::Idle;
    }
}
