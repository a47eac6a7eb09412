//! Application runtime: user actions in, notices and pages out.
//!
//! Backend calls triggered by a session change run as spawned tasks that
//! report back through an inbox channel, so the caller stays responsive
//! while the feed loads.

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{ApiError, SessionError, StoreError};
use crate::feed::{FeedState, FetchTicket, NewsFeed};
use crate::models::NewsItem;
use crate::session::SessionContext;
use crate::store::KeyValueStore;
use crate::view::{self, Page};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Login form submitted.
    Login { username: String, password: String },
    /// Logout control clicked.
    Logout,
    /// Nothing changed; re-evaluate the views.
    Render,
}

/// Message that must be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&ApiError> for Notice {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<&SessionError> for Notice {
    fn from(err: &SessionError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<&StoreError> for Notice {
    fn from(err: &StoreError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Result of a spawned news fetch.
#[derive(Debug)]
pub struct FeedEvent {
    ticket: FetchTicket,
    result: Option<Result<Vec<NewsItem>, ApiError>>,
}

/// Owns the session context and the feed, and keeps them in step.
pub struct App<S> {
    ctx: SessionContext<S>,
    feed: NewsFeed,
    inbox_tx: mpsc::UnboundedSender<FeedEvent>,
    inbox_rx: mpsc::UnboundedReceiver<FeedEvent>,
    in_flight: usize,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(ctx: SessionContext<S>) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            ctx,
            feed: NewsFeed::new(),
            inbox_tx,
            inbox_rx,
            in_flight: 0,
        }
    }

    pub const fn context(&self) -> &SessionContext<S> {
        &self.ctx
    }

    pub const fn feed(&self) -> &FeedState {
        self.feed.state()
    }

    /// Number of spawned fetches that have not reported back yet.
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Current screen.
    pub fn page(&self) -> Page {
        view::page(&self.ctx.session(), self.feed.state())
    }

    /// Handle one user action.
    ///
    /// Failures are returned as notices; a failed login does not roll back
    /// what the session context already applied.
    pub async fn dispatch(&mut self, action: Action) -> Vec<Notice> {
        let mut notices = Vec::new();
        match action {
            Action::Login { username, password } => {
                if let Err(e) = self.ctx.login(&username, &password).await {
                    warn!(error = %e, %username, "login failed");
                    notices.push(Notice::from(&e));
                }
            }
            Action::Logout => {
                if let Err(e) = self.ctx.logout() {
                    notices.push(Notice::from(&e));
                }
            }
            Action::Render => {}
        }
        self.sync_feed();
        notices
    }

    /// Start a news fetch if the session calls for one.
    fn sync_feed(&mut self) {
        let Some(ticket) = self.feed.on_session(&self.ctx.session()) else {
            return;
        };
        let api = self.ctx.api().clone();
        let tx = self.inbox_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = ticket.run(&api).await;
            let _ = tx.send(FeedEvent { ticket, result });
        });
    }

    /// Wait for the next fetch to report back. `None` if nothing is in flight.
    pub async fn next_event(&mut self) -> Option<FeedEvent> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.inbox_rx.recv().await?;
        self.in_flight -= 1;
        Some(event)
    }

    /// Fold a fetch result into the feed. Stale and cancelled results are dropped.
    pub fn apply(&mut self, event: FeedEvent) -> Option<Notice> {
        let FeedEvent { ticket, result } = event;
        let Some(result) = result else {
            debug!("dropping cancelled news fetch");
            return None;
        };
        let notice = result.as_ref().err().map(Notice::from);
        if self.feed.complete(&ticket, result) {
            notice
        } else {
            None
        }
    }

    /// Wait until every spawned fetch has reported back.
    pub async fn settle(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Some(event) = self.next_event().await {
            notices.extend(self.apply(event));
        }
        notices
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::ApiClient;
    use crate::store::{MemoryStore, SessionStore};
    use crate::testing::{Failure, MockBackend, MockConfig};
    use crate::view::{Content, Header};

    fn app(backend: &MockBackend, store: &MemoryStore) -> App<MemoryStore> {
        let ctx = SessionContext::restore(
            ApiClient::new(&backend.base_url),
            SessionStore::new(store.clone()),
        )
        .unwrap();
        App::new(ctx)
    }

    fn login(username: &str, password: &str) -> Action {
        Action::Login {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn anonymous_start() {
        let backend = MockBackend::spawn(MockConfig::default()).await;
        let mut app = app(&backend, &MemoryStore::new());

        assert!(app.dispatch(Action::Render).await.is_empty());
        assert_eq!(app.in_flight(), 0);

        let page = app.page();
        assert_eq!(page.header, Header::LoginForm);
        assert_eq!(page.content, Content::Anonymous);
        assert_eq!(backend.news_calls(), 0);
    }

    #[tokio::test]
    async fn login_loads_news_once() {
        let backend = MockBackend::spawn(MockConfig::default()).await;
        let mut app = app(&backend, &MemoryStore::new());

        assert!(app.dispatch(login("alice", "pw")).await.is_empty());
        assert_eq!(app.page().content, Content::Loading);
        assert!(app.settle().await.is_empty());

        for _ in 0..3 {
            app.dispatch(Action::Render).await;
        }
        assert!(app.settle().await.is_empty());

        assert_eq!(backend.news_calls(), 1);
        match app.page().content {
            Content::News(items) => assert_eq!(items.len(), 2),
            other => panic!("expected news, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn restored_session_loads_news_on_first_render() {
        let backend = MockBackend::spawn(MockConfig::default()).await;
        let store = MemoryStore::new();
        let mut first = app(&backend, &store);
        first.dispatch(login("alice", "pw")).await;
        first.settle().await;

        let mut second = app(&backend, &store);
        second.dispatch(Action::Render).await;
        second.settle().await;

        assert_eq!(backend.news_calls(), 2);
        assert!(matches!(second.page().content, Content::News(_)));
    }

    #[tokio::test]
    async fn bad_credentials_produce_notice() {
        let backend = MockBackend::spawn(MockConfig::default()).await;
        let mut app = app(&backend, &MemoryStore::new());

        let notices = app.dispatch(login("alice", "wrong")).await;

        assert_eq!(
            notices,
            vec![Notice {
                message: "Unauthorized".to_string()
            }]
        );
        assert_eq!(app.page().header, Header::LoginForm);
        assert_eq!(app.in_flight(), 0);
        assert_eq!(backend.auth_calls(), 1);
        assert_eq!(backend.profile_calls(), 0);
    }

    #[tokio::test]
    async fn feed_failure_is_reported_once() {
        let backend = MockBackend::spawn(MockConfig {
            news: Some(Failure::with_message(503, "feed is down")),
            ..MockConfig::default()
        })
        .await;
        let mut app = app(&backend, &MemoryStore::new());

        app.dispatch(login("alice", "pw")).await;
        let notices = app.settle().await;
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "feed is down");

        app.dispatch(Action::Render).await;
        assert!(app.settle().await.is_empty());
        assert_eq!(backend.news_calls(), 1);
        assert_eq!(
            app.page().content,
            Content::Failed("feed is down".to_string())
        );
    }

    #[tokio::test]
    async fn logout_cancels_pending_fetch() {
        let backend = MockBackend::spawn(MockConfig {
            news_delay: Some(Duration::from_millis(300)),
            ..MockConfig::default()
        })
        .await;
        let store = MemoryStore::new();
        let mut app = app(&backend, &store);

        app.dispatch(login("alice", "pw")).await;
        assert_eq!(app.in_flight(), 1);
        app.dispatch(Action::Logout).await;

        assert!(app.settle().await.is_empty());
        assert_eq!(app.feed(), &FeedState::Idle);
        assert_eq!(app.page().content, Content::Anonymous);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn switching_users_reloads_feed() {
        let backend = MockBackend::spawn(MockConfig::default()).await;
        let mut app = app(&backend, &MemoryStore::new());

        app.dispatch(login("alice", "pw")).await;
        app.settle().await;
        app.dispatch(Action::Logout).await;
        app.dispatch(login("bob", "hunter2")).await;
        app.settle().await;

        assert_eq!(backend.news_calls(), 2);
        assert!(matches!(
            app.page().header,
            Header::ProfileWidget { name: Some(ref n), .. } if n == "Bob"
        ));
    }
}
