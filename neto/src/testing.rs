//! In-process mock backend for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

struct User {
    login: &'static str,
    password: &'static str,
    token: &'static str,
    id: &'static str,
    name: &'static str,
}

const USERS: &[User] = &[
    User {
        login: "alice",
        password: "pw",
        token: "abc",
        id: "1",
        name: "Alice",
    },
    User {
        login: "bob",
        password: "hunter2",
        token: "def",
        id: "2",
        name: "Bob",
    },
];

/// Canned error response for an endpoint.
#[derive(Debug, Clone)]
pub struct Failure {
    status: u16,
    message: Option<&'static str>,
}

impl Failure {
    /// Error with a `{"message": ...}` JSON body.
    pub const fn with_message(status: u16, message: &'static str) -> Self {
        Self {
            status,
            message: Some(message),
        }
    }

    /// Error with a non-JSON body.
    pub const fn plain(status: u16) -> Self {
        Self {
            status,
            message: None,
        }
    }

    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self.message {
            Some(message) => (status, Json(json!({ "message": message }))).into_response(),
            None => (status, "upstream exploded").into_response(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub profile: Option<Failure>,
    pub news: Option<Failure>,
    pub news_delay: Option<Duration>,
}

struct MockState {
    config: MockConfig,
    auth_calls: AtomicUsize,
    profile_calls: AtomicUsize,
    news_calls: AtomicUsize,
}

pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn spawn(config: MockConfig) -> Self {
        let state = Arc::new(MockState {
            config,
            auth_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
            news_calls: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/auth", post(auth))
            .route("/private/me", get(me))
            .route("/private/news", get(news))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn auth_calls(&self) -> usize {
        self.state.auth_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.state.profile_calls.load(Ordering::SeqCst)
    }

    pub fn news_calls(&self) -> usize {
        self.state.news_calls.load(Ordering::SeqCst)
    }
}

#[derive(Deserialize)]
struct AuthBody {
    login: String,
    password: String,
}

fn user_for(headers: &HeaderMap) -> Option<&'static User> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    USERS.iter().find(|u| u.token == token)
}

async fn auth(State(state): State<Arc<MockState>>, Json(body): Json<AuthBody>) -> Response {
    state.auth_calls.fetch_add(1, Ordering::SeqCst);
    USERS
        .iter()
        .find(|u| u.login == body.login && u.password == body.password)
        .map_or_else(
            || StatusCode::UNAUTHORIZED.into_response(),
            |u| Json(json!({ "token": u.token })).into_response(),
        )
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.profile_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(failure) = state.config.profile.clone() {
        return failure.into_response();
    }
    let Some(user) = user_for(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    Json(json!({
        "id": user.id,
        "login": user.login,
        "name": user.name,
        "avatar": format!("https://avatars.test/{}.png", user.login),
    }))
    .into_response()
}

async fn news(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.news_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(delay) = state.config.news_delay {
        tokio::time::sleep(delay).await;
    }
    if let Some(failure) = state.config.news.clone() {
        return failure.into_response();
    }
    if user_for(&headers).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([
        {"id": "n1", "title": "Launch", "image": "https://img.test/1.png", "content": "We are live"},
        {"id": "n2", "title": "Update", "image": "https://img.test/2.png", "content": "Now with news"},
    ]))
    .into_response()
}
