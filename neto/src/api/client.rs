//! Backend calls: authenticate, fetch profile, fetch news.

use reqwest::header::ACCEPT;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::models::{NewsItem, Profile};

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:7070";

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

/// Error body sent by the backend on non-401 failures.
#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

/// Thin client over the three backend endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /auth`. Returns the bearer token.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let url = self.url("/auth");
        debug!(%url, username, "authenticating");

        let resp = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&AuthRequest {
                login: username,
                password,
            })
            .send()
            .await?;

        let body: AuthResponse = read_json(resp).await?;
        Ok(body.token)
    }

    /// `GET /private/me`.
    pub async fn fetch_profile(&self, token: &str) -> Result<Profile, ApiError> {
        self.get_private("/private/me", token).await
    }

    /// `GET /private/news`. Order is preserved as sent by the backend.
    pub async fn fetch_news(&self, token: &str) -> Result<Vec<NewsItem>, ApiError> {
        self.get_private("/private/news", token).await
    }

    async fn get_private<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "fetching");

        let resp = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(token)
            .send()
            .await?;

        read_json(resp).await
    }
}

/// Turn a response into the expected body or a normalized [`ApiError`].
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();

    if status == StatusCode::UNAUTHORIZED {
        let text = status.canonical_reason().unwrap_or("Unauthorized");
        return Err(ApiError::Unauthorized(text.to_string()));
    }

    if !status.is_success() {
        let message = match resp.json::<ErrorMessage>().await {
            Ok(body) => body.message,
            Err(_) => format!("Request failed with status {}", status.as_u16()),
        };
        debug!(status = status.as_u16(), %message, "request failed");
        return Err(ApiError::RequestFailed(message));
    }

    resp.json::<T>()
        .await
        .map_err(|e| ApiError::RequestFailed(format!("Failed to parse response: {e}")))
}
