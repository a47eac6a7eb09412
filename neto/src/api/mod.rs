//! HTTP client for the social network backend.

mod client;

pub use client::{ApiClient, DEFAULT_BASE_URL};
