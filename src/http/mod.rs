//! HTTP client module
//!
//! Provides the HTTP client used to query the transactions endpoint.
//!
//! # Features
//!
//! - **Bounded Retries**: Any transport error or non-2xx status is retried
//!   a fixed number of times with a constant delay
//! - **Static Token Auth**: A token attached under a fixed header name
//! - **Per-Request Timeout**: No run-level deadline

mod auth;
mod client;

pub use auth::{TokenAuth, DEFAULT_TOKEN_HEADER};
pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
