//! HTTP transport for release downloads.

mod client;
mod status;

pub use client::HttpClient;
pub use status::{FetchError, classify_status};
