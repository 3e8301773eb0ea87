//! Single-attempt HTTP downloads.

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::io::Write;

use super::status::{FetchError, classify_status};

/// Thin wrapper over a reqwest [`Client`] that streams responses to a writer.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Downloads `url` into the writer produced by `create_writer`.
    ///
    /// The writer is only created once a 200 response has arrived, so a 404
    /// or transport failure never touches the destination. There is exactly
    /// one attempt.
    #[tracing::instrument(skip(self, create_writer))]
    pub async fn download_file<W, F>(&self, url: &str, create_writer: F) -> Result<u64, FetchError>
    where
        W: Write,
        F: FnOnce() -> Result<W>,
    {
        debug!("Downloading file from {}...", url);

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(&e))?;

        classify_status(response.status())?;

        let mut writer = create_writer().map_err(FetchError::Write)?;
        let mut downloaded_bytes: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::transport(&e))?
        {
            writer
                .write_all(&chunk)
                .context("Failed to write chunk to file")
                .map_err(FetchError::Write)?;
            downloaded_bytes += chunk.len() as u64;
        }

        writer
            .flush()
            .context("Failed to flush downloaded file")
            .map_err(FetchError::Write)?;

        debug!(
            "Downloaded {:.2} MB",
            downloaded_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(downloaded_bytes)
    }
}
