//! Streaming HTTP downloads.

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::io::Write;

use crate::error::TcError;

/// Thin wrapper over a reqwest Client for single-shot artifact downloads.
///
/// Failures are reported once; nothing is retried.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Streams `url` into the writer returned by `create_writer`.
    ///
    /// The writer is only created once the server has answered with a
    /// success status. `on_progress` receives the bytes received so far and
    /// the declared total size, if any: once with zero bytes before the body
    /// is read, then after every chunk.
    #[tracing::instrument(skip(self, create_writer, on_progress))]
    pub async fn download_file<W, F, P>(
        &self,
        url: &str,
        create_writer: F,
        mut on_progress: P,
    ) -> Result<u64>
    where
        W: Write,
        F: FnOnce() -> Result<W>,
        P: FnMut(u64, Option<u64>),
    {
        debug!("Downloading file from {}...", url);

        let network_error = |message: String| TcError::Network {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(network_error(format!("HTTP status {}", status)).into());
        }

        let mut response = response;
        let total_size = response.content_length();
        let mut writer = create_writer()?;
        let mut downloaded_bytes: u64 = 0;
        on_progress(downloaded_bytes, total_size);

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| network_error(e.to_string()))?
        {
            writer
                .write_all(&chunk)
                .context("Failed to write chunk to file")?;
            downloaded_bytes += chunk.len() as u64;
            on_progress(downloaded_bytes, total_size);
        }
        writer.flush().context("Failed to flush downloaded file")?;

        debug!(
            "Downloaded {:.2} MB",
            downloaded_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(downloaded_bytes)
    }
}
