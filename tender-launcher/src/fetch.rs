use futures_util::StreamExt;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use std::fs::File;
use std::future::Future;
use std::io::Write;
use std::time::Duration;

use crate::error::FetchError;

const USER_AGENT: &str = concat!("tender-launcher/", env!("CARGO_PKG_VERSION"));

/// Downloads a release artifact into an already-open file.
///
/// Implementations stream the body rather than buffering it, and report the
/// number of bytes written. Cleaning up `dest` on failure is the caller's job.
pub trait ArtifactFetcher {
    fn download(
        &self,
        url: &str,
        dest: &mut File,
    ) -> impl Future<Output = Result<u64, FetchError>> + Send;
}

/// Fetches artifacts over HTTP(S) with a single attempt and no retries.
///
/// The client is only built when a download actually happens, so runs served
/// by an override, a local install or the cache never touch TLS setup.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    connect_timeout: Duration,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
        }
    }

    fn client(&self) -> Result<Client, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(self.connect_timeout)
            .build()?;
        Ok(client)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactFetcher for HttpFetcher {
    async fn download(&self, url: &str, dest: &mut File) -> Result<u64, FetchError> {
        tracing::info!("Downloading {}", url);

        let response = self
            .client()?
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/octet-stream"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            dest.write_all(&chunk)?;
            written += chunk.len() as u64;
        }

        if written == 0 {
            return Err(FetchError::EmptyBody);
        }

        dest.flush()?;
        dest.sync_all()?;

        tracing::debug!("Downloaded {} bytes from {}", written, url);
        Ok(written)
    }
}

/// Build `<base>/v<version>/<asset>`
pub fn release_url(base: &str, version: &str, asset: &str) -> String {
    format!("{}/v{version}/{asset}", base.trim_end_matches('/'))
}
