use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("TENDER_BINARY_PATH not found: {}", .0.display())]
    OverrideNotFound(PathBuf),

    #[error("Unsupported platform for tender: platform={os} arch={arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("Unable to read package metadata at {}: {message}", .path.display())]
    Metadata { path: PathBuf, message: String },

    #[error("Unable to determine a cache directory: {0}")]
    CacheRoot(String),

    #[error("Unable to download tender binary for {platform}/{arch} ({version}). Tried: {url} Original error: {source}")]
    Provision {
        platform: String,
        arch: String,
        version: String,
        url: String,
        #[source]
        source: ProvisionCause,
    },

    #[error("Failed to start {}: {source}", .path.display())]
    Startup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tender terminated by signal {signal}")]
    Terminated { signal: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What went wrong while installing a downloaded artifact into the cache.
#[derive(Error, Debug)]
pub enum ProvisionCause {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("empty response body")]
    EmptyBody,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LauncherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provision_message_carries_full_context() {
        let err = LauncherError::Provision {
            platform: "linux".to_string(),
            arch: "amd64".to_string(),
            version: "1.2.3".to_string(),
            url: "https://example.test/v1.2.3/tender_1.2.3_linux_amd64".to_string(),
            source: FetchError::Status {
                status: 404,
                reason: "Not Found".to_string(),
            }
            .into(),
        };

        assert_eq!(
            err.to_string(),
            "Unable to download tender binary for linux/amd64 (1.2.3). \
             Tried: https://example.test/v1.2.3/tender_1.2.3_linux_amd64 \
             Original error: HTTP 404 Not Found"
        );
    }

    #[test]
    fn test_override_message_names_path() {
        let err = LauncherError::OverrideNotFound(PathBuf::from("/nope/tender"));
        assert_eq!(err.to_string(), "TENDER_BINARY_PATH not found: /nope/tender");
    }
}
