//! Input resolution: load the handout markup from a URL or a local file.
//!
//! HTTP(S) inputs are fetched with a single GET and no retries; anything
//! that is not a URL is treated as a path. Either way the body must decode as
//! UTF-8, otherwise the load fails with
//! [`Lab2LatexError::InvalidEncoding`].

use crate::error::Lab2LatexError;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Check if the input string looks like an HTTP(S) URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Load the full handout markup named by `input`.
///
/// # Errors
/// * Fetch errors: unreachable host, non-2xx status, timeout, missing or
///   unreadable file, unsupported URL scheme.
/// * [`Lab2LatexError::InvalidEncoding`] when the body is not UTF-8.
pub async fn fetch_html(input: &str, timeout_secs: u64) -> Result<String, Lab2LatexError> {
    let bytes = if is_url(input) {
        download_url(input, timeout_secs).await?
    } else if input.is_empty() || input.contains("://") {
        return Err(Lab2LatexError::InvalidInput {
            input: input.to_string(),
        });
    } else {
        read_local(input).await?
    };

    decode_html(input, bytes)
}

/// Decode a fetched body strictly as UTF-8.
pub fn decode_html(source_name: &str, bytes: Vec<u8>) -> Result<String, Lab2LatexError> {
    String::from_utf8(bytes).map_err(|e| Lab2LatexError::InvalidEncoding {
        source_name: source_name.to_string(),
        detail: e.utf8_error().to_string(),
    })
}

async fn read_local(path_str: &str) -> Result<Vec<u8>, Lab2LatexError> {
    let path = PathBuf::from(path_str);

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            debug!("Read local handout: {} ({} bytes)", path.display(), bytes.len());
            Ok(bytes)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Lab2LatexError::FileNotFound { path })
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(Lab2LatexError::PermissionDenied { path })
        }
        Err(source) => Err(Lab2LatexError::ReadFailed { path, source }),
    }
}

async fn download_url(url: &str, timeout_secs: u64) -> Result<Vec<u8>, Lab2LatexError> {
    info!("Fetching handout from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Lab2LatexError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let to_fetch_error = |e: reqwest::Error| {
        if e.is_timeout() {
            Lab2LatexError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            Lab2LatexError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    };

    let response = client.get(url).send().await.map_err(to_fetch_error)?;

    if !response.status().is_success() {
        return Err(Lab2LatexError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response.bytes().await.map_err(to_fetch_error)?;
    info!("Fetched {} bytes", bytes.len());
    Ok(bytes.to_vec())
}
