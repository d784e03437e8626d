//! Error types for the lab2latex library.
//!
//! Every failure is fatal for the conversion: nothing is retried and no
//! partial document is produced. [`Lab2LatexError::kind`] groups the variants
//! into the categories callers usually branch on:
//!
//! * **Fetch**: the handout could not be obtained (bad URL, network, missing file).
//! * **Parse**: the handout was obtained but could not be decoded as text.
//! * **Write**: the LaTeX output could not be persisted.
//!
//! The escaping, document-building and markup-transform stages are total and
//! never produce an error.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the lab2latex library.
#[derive(Debug, Error)]
pub enum Lab2LatexError {
    // ── Fetch errors ──────────────────────────────────────────────────────
    /// The input string is neither an HTTP(S) URL nor a usable file path.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// Local handout file was not found.
    #[error("HTML file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the handout file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Reading the local handout failed for another I/O reason.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The URL was syntactically valid but the download failed
    /// (DNS, TLS, connection refused, non-2xx status).
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Parse errors ──────────────────────────────────────────────────────
    /// The handout body is not valid UTF-8 text.
    #[error("Could not decode '{source_name}' as UTF-8: {detail}")]
    InvalidEncoding { source_name: String, detail: String },

    // ── Write errors ──────────────────────────────────────────────────────
    /// Could not create or write the output LaTeX file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse category of a [`Lab2LatexError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Parse,
    Write,
    Config,
    Internal,
}

impl Lab2LatexError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Lab2LatexError::InvalidInput { .. }
            | Lab2LatexError::FileNotFound { .. }
            | Lab2LatexError::PermissionDenied { .. }
            | Lab2LatexError::ReadFailed { .. }
            | Lab2LatexError::DownloadFailed { .. }
            | Lab2LatexError::DownloadTimeout { .. } => ErrorKind::Fetch,
            Lab2LatexError::InvalidEncoding { .. } => ErrorKind::Parse,
            Lab2LatexError::OutputWriteFailed { .. } => ErrorKind::Write,
            Lab2LatexError::InvalidConfig(_) => ErrorKind::Config,
            Lab2LatexError::Internal(_) => ErrorKind::Internal,
        }
    }
}
