//! Progress-callback trait for conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to be told
//! when the handout fetch starts and finishes and which problems were found.
//!
//! # Example
//!
//! ```rust
//! use lab2latex::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     problems: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_problem(&self, index: usize, title: &str) {
//!         self.problems.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("#{index}: {title}");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { problems: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the conversion pipeline at each stage boundary.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Implementations must be `Send + Sync` so a config can
/// be shared across tasks.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called before the handout is fetched or read.
    ///
    /// # Arguments
    /// * `source` - the URL or path being loaded
    fn on_fetch_start(&self, source: &str) {
        let _ = source;
    }

    /// Called once the handout has been loaded and decoded.
    ///
    /// # Arguments
    /// * `bytes` - size of the decoded markup
    fn on_fetch_complete(&self, bytes: usize) {
        let _ = bytes;
    }

    /// Called for every problem section, in document order.
    ///
    /// # Arguments
    /// * `index` - 1-indexed position of the problem
    /// * `title` - the header text that opened the section
    fn on_problem(&self, index: usize, title: &str) {
        let _ = (index, title);
    }

    /// Called once the LaTeX document is complete.
    fn on_conversion_complete(&self, problems: usize) {
        let _ = problems;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
