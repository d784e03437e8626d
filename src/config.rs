//! Configuration types for HTML-to-LaTeX conversion.
//!
//! Everything that varies between two runs over the same handout (report
//! metadata, document class, network timeout, progress reporting) lives in
//! [`ConversionConfig`], built via its [`ConversionConfigBuilder`].

use crate::error::Lab2LatexError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Configuration for one handout conversion.
///
/// # Example
/// ```rust
/// use lab2latex::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .title("Lab 3: Sorting")
///     .author("Ada Lovelace")
///     .build()
///     .unwrap();
/// assert_eq!(config.document_class, "article");
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Report title, escaped into `\title{}`.
    pub title: String,

    /// Report author, escaped into `\author{}`.
    pub author: String,

    /// Explicit report date. `None` emits `\today`. Default: None.
    pub date: Option<String>,

    /// LaTeX document class. Default: "article".
    pub document_class: String,

    /// Timeout for fetching the handout over HTTP(S), in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Optional progress callback for fetch and conversion events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            date: None,
            document_class: "article".to_string(),
            download_timeout_secs: 120,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("title", &self.title)
            .field("author", &self.author)
            .field("date", &self.date)
            .field("document_class", &self.document_class)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.config.author = author.into();
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.config.date = Some(date.into());
        self
    }

    pub fn document_class(mut self, class: impl Into<String>) -> Self {
        self.config.document_class = class.into();
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Lab2LatexError> {
        let c = &self.config;
        if c.document_class.is_empty()
            || !c
                .document_class
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
        {
            return Err(Lab2LatexError::InvalidConfig(format!(
                "Document class must be a non-empty name of letters, digits or '-', got {:?}",
                c.document_class
            )));
        }
        if c.download_timeout_secs == 0 {
            return Err(Lab2LatexError::InvalidConfig(
                "Download timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}
