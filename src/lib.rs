//! # lab2latex
//!
//! Turn an HTML lab handout into a LaTeX lab-report skeleton.
//!
//! Every heading that looks like `Problem 3 (10 pts)` or
//! `Bonus Problem 4 (5 pts)` becomes a section. The paragraph following it
//! becomes the section body: a numbered list when it asks several questions,
//! plain text otherwise. Everything else in the handout is ignored. The
//! result is a minimal `article` with a title page, ready to fill in.
//!
//! ## Pipeline Overview
//!
//! ```text
//! URL / path
//!  │
//!  ├─ 1. Input      fetch over HTTP(S) or read from disk, decode UTF-8
//!  ├─ 2. Preamble   documentclass, packages, title, author, date, title page
//!  ├─ 3. Transform  html5ever tokens → problem sections (escaped text)
//!  └─ 4. Output     ordered LaTeX fragments → .tex file or stream
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lab2latex::{convert_to_file, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .title("Lab 3: Sorting")
//!         .author("Ada Lovelace")
//!         .build()?;
//!     let output = convert_to_file("https://example.edu/cs101/lab3.html", "paper.tex", &config).await?;
//!     eprintln!("{} problems", output.stats.problems);
//!     Ok(())
//! }
//! ```
//!
//! Markup that is already in memory can be converted without I/O:
//!
//! ```rust
//! use lab2latex::{convert_html, ConversionConfig};
//!
//! let config = ConversionConfig::builder().title("Lab").author("Me").build().unwrap();
//! let out = convert_html("<h2>Problem 1 (10 pts)</h2><p>Why? How?</p>", &config);
//! assert!(out.latex.contains("\\item Why?"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `lab2latex` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_html, convert_sync, convert_to_file};
pub use error::{ErrorKind, Lab2LatexError};
pub use output::{ConversionOutput, ConversionStats, ProblemBody, ProblemSummary};
pub use pipeline::document::LatexDocument;
pub use pipeline::escape::escape;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
