//! Result types returned by the conversion entry points.

use serde::{Deserialize, Serialize};

/// Everything produced by one conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The complete LaTeX source (`fragments` concatenated in order).
    pub latex: String,
    /// The ordered fragment sequence the document was assembled from.
    pub fragments: Vec<String>,
    /// One entry per recognised problem header, in source order.
    pub problems: Vec<ProblemSummary>,
    pub stats: ConversionStats,
}

/// A problem header found in the handout and what was emitted for its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSummary {
    /// Header text as it appeared in the handout (unescaped).
    pub title: String,
    pub body: ProblemBody,
}

/// What a problem's first paragraph turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum ProblemBody {
    /// No paragraph closed the section before the next header or end of input.
    Missing,
    /// The paragraph held only whitespace; the section is empty.
    Empty,
    /// A single piece, emitted as plain text.
    Text,
    /// Several question pieces, emitted as a numbered list.
    Questions(usize),
}

/// Counters collected while converting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Size of the decoded handout markup in bytes.
    pub html_bytes: usize,
    /// Number of LaTeX fragments in the output document.
    pub fragments: usize,
    /// Number of problem sections opened.
    pub problems: usize,
    /// Paragraphs discarded because they did not follow a problem header.
    pub skipped_paragraphs: usize,
    /// Recoverable markup errors reported by the tokenizer.
    pub parse_diagnostics: usize,
    /// Time spent obtaining the handout (0 when converting in-memory markup).
    pub fetch_duration_ms: u64,
    pub total_duration_ms: u64,
}
