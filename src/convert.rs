//! Conversion entry points.
//!
//! [`convert_html`] is the pure core: markup in, LaTeX out, no I/O and no
//! failure modes. [`convert`] and [`convert_to_file`] wrap it with the
//! fetch and write stages.

use crate::config::ConversionConfig;
use crate::error::Lab2LatexError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::document::LatexDocument;
use crate::pipeline::{input, transform, write};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Convert an HTML handout (URL or local path) to a LaTeX report skeleton.
///
/// # Errors
/// Returns `Err(Lab2LatexError)` when the handout cannot be fetched or read,
/// or is not valid UTF-8.
pub async fn convert(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Lab2LatexError> {
    let total_start = Instant::now();
    let input_str = input_str.as_ref();
    info!("Starting conversion: {}", input_str);

    // ── Step 1: Fetch handout ────────────────────────────────────────────
    if let Some(ref cb) = config.progress_callback {
        cb.on_fetch_start(input_str);
    }
    let fetch_start = Instant::now();
    let html = input::fetch_html(input_str, config.download_timeout_secs).await?;
    let fetch_duration_ms = fetch_start.elapsed().as_millis() as u64;
    if let Some(ref cb) = config.progress_callback {
        cb.on_fetch_complete(html.len());
    }

    // ── Step 2: Transform ────────────────────────────────────────────────
    let mut output = convert_html(&html, config);
    output.stats.fetch_duration_ms = fetch_duration_ms;
    output.stats.total_duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "Conversion complete: {} problems, {} fragments, {}ms total",
        output.stats.problems, output.stats.fragments, output.stats.total_duration_ms
    );

    Ok(output)
}

/// Convert a handout and write the LaTeX source to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn convert_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Lab2LatexError> {
    let output = convert(input_str, config).await?;
    write::write_output(&output.fragments, output_path.as_ref()).await?;
    Ok(output)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Lab2LatexError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Lab2LatexError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input_str, config))
}

/// Convert already-loaded handout markup to LaTeX.
///
/// The document is assembled in a fixed order: preamble, title metadata,
/// title page, one section per problem found in `html`, `\end{document}`.
pub fn convert_html(html: &str, config: &ConversionConfig) -> ConversionOutput {
    let start = Instant::now();
    let mut doc = LatexDocument::new();

    doc.begin_preamble(&config.document_class);
    doc.use_packages();
    doc.title_format();
    doc.title(&config.title);
    doc.author(&config.author);
    doc.date(config.date.as_deref());
    doc.begin_document();
    doc.title_page();

    let report = transform::transform_html(html, &mut doc);

    doc.end_document();

    if let Some(ref cb) = config.progress_callback {
        for (i, problem) in report.problems.iter().enumerate() {
            cb.on_problem(i + 1, &problem.title);
        }
        cb.on_conversion_complete(report.problems.len());
    }

    let latex = doc.render();
    let fragments = doc.into_fragments();
    let stats = ConversionStats {
        html_bytes: html.len(),
        fragments: fragments.len(),
        problems: report.problems.len(),
        skipped_paragraphs: report.skipped_paragraphs,
        parse_diagnostics: report.parse_diagnostics,
        fetch_duration_ms: 0,
        total_duration_ms: start.elapsed().as_millis() as u64,
    };

    ConversionOutput {
        latex,
        fragments,
        problems: report.problems,
        stats,
    }
}
