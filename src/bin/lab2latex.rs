//! CLI binary for lab2latex.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and writes the resulting `.tex` file.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use lab2latex::pipeline::write::write_fragments;
use lab2latex::{
    convert, convert_to_file, ConversionConfig, ConversionOutput, ConversionProgressCallback,
    ProgressCallback,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal spinner shown while the handout is fetched, followed by one
/// log line per problem found.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_fetch_start(&self, source: &str) {
        self.bar.set_prefix("Fetching");
        self.bar.set_message(source.to_string());
    }

    fn on_fetch_complete(&self, bytes: usize) {
        self.bar.set_prefix("Converting");
        self.bar.set_message(format!("{bytes} bytes of HTML"));
    }

    fn on_problem(&self, index: usize, title: &str) {
        self.bar
            .println(format!("  {} {:>2}. {}", green("✓"), index, title.trim()));
    }

    fn on_conversion_complete(&self, problems: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} problem sections found",
            if problems == 0 { cyan("⚠") } else { green("✔") },
            bold(&problems.to_string())
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a handout to paper.tex
  lab2latex -a "Ada Lovelace" -t "Lab 3: Sorting" --url https://example.edu/cs101/lab3.html

  # Choose the output file
  lab2latex -a "Ada Lovelace" -t "Lab 3" --url https://example.edu/lab3.html -f lab3.tex

  # Print to stdout instead of a file
  lab2latex -a "Ada Lovelace" -t "Lab 3" --url lab3.html -f -

  # Print a JSON summary of the problems found
  lab2latex -a "Ada Lovelace" -t "Lab 3" --url lab3.html --json

RECOGNISED HEADINGS:
  Any <h1>..<h6> containing "Problem <n> (<pts> pts)", optionally prefixed
  with "Bonus ", case-insensitive. The paragraph after the heading becomes
  the section body; several questions become an enumerate list.

ENVIRONMENT VARIABLES:
  LAB2LATEX_AUTHOR        Default for --author
  LAB2LATEX_TITLE         Default for --title
  RUST_LOG                Override log filtering (e.g. lab2latex=debug)
"#;

/// Convert an HTML lab handout into a LaTeX lab-report skeleton.
#[derive(Parser, Debug)]
#[command(
    name = "lab2latex",
    version,
    about = "A script to convert a lab HTML document into LaTeX",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// The author of this lab report (you).
    #[arg(short, long, env = "LAB2LATEX_AUTHOR")]
    author: String,

    /// The title of this document.
    #[arg(short, long, env = "LAB2LATEX_TITLE")]
    title: String,

    /// The file to output to ("-" for stdout).
    #[arg(short, long, default_value = "paper.tex")]
    filename: PathBuf,

    /// The URL of the lab handout (a local HTML path also works).
    #[arg(long)]
    url: String,

    /// Report date. Defaults to \today.
    #[arg(long)]
    date: Option<String>,

    /// LaTeX document class.
    #[arg(long, default_value = "article")]
    document_class: String,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "LAB2LATEX_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Print a JSON summary (problems and stats) to stdout.
    #[arg(long)]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn writes_to_stdout(&self) -> bool {
        self.filename == Path::new("-")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner gives all the feedback that matters, so library logs are
    // reduced to errors while it is active.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.writes_to_stdout();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let output = if cli.writes_to_stdout() {
        let output = convert(&cli.url, &config)
            .await
            .context("Conversion failed")?;
        let stdout = io::stdout();
        write_fragments(&output.fragments, &mut stdout.lock())
            .context("Failed to write to stdout")?;
        output
    } else {
        convert_to_file(&cli.url, &cli.filename, &config)
            .await
            .context("Conversion failed")?
    };

    if cli.json {
        print_json_summary(&output)?;
    } else if !cli.quiet && !cli.writes_to_stdout() {
        eprintln!(
            "{}  {} problems  {}ms  →  {}",
            green("✔"),
            output.stats.problems,
            output.stats.total_duration_ms,
            bold(&cli.filename.display().to_string()),
        );
        if output.stats.skipped_paragraphs > 0 {
            eprintln!(
                "   {}",
                dim(&format!(
                    "{} paragraphs outside problem sections skipped",
                    output.stats.skipped_paragraphs
                )),
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .title(&cli.title)
        .author(&cli.author)
        .document_class(&cli.document_class)
        .download_timeout_secs(cli.download_timeout);

    if let Some(ref date) = cli.date {
        builder = builder.date(date);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Print problems and stats without the (potentially large) LaTeX body.
fn print_json_summary(output: &ConversionOutput) -> Result<()> {
    let summary = serde_json::json!({
        "problems": output.problems,
        "stats": output.stats,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
    );
    Ok(())
}
