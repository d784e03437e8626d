//! Tests for the `lab2latex` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn bin_path() -> Option<PathBuf> {
    option_env!("CARGO_BIN_EXE_lab2latex").map(PathBuf::from)
}

/// Skip the test when the binary was not built (`--no-default-features`).
macro_rules! bin_or_skip {
    () => {{
        match bin_path() {
            Some(p) => p,
            None => {
                println!("SKIP: lab2latex binary not built");
                return;
            }
        }
    }};
}

fn run(bin: &Path, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .env_remove("LAB2LATEX_AUTHOR")
        .env_remove("LAB2LATEX_TITLE")
        .env_remove("RUST_LOG")
        .output()
        .expect("run lab2latex")
}

fn handout(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("lab.html");
    std::fs::write(
        &path,
        "<h2>Problem 1 (10 pts)</h2><p>What is 2+2? What is 3+3?</p><h2>Notes</h2><p>Ignore me.</p>",
    )
    .unwrap();
    path
}

#[test]
fn writes_tex_file() {
    let bin = bin_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let input = handout(&dir);
    let out_path = dir.path().join("paper.tex");

    let output = run(
        &bin,
        &[
            "-a",
            "Ada Lovelace",
            "-t",
            "Lab 1",
            "--url",
            input.to_str().unwrap(),
            "-f",
            out_path.to_str().unwrap(),
            "--no-progress",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let tex = std::fs::read_to_string(&out_path).unwrap();
    assert!(tex.starts_with("\\documentclass{article}\n"));
    assert!(tex.contains("\\author{Ada Lovelace}"));
    assert!(tex.contains("\\item What is 3+3?"));
    assert!(!tex.contains("Ignore me"));
    assert!(tex.ends_with("\\end{document}"));
}

#[test]
fn dash_filename_writes_to_stdout() {
    let bin = bin_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let input = handout(&dir);

    let output = run(
        &bin,
        &["-a", "A", "-t", "T", "--url", input.to_str().unwrap(), "-f", "-"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\\begin{section}\n{Problem 1 (10 pts)}"));
    assert!(stdout.ends_with("\\end{document}"));
}

#[test]
fn missing_handout_exits_non_zero() {
    let bin = bin_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("paper.tex");

    let output = run(
        &bin,
        &[
            "-a",
            "A",
            "-t",
            "T",
            "--url",
            "/no/such/lab.html",
            "-f",
            out_path.to_str().unwrap(),
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
    assert!(!out_path.exists());
}

#[test]
fn author_is_required() {
    let bin = bin_or_skip!();
    let output = run(&bin, &["-t", "T", "--url", "lab.html"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--author"));
}
