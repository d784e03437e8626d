//! Output sinks: persist the ordered fragment sequence.
//!
//! Fragments are written back to back with no separators. File output is
//! atomic (temp file + rename) so an interrupted run never leaves a
//! half-written `.tex` behind.

use crate::error::Lab2LatexError;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write `fragments` to the file at `path`, creating parent directories.
pub async fn write_output(fragments: &[String], path: &Path) -> Result<(), Lab2LatexError> {
    let write_failed = |source: std::io::Error| Lab2LatexError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(write_failed)?;
    }

    let tmp_path = path.with_extension("tex.tmp");
    tokio::fs::write(&tmp_path, fragments.concat())
        .await
        .map_err(write_failed)?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(write_failed)?;

    info!("Wrote {} fragments to {}", fragments.len(), path.display());
    Ok(())
}

/// Write `fragments` to an arbitrary stream (stdout, a buffer, a socket).
pub fn write_fragments<W: Write>(fragments: &[String], out: &mut W) -> std::io::Result<()> {
    for fragment in fragments {
        out.write_all(fragment.as_bytes())?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<String> {
        vec![
            "\\documentclass{article}\n".to_string(),
            "\\begin{document}\n".to_string(),
            "\\end{document}".to_string(),
        ]
    }

    #[test]
    fn test_write_fragments_concatenates_in_order() {
        let mut buf = Vec::new();
        write_fragments(&sample(), &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\\documentclass{article}\n\\begin{document}\n\\end{document}"
        );
    }

    #[tokio::test]
    async fn test_write_output_creates_parents_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/lab3/paper.tex");

        write_output(&sample(), &path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("\\end{document}"));
        assert!(!path.with_extension("tex.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_output_below_a_regular_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let err = write_output(&sample(), &blocker.join("paper.tex"))
            .await
            .unwrap_err();
        assert!(matches!(err, Lab2LatexError::OutputWriteFailed { .. }));
    }
}
