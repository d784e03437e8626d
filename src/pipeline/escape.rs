//! LaTeX escaping for text lifted out of the handout.
//!
//! Escaping is a single left-to-right pass over the characters, so the
//! backslashes introduced by a substitution are never themselves escaped.
//! A second, regex-based pass then rewrites a slash that is directly followed
//! by one whitespace character into `\slash{}`.
//!
//! Two substitutions are kept exactly as existing reports expect them even
//! though they are unusual LaTeX: `>` becomes `\textmore ` (not
//! `\textgreater`), and only "slash + whitespace" is rewritten, never a
//! bare slash.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that are escaped by prefixing a backslash.
const BACKSLASH_PREFIXED: &[char] = &['&', '$', '%', '_', '^', '~', '#', '}', '{'];

static RE_SLASH_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/(\s)").unwrap());

/// Escape `text` so it can be placed verbatim in a LaTeX document body.
///
/// Total: every input produces an output.
///
/// ```
/// use lab2latex::pipeline::escape::escape;
///
/// assert_eq!(escape("a & b"), r"a \& b");
/// assert_eq!(escape("a|b"), r"a\textbar b");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);

    for c in text.chars() {
        match c {
            c if BACKSLASH_PREFIXED.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            '|' => out.push_str(r"\textbar "),
            '\\' => out.push_str(r"\textbackslash "),
            '<' => out.push_str(r"\textless "),
            '>' => out.push_str(r"\textmore "),
            c => out.push(c),
        }
    }

    RE_SLASH_WHITESPACE
        .replace_all(&out, r"\slash{}${1}")
        .into_owned()
}
