//! Markup transformer: HTML events in, LaTeX sections out.
//!
//! [`MarkupTransformer`] is a small state machine over three events
//! (start tag, end tag, text) and knows nothing about how those events are
//! produced. [`transform_html`] drives it from html5ever's tokenizer; tests
//! and other callers can drive it directly.
//!
//! A heading whose text matches the problem-title pattern opens a section.
//! The next paragraph that closes becomes that section's body: its text is
//! split after every `?`, emitted as a numbered list when more than one piece
//! remains and as plain text otherwise, and the section is closed with a page
//! break. Paragraphs that do not follow a problem heading are dropped.

use super::document::LatexDocument;
use crate::output::{ProblemBody, ProblemSummary};
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace, warn};

/// `[Bonus ]Problem <n> [<n> ...](<pts> pts)`, case-insensitive, anywhere in the text.
static RE_PROBLEM_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:Bonus )?Problem (?:\d+\s+)+\(\d+ pts\)").unwrap());

const HEADER_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Whether `text` names a gradable problem.
pub fn is_problem_title(text: &str) -> bool {
    RE_PROBLEM_TITLE.is_match(text)
}

fn is_header_tag(name: &str) -> bool {
    HEADER_TAGS.contains(&name)
}

/// Split paragraph text into pieces ending right after each `?`.
///
/// Pieces are trimmed and empty ones dropped, so text without a `?` yields
/// itself and whitespace-only text yields nothing.
pub fn split_questions(text: &str) -> Vec<String> {
    text.split_inclusive('?')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

/// Per-pass parser state. A fresh value is created for every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    pub inside_header: bool,
    pub inside_paragraph: bool,
    /// Set when the latest heading matched the title pattern; cleared when a
    /// paragraph closes.
    pub valid_problem: bool,
    /// Paragraph text collected so far, unescaped.
    pub current_text: String,
    /// Heading text collected so far for the open heading.
    pub header_text: String,
    /// The open heading already opened a section.
    pub header_matched: bool,
}

/// What a transform pass found, beyond the fragments it appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub problems: Vec<ProblemSummary>,
    pub skipped_paragraphs: usize,
    pub parse_diagnostics: usize,
}

/// State machine appending LaTeX to a [`LatexDocument`] as HTML events arrive.
#[derive(Debug)]
pub struct MarkupTransformer<'d> {
    doc: &'d mut LatexDocument,
    state: ParserState,
    report: TransformReport,
}

impl<'d> MarkupTransformer<'d> {
    pub fn new(doc: &'d mut LatexDocument) -> Self {
        Self {
            doc,
            state: ParserState::default(),
            report: TransformReport::default(),
        }
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Handle an opening tag. `name` must be lowercase.
    pub fn start_tag(&mut self, name: &str) {
        if is_header_tag(name) {
            self.state.inside_header = true;
            self.state.header_text.clear();
            self.state.header_matched = false;
        } else if name == "p" {
            self.state.inside_paragraph = true;
            self.state.current_text.clear();
        }
    }

    /// Handle a closing tag. `name` must be lowercase.
    pub fn end_tag(&mut self, name: &str) {
        if is_header_tag(name) {
            self.state.inside_header = false;
        } else if name == "p" {
            self.close_paragraph();
            self.state.inside_paragraph = false;
            self.state.valid_problem = false;
        }
    }

    /// Handle a run of character data.
    pub fn text(&mut self, data: &str) {
        if self.state.inside_header {
            self.state.header_text.push_str(data);
            if !self.state.header_matched && is_problem_title(&self.state.header_text) {
                self.open_problem();
            }
        } else if self.state.inside_paragraph {
            self.state.current_text.push_str(data);
        }
    }

    /// Finish the pass and hand back what was found.
    pub fn finish(&mut self) -> TransformReport {
        if self.state.valid_problem {
            warn!("Input ended before the last problem section was closed by a paragraph");
        }
        std::mem::take(&mut self.report)
    }

    fn open_problem(&mut self) {
        let title = self.state.header_text.clone();
        debug!("Problem header: {:?}", title);

        self.state.header_matched = true;
        self.state.valid_problem = true;
        self.doc.begin_section(&title);
        self.report.problems.push(ProblemSummary {
            title,
            body: ProblemBody::Missing,
        });
    }

    fn close_paragraph(&mut self) {
        let text = std::mem::take(&mut self.state.current_text);

        if !self.state.valid_problem {
            self.report.skipped_paragraphs += 1;
            return;
        }

        let pieces = split_questions(&text.replace('\n', " "));
        let body = match pieces.as_slice() {
            [] => {
                warn!("Problem paragraph has no text; emitting an empty section");
                ProblemBody::Empty
            }
            [single] => {
                self.doc.raw_text(single);
                ProblemBody::Text
            }
            _ => {
                self.doc.numbered_list(&pieces);
                ProblemBody::Questions(pieces.len())
            }
        };
        self.doc.end_section();

        if let Some(problem) = self.report.problems.last_mut() {
            problem.body = body;
        }
    }
}

/// Adapts html5ever tokens to [`MarkupTransformer`] events.
///
/// Consecutive character tokens are joined into one text event so that the
/// tokenizer's chunking never changes the output.
struct EventSink<'d> {
    transformer: MarkupTransformer<'d>,
    pending_text: String,
}

impl EventSink<'_> {
    fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            let text = std::mem::take(&mut self.pending_text);
            self.transformer.text(&text);
        }
    }

    fn handle_tag(&mut self, tag: Tag) -> TokenSinkResult<()> {
        let name: &str = &tag.name;
        match tag.kind {
            TagKind::StartTag => {
                self.transformer.start_tag(name);
                if tag.self_closing {
                    self.transformer.end_tag(name);
                    return TokenSinkResult::Continue;
                }
                match name {
                    "script" => TokenSinkResult::RawData(RawKind::ScriptData),
                    "style" => TokenSinkResult::RawData(RawKind::Rawtext),
                    _ => TokenSinkResult::Continue,
                }
            }
            TagKind::EndTag => {
                self.transformer.end_tag(name);
                TokenSinkResult::Continue
            }
        }
    }
}

impl TokenSink for EventSink<'_> {
    type Handle = ();

    fn process_token(&mut self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(text) => self.pending_text.push_str(&text),
            Token::TagToken(tag) => {
                self.flush_text();
                return self.handle_tag(tag);
            }
            Token::ParseError(msg) => {
                trace!("Markup diagnostic on line {}: {}", line_number, msg);
                self.transformer.report.parse_diagnostics += 1;
            }
            Token::NullCharacterToken => {}
            Token::CommentToken(_) | Token::DoctypeToken(_) | Token::EOFToken => self.flush_text(),
        }
        TokenSinkResult::Continue
    }
}

/// Run the whole of `html` through a fresh [`MarkupTransformer`], appending
/// problem sections to `doc`.
pub fn transform_html(html: &str, doc: &mut LatexDocument) -> TransformReport {
    let sink = EventSink {
        transformer: MarkupTransformer::new(doc),
        pending_text: String::new(),
    };
    let mut tokenizer = Tokenizer::new(sink, TokenizerOpts::default());

    let mut queue = BufferQueue::new();
    queue.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&mut queue);
    tokenizer.end();

    tokenizer.sink.flush_text();
    let report = tokenizer.sink.transformer.finish();
    debug!(
        "Transform pass: {} problems, {} skipped paragraphs, {} markup diagnostics",
        report.problems.len(),
        report.skipped_paragraphs,
        report.parse_diagnostics
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> (LatexDocument, TransformReport) {
        let mut doc = LatexDocument::new();
        let report = transform_html(html, &mut doc);
        (doc, report)
    }

    #[test]
    fn test_title_pattern() {
        assert!(is_problem_title("Problem 1 (10 pts)"));
        assert!(is_problem_title("Bonus Problem 2 (5 pts)"));
        assert!(is_problem_title("bonus PROBLEM 3 (15 PTS)"));
        assert!(is_problem_title("Problem 12 (10 pts)"));
        assert!(is_problem_title("Problem 2 1 (4 pts)"));
        assert!(is_problem_title("Part A: Problem 4 (20 pts) - Sorting"));

        assert!(!is_problem_title("Introduction"));
        assert!(!is_problem_title("Problem 1"));
        assert!(!is_problem_title("Problem (10 pts)"));
        assert!(!is_problem_title("Problem one (10 pts)"));
    }

    #[test]
    fn test_split_questions_boundaries() {
        assert_eq!(split_questions("a?b?"), vec!["a?", "b?"]);
        assert_eq!(split_questions("Why? Explain."), vec!["Why?", "Explain."]);
        assert_eq!(split_questions("No questions here."), vec!["No questions here."]);
        assert_eq!(split_questions("Really?   "), vec!["Really?"]);
        assert_eq!(split_questions("??"), vec!["?", "?"]);
        assert!(split_questions("").is_empty());
        assert!(split_questions(" \n\t ").is_empty());
    }

    #[test]
    fn test_two_questions_become_a_list() {
        let (doc, report) = run("<h2>Problem 1 (10 pts)</h2><p>What is 2+2? What is 3+3?</p>");

        assert_eq!(
            doc.fragments(),
            &[
                "\\begin{section}\n{Problem 1 (10 pts)}",
                "\\begin{enumerate}\n\\item What is 2+2?\n\\item What is 3+3?\n\\end{enumerate}\n",
                "\\end{section}\n\\newpage\n",
            ]
        );
        assert_eq!(report.problems.len(), 1);
        assert_eq!(report.problems[0].body, ProblemBody::Questions(2));
    }

    #[test]
    fn test_non_problem_header_emits_nothing() {
        let (doc, report) = run("<h1>Introduction</h1><p>Welcome to lab 3? Read on.</p>");
        assert!(doc.is_empty());
        assert!(report.problems.is_empty());
        assert_eq!(report.skipped_paragraphs, 1);
    }

    #[test]
    fn test_single_piece_is_plain_text() {
        let (doc, report) = run("<h3>Bonus Problem 2 (5 pts)</h3><p>Explain your reasoning.</p>");
        assert_eq!(
            doc.fragments(),
            &[
                "\\begin{section}\n{Bonus Problem 2 (5 pts)}",
                "Explain your reasoning.",
                "\\end{section}\n\\newpage\n",
            ]
        );
        assert_eq!(report.problems[0].body, ProblemBody::Text);
    }

    #[test]
    fn test_whitespace_paragraph_still_closes_section() {
        let (doc, report) = run("<h2>Problem 3 (1 pts)</h2><p>\n   \n</p>");
        assert_eq!(
            doc.fragments(),
            &["\\begin{section}\n{Problem 3 (1 pts)}", "\\end{section}\n\\newpage\n"]
        );
        assert_eq!(report.problems[0].body, ProblemBody::Empty);
    }

    #[test]
    fn test_three_problems_in_header_order() {
        let html = "\
            <h2>Problem 1 (10 pts)</h2><p>First?</p>\
            <h2>Overview</h2><p>Not a problem.</p>\
            <h2>Problem 2 (20 pts)</h2><p>Second? Third?</p>\
            <h2>Bonus Problem 3 (5 pts)</h2><p>Last one.</p>";
        let (doc, report) = run(html);

        let latex = doc.render();
        assert_eq!(latex.matches("\\begin{section}").count(), 3);
        assert_eq!(latex.matches("\\newpage").count(), 3);

        let titles: Vec<&str> = report.problems.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Problem 1 (10 pts)", "Problem 2 (20 pts)", "Bonus Problem 3 (5 pts)"]
        );
        let first = latex.find("Problem 1").unwrap();
        let second = latex.find("Problem 2").unwrap();
        let third = latex.find("Bonus Problem 3").unwrap();
        assert!(first < second && second < third);
        assert_eq!(report.skipped_paragraphs, 1);
    }

    #[test]
    fn test_only_first_paragraph_belongs_to_problem() {
        let (doc, report) = run("<h2>Problem 1 (1 pts)</h2><p>Body.</p><p>Trailing notes.</p>");
        assert!(!doc.render().contains("Trailing"));
        assert_eq!(report.skipped_paragraphs, 1);
    }

    #[test]
    fn test_newlines_become_spaces_and_text_is_escaped() {
        let (doc, _) = run("<h2>Problem 4 (8 pts)</h2><p>Is 50%\nof $x$ &amp; y\nbig?</p>");
        assert_eq!(doc.fragments()[1], "Is 50\\% of \\$x\\$ \\& y big?");
    }

    #[test]
    fn test_header_text_split_across_inline_tags() {
        let (doc, report) = run("<h2><em>Problem 1</em> (10 pts)</h2><p>Go.</p>");
        assert_eq!(doc.fragments()[0], "\\begin{section}\n{Problem 1 (10 pts)}");
        assert_eq!(report.problems.len(), 1);
    }

    #[test]
    fn test_header_opens_at_most_one_section() {
        let (doc, report) = run("<h2>Problem 1 (1 pts)<br>Problem 1 (1 pts)</h2><p>x</p>");
        assert_eq!(doc.render().matches("\\begin{section}").count(), 1);
        assert_eq!(report.problems.len(), 1);
    }

    #[test]
    fn test_script_content_is_not_markup() {
        let html = r#"<h2>Problem 1 (10 pts)</h2>
            <script>var s = "<p>Fake?</p>";</script>
            <p>Real? Question?</p>"#;
        let (doc, report) = run(html);
        let latex = doc.render();
        assert!(!latex.contains("Fake"));
        assert_eq!(report.problems[0].body, ProblemBody::Questions(2));
    }

    #[test]
    fn test_self_closing_paragraph_closes_problem() {
        let (doc, report) = run("<h2>Problem 5 (2 pts)</h2><p/>");
        assert_eq!(doc.len(), 2);
        assert_eq!(report.problems[0].body, ProblemBody::Empty);
    }

    #[test]
    fn test_problem_without_paragraph_is_missing() {
        let (doc, report) = run("<h2>Problem 6 (2 pts)</h2><ul><li>item</li></ul>");
        assert_eq!(doc.len(), 1);
        assert_eq!(report.problems[0].body, ProblemBody::Missing);
    }

    #[test]
    fn test_text_outside_header_and_paragraph_is_ignored() {
        let (doc, report) = run("<div>Problem 1 (10 pts)</div><span>What?</span>");
        assert!(doc.is_empty());
        assert!(report.problems.is_empty());
        assert_eq!(report.skipped_paragraphs, 0);
    }

    #[test]
    fn test_driving_events_directly_matches_tokenizer() {
        let mut direct = LatexDocument::new();
        {
            let mut t = MarkupTransformer::new(&mut direct);
            t.start_tag("h2");
            t.text("Problem 1 ");
            assert!(!t.state().valid_problem);
            t.text("(10 pts)");
            assert!(t.state().valid_problem);
            t.end_tag("h2");
            t.start_tag("p");
            assert!(t.state().inside_paragraph);
            t.text("What is 2+2?");
            t.text(" What is 3+3?");
            t.end_tag("p");
            assert!(!t.state().valid_problem);
            assert!(!t.state().inside_paragraph);
            t.finish();
        }

        let (tokenized, _) = run("<h2>Problem 1 (10 pts)</h2><p>What is 2+2? What is 3+3?</p>");
        assert_eq!(direct, tokenized);
    }

    #[test]
    fn test_each_pass_starts_from_clean_state() {
        let (first, _) = run("<h2>Problem 1 (1 pts)</h2>");
        let (second, report) = run("<p>Orphan paragraph.</p>");
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(report.skipped_paragraphs, 1);
    }
}
