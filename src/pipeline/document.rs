//! Document builder: an ordered list of LaTeX fragments.
//!
//! Each append operation pushes exactly one fragment. Text supplied by the
//! caller (titles, question text, paragraphs) always goes through
//! [`escape`]; the structural LaTeX around it never does. Fragment order is
//! the final file order, so the builder never reorders or edits what it has
//! already appended.

use super::escape::escape;

/// Packages loaded by every generated report.
const PACKAGES: &str = "titlesec,amsmath,amsthm,amsfonts";

/// Date macro used when no explicit date is configured.
pub const DEFAULT_DATE: &str = r"\today";

/// An in-progress LaTeX source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatexDocument {
    fragments: Vec<String>,
}

impl LatexDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// `\documentclass{<class>}`.
    pub fn begin_preamble(&mut self, doc_class: &str) {
        self.push(format!("\\documentclass{{{doc_class}}}\n"));
    }

    pub fn use_packages(&mut self) {
        self.push(format!("\\usepackage{{{PACKAGES}}}\n"));
    }

    /// Plain bold section headings without numbering.
    pub fn title_format(&mut self) {
        self.push(
            concat!(r"\titleformat{\section}{\normalfont\Large\bfseries}{}{0pt}{}", "\n")
                .to_string(),
        );
    }

    pub fn title(&mut self, text: &str) {
        self.push(format!("\\title{{{}}}\n", escape(text)));
    }

    pub fn author(&mut self, text: &str) {
        self.push(format!("\\author{{{}}}\n", escape(text)));
    }

    /// `\date{...}`. `None` emits the unescaped [`DEFAULT_DATE`] macro; an
    /// explicit date is escaped like any other text.
    pub fn date(&mut self, text: Option<&str>) {
        let date = match text {
            Some(t) => escape(t),
            None => DEFAULT_DATE.to_string(),
        };
        self.push(format!("\\date{{{date}}}\n"));
    }

    pub fn begin_document(&mut self) {
        self.push("\\begin{document}\n".to_string());
    }

    /// Title page holding `\maketitle` and the table of contents.
    pub fn title_page(&mut self) {
        self.push(
            "\\begin{titlepage}\n\\maketitle \n\\tableofcontents \n\\end{titlepage}\n".to_string(),
        );
    }

    /// Open a section and write its heading. The section stays open until
    /// [`LatexDocument::end_section`] so body content can be appended in between.
    pub fn begin_section(&mut self, title_text: &str) {
        self.push(format!("\\begin{{section}}\n{{{}}}", escape(title_text)));
    }

    /// Close the current section and start a new page.
    pub fn end_section(&mut self) {
        self.push("\\end{section}\n\\newpage\n".to_string());
    }

    /// An `enumerate` environment with one `\item` per entry.
    pub fn numbered_list<S: AsRef<str>>(&mut self, items: &[S]) {
        let mut list = String::from("\\begin{enumerate}");
        for item in items {
            list.push_str("\n\\item ");
            list.push_str(&escape(item.as_ref()));
        }
        list.push_str("\n\\end{enumerate}\n");
        self.push(list);
    }

    pub fn raw_text(&mut self, text: &str) {
        self.push(escape(text));
    }

    /// `\end{document}`, with no trailing newline.
    pub fn end_document(&mut self) {
        self.push("\\end{document}".to_string());
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn into_fragments(self) -> Vec<String> {
        self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Concatenate all fragments in order, without separators.
    pub fn render(&self) -> String {
        self.fragments.concat()
    }

    fn push(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }
}
