//! `///` doc comment scanner for Q# sources — line-by-line state machine.
//!
//! Only enough structure is recognized to pair documentation blocks with the
//! callable declarations that follow them:
//!
//! - `namespace Foo.Bar {` → namespace of the whole file (first one wins)
//! - `/// text` → documentation line
//! - first `(`-containing line after documentation → declaration start
//! - following lines up to the first `{` → rest of the signature
//!
//! Undocumented code and anything before the namespace line is skipped.

use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;

static RE_NAMESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^namespace\s+(\S+)").unwrap());

static RE_DOC_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^///\s*(.*)$").unwrap());

/// Marker opening a callable body; ends the signature.
const BODY_OPEN: char = '{';

/// Marker starting a parameter list; identifies a declaration line.
const PARAMS_OPEN: char = '(';

// -- Scanner state ------------------------------------------------------------

/// Where the scanner is within the current file.
#[derive(Debug, PartialEq)]
enum ScanState {
    /// No namespace seen yet; every line is ignored.
    SeekingNamespace,
    /// Namespace known, nothing pending.
    Idle,
    /// Collecting a documentation block that has not met a declaration yet.
    Documenting { annotation: String },
    /// Collecting signature text of a documented declaration.
    Signature {
        name: String,
        annotation: String,
        pieces: Vec<String>,
    },
}

/// Per-file scanning context. Created fresh for every file.
struct Scanner {
    heading_level: usize,
    namespace: Option<String>,
    functions: FunctionMap,
    state: ScanState,
}

impl Scanner {
    fn new(heading_level: usize) -> Self {
        Self {
            heading_level,
            namespace: None,
            functions: FunctionMap::new(),
            state: ScanState::SeekingNamespace,
        }
    }

    fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        let state = std::mem::replace(&mut self.state, ScanState::Idle);
        self.state = self.transition(state, line);
    }

    fn transition(&mut self, state: ScanState, line: &str) -> ScanState {
        match state {
            ScanState::SeekingNamespace => match RE_NAMESPACE.captures(line) {
                Some(caps) => {
                    self.namespace = Some(caps[1].to_string());
                    ScanState::Idle
                }
                None => ScanState::SeekingNamespace,
            },

            ScanState::Idle => match self.doc_line(line) {
                Some(text) => ScanState::Documenting {
                    annotation: text + "\n",
                },
                None => ScanState::Idle,
            },

            ScanState::Documenting { mut annotation } => {
                if let Some(text) = self.doc_line(line) {
                    annotation.push_str(&text);
                    annotation.push('\n');
                    return ScanState::Documenting { annotation };
                }
                match declaration_name(line) {
                    // The declaration line is itself the first piece of the signature.
                    Some(name) => self.continue_signature(name, annotation, Vec::new(), line),
                    None => ScanState::Documenting { annotation },
                }
            }

            ScanState::Signature {
                name,
                annotation,
                pieces,
            } => {
                // Doc lines inside a signature belong to no declaration.
                if RE_DOC_COMMENT.is_match(line) {
                    return ScanState::Signature {
                        name,
                        annotation,
                        pieces,
                    };
                }
                self.continue_signature(name, annotation, pieces, line)
            }
        }
    }

    /// Append `line` to the signature, committing the entry at the body marker.
    fn continue_signature(
        &mut self,
        name: String,
        annotation: String,
        mut pieces: Vec<String>,
        line: &str,
    ) -> ScanState {
        match line.split_once(BODY_OPEN) {
            Some((before, _)) => {
                push_piece(&mut pieces, before);
                self.commit(name, annotation, pieces);
                ScanState::Idle
            }
            None => {
                push_piece(&mut pieces, line);
                ScanState::Signature {
                    name,
                    annotation,
                    pieces,
                }
            }
        }
    }

    fn commit(&mut self, name: String, annotation: String, pieces: Vec<String>) {
        let entry = FunctionEntry {
            interface: pieces.join(" "),
            annotation,
        };
        // Later declarations with the same name replace earlier ones.
        self.functions.insert(name, entry);
    }

    /// Strip the `///` marker; demote embedded headings below the function heading.
    fn doc_line(&self, line: &str) -> Option<String> {
        let caps = RE_DOC_COMMENT.captures(line)?;
        let text = caps[1].trim();
        if text.starts_with('#') {
            Some(format!("{}{}", "#".repeat(self.heading_level), text))
        } else {
            Some(text.to_string())
        }
    }

    fn finish(mut self) -> SourceUnit {
        // An unterminated signature still yields its (partial) entry.
        if let ScanState::Signature {
            name,
            annotation,
            pieces,
        } = std::mem::replace(&mut self.state, ScanState::Idle)
        {
            self.commit(name, annotation, pieces);
        }

        match self.namespace {
            Some(namespace) => SourceUnit {
                namespace: Some(namespace),
                functions: self.functions,
            },
            None => SourceUnit::default(),
        }
    }
}

/// Name of a declaration: the last token before the first `(`.
///
/// Returns `None` for lines without `(`. A line like `(x)` yields an empty name.
fn declaration_name(line: &str) -> Option<String> {
    let (head, _) = line.split_once(PARAMS_OPEN)?;
    Some(head.split_whitespace().last().unwrap_or("").to_string())
}

fn push_piece(pieces: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        pieces.push(text.to_string());
    }
}

// -- Public API ---------------------------------------------------------------

/// Scan Q# source text into a [`SourceUnit`].
///
/// `heading_level` is the number of `#` prepended to Markdown headings found
/// inside documentation, so they nest under the function's own heading.
pub fn scan(input: &str, heading_level: usize) -> SourceUnit {
    let mut scanner = Scanner::new(heading_level);
    for line in input.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}
