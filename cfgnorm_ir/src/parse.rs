use thiserror::Error;

use crate::model::Document;
use crate::scan::{TriviaKind, classify_trivia, scan_lines, tokenize};

/// Fatal structural errors surfaced by the parse driver.
///
/// Unrecognized keywords and redundant negations are defined as silent
/// no-ops by the dialects and never reach this type; only indentation that
/// fits no open scope aborts a parse. Mutations applied by earlier lines of
/// the same parse remain in the document (no rollback).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: indentation depth {depth} does not match any open block")]
    MalformedIndentation { line: usize, depth: usize },
}

/// Outcome of dispatching one content line.
#[derive(Debug)]
pub enum Step<S> {
    /// The line opened a nested block; the driver pushes a scope frame.
    Open(S),
    /// The line was handled and opens no block.
    Leaf,
    /// The line explicitly closed the innermost open block.
    Close,
    /// The line is outside the recognized command set and is ignored.
    Skip,
}

/// Dialect extension point: trivia classification, tokenization, dispatch.
///
/// The driver owns depth tracking; the dialect owns keyword recognition and
/// decides, per line, whether a block opens. `Scope` is whatever frame
/// payload the dialect needs to resolve later lines (typically an enum of
/// block kinds carrying their identifying keys).
pub trait Dialect {
    type Scope;

    /// Classify a raw line into trivia/content buckets.
    fn classify(&self, raw: &str) -> TriviaKind {
        classify_trivia(raw)
    }

    /// Tokenize a raw content line.
    fn tokenize(&self, raw: &str) -> Vec<String> {
        tokenize(raw)
    }

    /// Apply one content line given the open scope path, innermost last.
    fn apply(
        &self,
        doc: &mut Document,
        scopes: &[Self::Scope],
        tokens: &[String],
    ) -> Step<Self::Scope>;
}

/// Parse a configuration text into a fresh document.
pub fn parse_with_dialect<D: Dialect>(input: &str, dialect: &D) -> Result<Document, ParseError> {
    let mut doc = Document::new();
    apply_with_dialect(&mut doc, input, dialect)?;
    Ok(doc)
}

/// Apply further configuration lines onto an existing document.
///
/// This is the incremental entry point: repeated calls accumulate state,
/// supporting multi-file loading. The scope stack is fresh per call; only
/// the document persists across calls.
pub fn apply_with_dialect<D: Dialect>(
    doc: &mut Document,
    input: &str,
    dialect: &D,
) -> Result<(), ParseError> {
    let mut depths: Vec<usize> = Vec::new();
    let mut scopes: Vec<D::Scope> = Vec::new();

    for line in scan_lines(input, dialect) {
        // A line at depth d is a sibling of frames opened at depth >= d.
        while depths.last().is_some_and(|open| *open >= line.depth) {
            depths.pop();
            scopes.pop();
        }

        if line.depth > 0 && scopes.is_empty() {
            return Err(ParseError::MalformedIndentation {
                line: line.line,
                depth: line.depth,
            });
        }

        match dialect.apply(doc, &scopes, &line.tokens) {
            Step::Open(scope) => {
                depths.push(line.depth);
                scopes.push(scope);
            }
            Step::Close => {
                depths.pop();
                scopes.pop();
            }
            Step::Leaf | Step::Skip => {}
        }
    }

    Ok(())
}
