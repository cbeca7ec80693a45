use crate::parse::Dialect;

/// Lightweight classification used before tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaKind {
    Blank,
    Comment,
    Content,
}

/// One logical content line: 1-based source line, nesting depth, tokens.
///
/// Blank and comment lines are dropped during scanning and never appear
/// here; they do not affect depth tracking of surrounding lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    pub line: usize,
    pub depth: usize,
    pub tokens: Vec<String>,
}

/// Default trivia classification: blank lines and `!`/`#` separators.
pub fn classify_trivia(raw: &str) -> TriviaKind {
    if raw.trim().is_empty() {
        return TriviaKind::Blank;
    }

    let trimmed = raw.trim_start();
    if trimmed.starts_with('!') || trimmed.starts_with('#') {
        return TriviaKind::Comment;
    }

    TriviaKind::Content
}

/// Default tokenization: whitespace-split, preserving quoted substrings as
/// single tokens (passwords and community strings may contain separators).
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote: Option<char> = None;
    let mut escape = false;

    for ch in raw.chars() {
        if let Some(q) = in_quote {
            if escape {
                current.push(ch);
                escape = false;
                continue;
            }

            if ch == '\\' {
                current.push(ch);
                escape = true;
                continue;
            }

            current.push(ch);
            if ch == q {
                in_quote = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' => {
                current.push(ch);
                in_quote = Some(ch);
            }
            c if c.is_whitespace() => {
                if !current.trim().is_empty() {
                    tokens.push(current.trim().to_string());
                    current.clear();
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.trim().is_empty() {
        tokens.push(current.trim().to_string());
    }

    tokens
}

/// Scan raw text into ordered content lines using the dialect's hooks.
pub fn scan_lines<D: Dialect>(input: &str, dialect: &D) -> Vec<ScannedLine> {
    let mut out = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        if dialect.classify(raw) != TriviaKind::Content {
            continue;
        }

        let tokens = dialect.tokenize(raw);
        if tokens.is_empty() {
            continue;
        }

        out.push(ScannedLine {
            line: idx + 1,
            depth: count_indent(raw),
            tokens,
        });
    }

    out
}

fn count_indent(raw: &str) -> usize {
    raw.chars().take_while(|ch| ch.is_whitespace()).count()
}
