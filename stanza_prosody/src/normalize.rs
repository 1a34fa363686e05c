// Text normalizer: raw poem text -> `Poem` word grid.
//
// Each physical line is trimmed and split on whitespace runs. Every token is
// uppercased and stripped of boundary punctuation on both ends; interior
// characters (the apostrophe in "DON'T", the hyphen in "WELL-MET") survive.
// Blank lines disappear entirely, so line indices in the output count only
// lines that carry words.
//
// Tokens made only of punctuation (a dash used as a caesura, a lone "&")
// normalize to the empty string. `EmptyWordPolicy` decides what happens to
// them: `Drop` silently removes them (and the line, if nothing is left),
// `Reject` fails with `ProsodyError::EmptyWord`.
//
// See also: `dictionary.rs`, which looks each normalized word up verbatim.

use serde::{Deserialize, Serialize};

use crate::error::{ProsodyError, ProsodyResult};
use crate::types::{Line, Poem, Word};

/// Characters stripped from both ends of every token.
pub const BOUNDARY_CHARS: &str = "!\"'`@$%^&_-+={}|\\/,;:.?)([]<>*#\n\t\r ";

/// What to do with a token that normalizes to nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyWordPolicy {
    /// Remove the token; remove its line too if no words remain.
    #[default]
    Drop,
    /// Fail with `ProsodyError::EmptyWord`.
    Reject,
}

/// Uppercase `token` and trim boundary characters from both ends.
///
/// May return an empty string when the token is all punctuation.
pub fn normalize_word(token: &str) -> String {
    token
        .to_uppercase()
        .trim_matches(|c: char| BOUNDARY_CHARS.contains(c))
        .to_string()
}

/// Normalize a whole poem, dropping punctuation-only tokens.
pub fn normalize_poem(raw: &str) -> Poem {
    Poem::from_lines(raw.lines().map(|line| {
        let (words, dropped) = normalize_line(line);
        if let Some(token) = dropped {
            tracing::debug!(token, "dropping punctuation-only token");
        }
        words
    }))
}

/// Normalize a whole poem, failing on the first punctuation-only token.
pub fn normalize_poem_strict(raw: &str) -> ProsodyResult<Poem> {
    let mut lines = Vec::new();
    for raw_line in raw.lines() {
        let (words, dropped) = normalize_line(raw_line);
        if let Some(token) = dropped {
            return Err(ProsodyError::EmptyWord {
                line: lines.len(),
                token: token.to_string(),
            });
        }
        if !words.is_empty() {
            lines.push(words);
        }
    }
    Ok(Poem::from_lines(lines))
}

/// Normalize with an explicit policy for punctuation-only tokens.
pub fn normalize_poem_with(raw: &str, policy: EmptyWordPolicy) -> ProsodyResult<Poem> {
    match policy {
        EmptyWordPolicy::Drop => Ok(normalize_poem(raw)),
        EmptyWordPolicy::Reject => normalize_poem_strict(raw),
    }
}

/// Normalize one physical line. Returns the surviving words and the first
/// token that normalized to nothing, if any.
fn normalize_line(line: &str) -> (Line, Option<&str>) {
    let mut words = Line::new();
    let mut dropped = None;
    for token in line.split_whitespace() {
        match Word::new(normalize_word(token)) {
            Some(word) => words.push(word),
            None if dropped.is_none() => dropped = Some(token),
            None => {}
        }
    }
    (words, dropped)
}
