// Poetry forms and the form catalog reader.
//
// A catalog is a sequence of blocks separated by blank lines. Each block is a
// form name followed by one line per poem line, giving the expected syllable
// count and rhyme-pattern label:
//
//   Limerick
//   8 A
//   8 A
//   5 B
//   5 B
//   8 A
//
// The wildcard label (default `*`) matches any rhyme group, and a syllable
// count of 0 leaves that line's length unconstrained. Pattern labels are
// arbitrary tokens; only equality between them matters.
//
// `default_catalog()` embeds `data/poetry_forms.txt` at compile time, so the
// binary works without a catalog file.
//
// See also: `check.rs`, which compares a scanned poem with a `PoetryForm`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Serialize, Serializer};

use crate::config::DEFAULT_WILDCARD;
use crate::error::{ScanError, ScanResult};

/// One line's rhyme requirement in a form's pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternLabel {
    /// Matches any rhyme group.
    Any,
    /// Lines with the same label must rhyme with each other.
    Rhyme(String),
}

impl PatternLabel {
    /// Interpret a catalog token, treating `wildcard` as `Any`.
    pub fn parse(token: &str, wildcard: &str) -> Self {
        if token == wildcard {
            PatternLabel::Any
        } else {
            PatternLabel::Rhyme(token.to_string())
        }
    }
}

impl fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternLabel::Any => f.write_str(DEFAULT_WILDCARD),
            PatternLabel::Rhyme(label) => f.write_str(label),
        }
    }
}

impl Serialize for PatternLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A named form: expected syllables and rhyme label for each line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoetryForm {
    pub name: String,
    /// Expected syllables per line; 0 means any.
    pub syllables: Vec<usize>,
    pub pattern: Vec<PatternLabel>,
}

impl PoetryForm {
    /// Build a form from `(syllables, label)` pairs, one per line.
    pub fn new(name: impl Into<String>, lines: Vec<(usize, PatternLabel)>) -> Self {
        let (syllables, pattern) = lines.into_iter().unzip();
        PoetryForm {
            name: name.into(),
            syllables,
            pattern,
        }
    }

    /// Number of lines the form requires.
    pub fn line_count(&self) -> usize {
        self.pattern.len()
    }
}

/// All known forms, keyed by name, iterated in name order.
#[derive(Debug, Clone, Default)]
pub struct FormCatalog {
    forms: BTreeMap<String, PoetryForm>,
}

impl FormCatalog {
    /// Parse catalog text.
    pub fn parse(text: &str, wildcard: &str) -> ScanResult<Self> {
        let mut catalog = FormCatalog::default();
        let mut block: Option<FormBlock> = None;

        for (idx, raw_line) in text.lines().enumerate() {
            let line_number = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                if let Some(done) = block.take() {
                    catalog.add_block(done)?;
                }
                continue;
            }
            match block.as_mut() {
                None => {
                    block = Some(FormBlock {
                        name: line.to_string(),
                        line_number,
                        lines: Vec::new(),
                    });
                }
                Some(current) => current.lines.push(parse_form_line(line, line_number, wildcard)?),
            }
        }
        if let Some(done) = block.take() {
            catalog.add_block(done)?;
        }

        tracing::debug!(forms = catalog.len(), "parsed form catalog");
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path, wildcard: &str) -> ScanResult<Self> {
        let text = crate::read_text(path)?;
        Self::parse(&text, wildcard)
    }

    /// Look a form up by name; falls back to a case-insensitive match.
    pub fn get(&self, name: &str) -> Option<&PoetryForm> {
        self.forms.get(name).or_else(|| {
            self.forms
                .values()
                .find(|form| form.name.eq_ignore_ascii_case(name))
        })
    }

    /// Like `get()`, but an unknown name is an error.
    pub fn require(&self, name: &str) -> ScanResult<&PoetryForm> {
        self.get(name)
            .ok_or_else(|| ScanError::UnknownForm(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoetryForm> {
        self.forms.values()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    fn add_block(&mut self, block: FormBlock) -> ScanResult<()> {
        if block.lines.is_empty() {
            return Err(ScanError::Catalog {
                line_number: block.line_number,
                reason: format!("form \"{}\" has no lines", block.name),
            });
        }
        if self.forms.contains_key(&block.name) {
            return Err(ScanError::Catalog {
                line_number: block.line_number,
                reason: format!("form \"{}\" is defined twice", block.name),
            });
        }
        let form = PoetryForm::new(block.name.clone(), block.lines);
        self.forms.insert(block.name, form);
        Ok(())
    }
}

/// The built-in catalog shipped in `data/poetry_forms.txt`.
///
/// Panics if the embedded catalog is malformed (covered by tests).
pub fn default_catalog() -> FormCatalog {
    let text = include_str!("../../data/poetry_forms.txt");
    FormCatalog::parse(text, DEFAULT_WILDCARD).expect("embedded poetry_forms.txt is malformed")
}

/// A form being accumulated while its block is read.
struct FormBlock {
    name: String,
    line_number: usize,
    lines: Vec<(usize, PatternLabel)>,
}

/// Parse one `<syllable_count> <pattern_label>` line.
fn parse_form_line(line: &str, line_number: usize, wildcard: &str) -> ScanResult<(usize, PatternLabel)> {
    let error = |reason: String| ScanError::Catalog {
        line_number,
        reason,
    };
    let mut tokens = line.split_whitespace();
    let count_token = tokens.next().unwrap_or_default();
    let count = count_token
        .parse::<usize>()
        .map_err(|_| error(format!("expected a syllable count, found \"{count_token}\"")))?;
    let label = tokens
        .next()
        .ok_or_else(|| error("missing rhyme pattern label".to_string()))?;
    if let Some(extra) = tokens.next() {
        return Err(error(format!("unexpected \"{extra}\" after rhyme label")));
    }
    Ok((count, PatternLabel::parse(label, wildcard)))
}
