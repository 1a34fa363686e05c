// Core scansion types: stress, phonemes, words, and the two poem grids.
//
// The pipeline passes two parallel grids between stages:
// - `Poem`: the normalized word grid (lines of `Word`s), produced by
//   `normalize.rs` and consumed by `dictionary.rs`.
// - `PoemPronunciation`: the phoneme grid (lines of words of `Phoneme`s),
//   produced by `map_poem()` and consumed by `prosody.rs` and `render.rs`.
//
// The type hierarchy is:
// - `Stress`: unstressed / primary / secondary, from a vowel's trailing digit
// - `Phoneme`: one ARPABET-style sound token (`AH0`, `N`, `EY1`, ...)
// - `Word`: a non-empty, normalized, uppercase word
// - `Line` / `Poem`: the word grid; neither lines nor words are ever empty
// - `WordPhonemes` / `LinePronunciation` / `PoemPronunciation`: the phoneme grid
//
// All grids are built once and never mutated afterwards. Constructors enforce
// the non-empty invariants, so downstream stages can rely on them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lexical stress carried by a vowel phoneme's trailing digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stress {
    /// Digit `0`, as in the first vowel of "about" (`AH0`).
    Unstressed,
    /// Digit `1`.
    Primary,
    /// Digit `2`.
    Secondary,
}

impl Stress {
    /// Parse a stress digit. Returns `None` for anything other than `0`–`2`.
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Stress::Unstressed),
            '1' => Some(Stress::Primary),
            '2' => Some(Stress::Secondary),
            _ => None,
        }
    }

    /// The digit this stress level is written with.
    pub fn digit(self) -> char {
        match self {
            Stress::Unstressed => '0',
            Stress::Primary => '1',
            Stress::Secondary => '2',
        }
    }
}

/// One sound unit, e.g. `EH1` or `S`.
///
/// Vowels end in a stress digit; consonants never do. Only the trailing
/// character is inspected, so any digit counts as a vowel marker even if
/// it is not a valid `Stress`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phoneme(String);

impl Phoneme {
    pub fn new(text: impl Into<String>) -> Self {
        Phoneme(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the phoneme ends in a decimal digit (a syllable nucleus).
    pub fn is_vowel(&self) -> bool {
        self.0.chars().next_back().is_some_and(|c| c.is_ascii_digit())
    }

    /// Stress level of a vowel phoneme; `None` for consonants.
    pub fn stress(&self) -> Option<Stress> {
        self.0.chars().next_back().and_then(Stress::from_digit)
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Phoneme {
    fn from(text: &str) -> Self {
        Phoneme(text.to_string())
    }
}

impl From<String> for Phoneme {
    fn from(text: String) -> Self {
        Phoneme(text)
    }
}

impl PartialEq<&str> for Phoneme {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A normalized word: uppercase, no boundary punctuation, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Wrap already-normalized text. Returns `None` for the empty string.
    ///
    /// No normalization happens here; use `normalize::normalize_word()` on
    /// raw tokens first.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Word(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One line of a poem: its words in reading order. Never empty inside a `Poem`.
pub type Line = Vec<Word>;

/// The normalized word grid for one poem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Poem {
    lines: Vec<Line>,
}

impl Poem {
    /// Build a poem from lines, dropping any line that has no words.
    pub fn from_lines(lines: impl IntoIterator<Item = Line>) -> Self {
        Poem {
            lines: lines.into_iter().filter(|line| !line.is_empty()).collect(),
        }
    }

    /// Build a poem from already-normalized text. Empty strings are skipped,
    /// and lines left with no words are dropped.
    pub fn from_grid<L, S>(grid: impl IntoIterator<Item = L>) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_lines(
            grid.into_iter()
                .map(|line| line.into_iter().filter_map(Word::new).collect()),
        )
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of words across all lines.
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }
}

/// Phonemes for one word, exactly as stored in the pronouncing dictionary.
pub type WordPhonemes = Vec<Phoneme>;

/// Phonemes for each word of one line, in word order.
pub type LinePronunciation = Vec<WordPhonemes>;

/// The phoneme grid for one poem, mirroring its `Poem` line for line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoemPronunciation {
    lines: Vec<LinePronunciation>,
}

impl PoemPronunciation {
    pub fn new(lines: Vec<LinePronunciation>) -> Self {
        PoemPronunciation { lines }
    }

    /// Build a phoneme grid from nested string-like values, e.g.
    /// `vec![vec![vec!["Y", "EH1", "S"]]]`.
    pub fn from_grid<L, W, P>(grid: impl IntoIterator<Item = L>) -> Self
    where
        L: IntoIterator<Item = W>,
        W: IntoIterator<Item = P>,
        P: Into<Phoneme>,
    {
        let lines = grid
            .into_iter()
            .map(|line| {
                line.into_iter()
                    .map(|word| word.into_iter().map(Into::into).collect())
                    .collect()
            })
            .collect();
        PoemPronunciation { lines }
    }

    pub fn lines(&self) -> &[LinePronunciation] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
