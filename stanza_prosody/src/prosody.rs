// Prosody extractor: syllable counts and rhyme-scheme labels.
//
// Both functions are pure reads of a `PoemPronunciation`:
//
// - `count_syllables()` counts vowel phonemes (trailing stress digit) per
//   line. Word order inside a line does not matter.
//
// - `rhyme_scheme()` labels each line by its terminal sound group: the tail
//   of the line's last word from its last vowel phoneme to the end (`S IH0 N`
//   -> `IH0 N`). Groups are compared as exact phoneme sequences, never by
//   phonetic similarity. Labels are handed out in first-seen order, `A`, `B`,
//   `C`..., so the scheme depends only on the order in which distinct groups
//   first appear.
//
// Past `Z`, labels continue the way spreadsheet columns do (`AA`, `AB`, ...,
// `ZZ`, `AAA`); see `RhymeLabel`. A poem with that many distinct rhymes is
// unusual enough that the first overflow is logged as a warning.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ProsodyError, ProsodyResult};
use crate::render::join_phonemes;
use crate::types::{Phoneme, PoemPronunciation};

/// Number of single-letter labels before labels grow a second letter.
pub const ALPHABET_LEN: usize = 26;

/// A rhyme-scheme label: `A`..`Z`, then `AA`, `AB`, ...
///
/// Stored as a 0-based index into that sequence, in first-seen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RhymeLabel(usize);

impl RhymeLabel {
    pub fn from_index(index: usize) -> Self {
        RhymeLabel(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// Parse a label such as `"B"` or `"AC"`. Case-sensitive: uppercase only.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        // Bijective base-26: A=1 .. Z=26 per digit.
        let mut value: usize = 0;
        for c in text.chars() {
            if !c.is_ascii_uppercase() {
                return None;
            }
            let digit = (c as usize) - ('A' as usize) + 1;
            value = value.checked_mul(ALPHABET_LEN)?.checked_add(digit)?;
        }
        Some(RhymeLabel(value - 1))
    }
}

impl fmt::Display for RhymeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = String::new();
        let mut n = self.0 + 1;
        while n > 0 {
            n -= 1;
            letters.insert(0, char::from(b'A' + (n % ALPHABET_LEN) as u8));
            n /= ALPHABET_LEN;
        }
        f.write_str(&letters)
    }
}

// Serialized as its letters so JSON output reads `["A","B","A"]`.
impl Serialize for RhymeLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RhymeLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        RhymeLabel::parse(&s).ok_or_else(|| serde::de::Error::custom("invalid rhyme label"))
    }
}

/// Syllables per line: the number of vowel phonemes across all its words.
pub fn count_syllables(pronunciation: &PoemPronunciation) -> Vec<usize> {
    pronunciation
        .lines()
        .iter()
        .map(|line| line.iter().flatten().filter(|p| p.is_vowel()).count())
        .collect()
}

/// The suffix of `word` starting at its last vowel phoneme, or `None` if the
/// word has no vowel.
pub fn terminal_sound_group(word: &[Phoneme]) -> Option<&[Phoneme]> {
    let start = word.iter().rposition(Phoneme::is_vowel)?;
    Some(&word[start..])
}

/// Label every line by its terminal sound group, in first-seen order.
///
/// Fails with `MalformedLine` if a line's last word has no vowel phoneme and
/// with `EmptyLine` if a line has no words. An empty pronunciation gives an
/// empty scheme.
pub fn rhyme_scheme(pronunciation: &PoemPronunciation) -> ProsodyResult<Vec<RhymeLabel>> {
    let mut assigned: FxHashMap<&[Phoneme], RhymeLabel> = FxHashMap::default();
    let mut scheme = Vec::with_capacity(pronunciation.len());

    for (line_idx, line) in pronunciation.lines().iter().enumerate() {
        let last_word = line
            .last()
            .ok_or(ProsodyError::EmptyLine { line: line_idx })?;
        let group = terminal_sound_group(last_word).ok_or_else(|| ProsodyError::MalformedLine {
            line: line_idx,
            phonemes: join_phonemes(last_word),
        })?;

        let next = RhymeLabel::from_index(assigned.len());
        let label = *assigned.entry(group).or_insert_with(|| {
            if next.index() == ALPHABET_LEN {
                tracing::warn!(
                    line = line_idx,
                    "more than {ALPHABET_LEN} rhyme groups, using multi-letter labels"
                );
            }
            tracing::trace!(line = line_idx, label = %next, "new rhyme group");
            next
        });
        scheme.push(label);
    }

    Ok(scheme)
}
