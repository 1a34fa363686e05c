// Phoneme mapper: the pronouncing dictionary and `map_poem()`.
//
// `PronouncingDictionary` is the lookup table from normalized uppercase word
// to its phoneme sequence. It is built once by the caller (see
// `stanza_scan::cmudict` for the file reader) and only read here, so a
// single dictionary can be shared by reference across many analyses, and
// across threads.
//
// `map_poem()` resolves every word of a `Poem` to its dictionary entry. There
// is no fallback pronunciation: a word missing from the table is a hard
// `ProsodyError::MissingPronunciation`. Callers that want to report every
// gap at once can ask `missing_words()` first.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{ProsodyError, ProsodyResult};
use crate::types::{Phoneme, Poem, PoemPronunciation, WordPhonemes};

/// Lookup table from normalized word to phoneme sequence.
#[derive(Debug, Clone, Default)]
pub struct PronouncingDictionary {
    entries: FxHashMap<String, WordPhonemes>,
}

impl PronouncingDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the pronunciation for `word`. Returns the previous
    /// pronunciation, if any. Keys are stored exactly as given.
    pub fn insert(&mut self, word: impl Into<String>, phonemes: WordPhonemes) -> Option<WordPhonemes> {
        self.entries.insert(word.into(), phonemes)
    }

    /// Look up a normalized word.
    pub fn get(&self, word: &str) -> Option<&[Phoneme]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every distinct word of `poem` that has no entry, in reading order.
    pub fn missing_words(&self, poem: &Poem) -> Vec<String> {
        let mut seen = FxHashSet::default();
        poem.lines()
            .iter()
            .flatten()
            .filter(|word| !self.contains(word.as_str()))
            .filter(|word| seen.insert(*word))
            .map(|word| word.to_string())
            .collect()
    }
}

impl<W: Into<String>> FromIterator<(W, WordPhonemes)> for PronouncingDictionary {
    fn from_iter<I: IntoIterator<Item = (W, WordPhonemes)>>(iter: I) -> Self {
        PronouncingDictionary {
            entries: iter
                .into_iter()
                .map(|(word, phonemes)| (word.into(), phonemes))
                .collect(),
        }
    }
}

/// Replace every word of `poem` with its dictionary pronunciation.
///
/// The result has exactly the shape of `poem`: same line count, same words
/// per line, same order. Fails on the first word (in reading order) that the
/// dictionary does not know.
pub fn map_poem(poem: &Poem, dictionary: &PronouncingDictionary) -> ProsodyResult<PoemPronunciation> {
    let mut lines = Vec::with_capacity(poem.len());
    for (line_idx, line) in poem.lines().iter().enumerate() {
        let mut words = Vec::with_capacity(line.len());
        for word in line {
            let phonemes = dictionary.get(word.as_str()).ok_or_else(|| {
                ProsodyError::MissingPronunciation {
                    line: line_idx,
                    word: word.to_string(),
                }
            })?;
            words.push(phonemes.to_vec());
        }
        lines.push(words);
    }
    tracing::debug!(lines = lines.len(), words = poem.word_count(), "mapped poem to phonemes");
    Ok(PoemPronunciation::new(lines))
}
