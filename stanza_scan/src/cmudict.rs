// Reader for pronouncing dictionaries in CMU Pronouncing Dictionary format.
//
// One record per line: the word, then its phonemes, all whitespace-separated.
//
//   ;;; comment lines start with the configured marker
//   ABSINTHE  AE1 B S IH0 N TH
//   HEART  HH AA1 R T
//   ACHILL  AE1 K IH0 L # place, irish
//
// Words are uppercased on load so that lookups by normalized word always
// hit. Alternate pronunciations (`WORD(2)`) are skipped, since a normalized
// poem word can never carry that suffix, and for a word listed twice the
// first record wins. Anything after a `#` token is an inline comment.
//
// Produces the `stanza_prosody::PronouncingDictionary` that `map_poem()`
// reads.

use std::path::Path;

use stanza_prosody::{Phoneme, PronouncingDictionary, WordPhonemes};

use crate::error::{ScanError, ScanResult};

/// Parse dictionary text. Lines starting with `comment_marker` and blank
/// lines are skipped; an empty marker disables comment skipping.
pub fn parse_dictionary(text: &str, comment_marker: &str) -> ScanResult<PronouncingDictionary> {
    let mut dictionary = PronouncingDictionary::new();
    let mut skipped_alternates = 0usize;

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || (!comment_marker.is_empty() && line.starts_with(comment_marker)) {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(word) = tokens.next() else {
            continue;
        };
        if is_alternate(word) {
            skipped_alternates += 1;
            continue;
        }

        let phonemes: WordPhonemes = tokens
            .take_while(|t| !t.starts_with('#'))
            .map(Phoneme::from)
            .collect();
        if phonemes.is_empty() {
            return Err(ScanError::Dictionary {
                line_number: idx + 1,
                reason: format!("\"{word}\" has no phonemes"),
            });
        }

        let key = word.to_uppercase();
        if dictionary.contains(&key) {
            tracing::debug!(word = %key, line = idx + 1, "duplicate dictionary entry ignored");
            continue;
        }
        dictionary.insert(key, phonemes);
    }

    tracing::debug!(
        entries = dictionary.len(),
        skipped_alternates,
        "parsed pronouncing dictionary"
    );
    Ok(dictionary)
}

/// Read and parse a dictionary file.
pub fn load_dictionary(path: &Path, comment_marker: &str) -> ScanResult<PronouncingDictionary> {
    let text = crate::read_text(path)?;
    parse_dictionary(&text, comment_marker)
}

/// True for alternate-pronunciation keys such as `READ(2)`.
fn is_alternate(word: &str) -> bool {
    word.strip_suffix(')')
        .and_then(|rest| rest.rsplit_once('('))
        .is_some_and(|(stem, n)| !stem.is_empty() && !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}
