// Error taxonomy for the scansion pipeline.
//
// Every failure is a deterministic function of the input text and the
// dictionary, so nothing here is retried. Line indices are 0-based positions
// in the normalized `Poem` (blank source lines are already gone).
//
// An empty poem is not an error: every stage maps it to an empty result.

use thiserror::Error;

/// Result alias for pipeline operations.
pub type ProsodyResult<T> = Result<T, ProsodyError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProsodyError {
    /// A normalized word has no entry in the pronouncing dictionary.
    #[error("no pronunciation for \"{word}\" (line {line})")]
    MissingPronunciation { line: usize, word: String },

    /// The last word of a line has no vowel phoneme, so it has no terminal
    /// sound group to rhyme on.
    #[error("line {line} ends in a word with no vowel phoneme: [{phonemes}]")]
    MalformedLine { line: usize, phonemes: String },

    /// A pronunciation line with no words at all.
    #[error("line {line} has no words")]
    EmptyLine { line: usize },

    /// Strict normalization found a token made only of punctuation.
    #[error("token \"{token}\" on line {line} is only punctuation")]
    EmptyWord { line: usize, token: String },
}
