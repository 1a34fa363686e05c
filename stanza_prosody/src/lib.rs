// Scansion core: turns poem text into syllable counts and a rhyme scheme.
//
// The pipeline runs strictly forward, one complete stage at a time:
//
//   raw text --normalize--> Poem --map_poem(dictionary)--> PoemPronunciation
//            --count_syllables / rhyme_scheme--> (Vec<usize>, Vec<RhymeLabel>)
//
// Architecture:
// - `types.rs`: `Stress`, `Phoneme`, `Word`, `Poem`, `PoemPronunciation`
// - `normalize.rs`: raw text -> uppercase word grid, punctuation trimmed
// - `dictionary.rs`: `PronouncingDictionary` lookup table and `map_poem()`
// - `prosody.rs`: syllable counting, terminal sound groups, `RhymeLabel`s
// - `render.rs`: phoneme-grid and scansion-table formatting
// - `error.rs`: `ProsodyError`
//
// Everything here is a pure function of its inputs: no I/O, no global state,
// no interior mutability. The dictionary is borrowed read-only, so one
// dictionary can serve many poems at once. Reading dictionary and form files
// lives in the `stanza_scan` crate.

pub mod dictionary;
pub mod error;
pub mod normalize;
pub mod prosody;
pub mod render;
pub mod types;

// Re-export key types at crate root for convenience.
pub use dictionary::{PronouncingDictionary, map_poem};
pub use error::{ProsodyError, ProsodyResult};
pub use normalize::{EmptyWordPolicy, normalize_poem, normalize_poem_strict, normalize_word};
pub use prosody::{RhymeLabel, count_syllables, rhyme_scheme, terminal_sound_group};
pub use render::render;
pub use types::{Line, LinePronunciation, Phoneme, Poem, PoemPronunciation, Stress, Word, WordPhonemes};
