// Human-readable output for phoneme grids and scansion tables.
//
// `render()` is the debugging view of a `PoemPronunciation`: phonemes joined
// by spaces, words by `" | "`, lines by newlines, with nothing trailing.
// `render_scansion()` lines up each word line with its rhyme label and
// syllable count, which is what the `scan_poem` driver prints.

use crate::prosody::RhymeLabel;
use crate::types::{Phoneme, Poem, PoemPronunciation};

/// Separator between words within a rendered line.
pub const WORD_SEPARATOR: &str = " | ";

/// Join one word's phonemes with single spaces.
pub fn join_phonemes(phonemes: &[Phoneme]) -> String {
    phonemes
        .iter()
        .map(Phoneme::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a phoneme grid, e.g. `"Y EH1 S\nN OW1 | Y EH1 S"`.
pub fn render(pronunciation: &PoemPronunciation) -> String {
    pronunciation
        .lines()
        .iter()
        .map(|line| {
            line.iter()
                .map(|word| join_phonemes(word))
                .collect::<Vec<_>>()
                .join(WORD_SEPARATOR)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One row per line: rhyme label, syllable count, then the normalized words.
///
/// Rows are zipped, so a shorter `syllables` or `scheme` truncates the table.
pub fn render_scansion(poem: &Poem, syllables: &[usize], scheme: &[RhymeLabel]) -> String {
    let label_width = scheme
        .iter()
        .map(|label| label.to_string().len())
        .max()
        .unwrap_or(1);
    poem.lines()
        .iter()
        .zip(syllables)
        .zip(scheme)
        .map(|((words, count), label)| {
            let text = words
                .iter()
                .map(|w| w.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            format!("{:<label_width$}  {count:>2}  {text}", label.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scenario() {
        let p = PoemPronunciation::from_grid(vec![
            vec![vec!["Y", "EH1", "S"]],
            vec![vec!["N", "OW1"], vec!["Y", "EH1", "S"]],
        ]);
        assert_eq!(render(&p), "Y EH1 S\nN OW1 | Y EH1 S");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&PoemPronunciation::default()), "");
    }

    #[test]
    fn test_render_single_word_has_no_separator() {
        let p = PoemPronunciation::from_grid(vec![vec![vec!["HH", "AA1", "R", "T"]]]);
        assert_eq!(render(&p), "HH AA1 R T");
    }

    #[test]
    fn test_render_scansion() {
        let poem = Poem::from_grid(vec![vec!["IS", "THIS", "MIC", "ON"], vec!["GET", "OFF"]]);
        let scheme = [RhymeLabel::from_index(0), RhymeLabel::from_index(1)];
        let table = render_scansion(&poem, &[4, 2], &scheme);
        assert_eq!(table, "A   4  IS THIS MIC ON\nB   2  GET OFF");
    }

    #[test]
    fn test_render_scansion_pads_long_labels() {
        let poem = Poem::from_grid(vec![vec!["ONE"], vec!["TWO"]]);
        let scheme = [RhymeLabel::from_index(0), RhymeLabel::from_index(26)];
        let table = render_scansion(&poem, &[1, 1], &scheme);
        assert_eq!(table, "A    1  ONE\nAA   1  TWO");
    }
}
