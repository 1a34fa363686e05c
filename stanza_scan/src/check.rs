// Form checking: does a scanned poem fit a `PoetryForm`?
//
// Three independent checks, all reported rather than short-circuited:
//
// 1. Line count must equal the form's line count. When it differs, the other
//    checks still run over the lines both have in common.
// 2. Each line's syllable count must equal the form's, unless the form says 0.
// 3. Rhyme: lines sharing a pattern label must share a rhyme label. With
//    `strict_rhymes`, the converse holds too: non-wildcard lines with
//    different pattern labels must not share a rhyme label. Wildcard lines
//    are ignored by both directions.
//
// All line indices in a `FormReport` are 0-based; `Display` prints them
// 1-based for people.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use serde::Serialize;
use stanza_prosody::RhymeLabel;

use crate::forms::{PatternLabel, PoetryForm};

/// A line whose syllable count differs from the form's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyllableMismatch {
    pub line: usize,
    pub expected: usize,
    pub actual: usize,
}

/// The outcome of checking one poem against one form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormReport {
    pub form: String,
    pub expected_lines: usize,
    pub actual_lines: usize,
    pub syllable_mismatches: Vec<SyllableMismatch>,
    /// Groups of lines that share a pattern label but do not all rhyme.
    pub unrhymed: Vec<Vec<usize>>,
    /// Groups of lines that rhyme although their pattern labels differ.
    pub unexpected_rhymes: Vec<Vec<usize>>,
}

impl FormReport {
    pub fn is_match(&self) -> bool {
        self.expected_lines == self.actual_lines
            && self.syllable_mismatches.is_empty()
            && self.unrhymed.is_empty()
            && self.unexpected_rhymes.is_empty()
    }
}

impl fmt::Display for FormReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_match() {
            return write!(f, "{}: matches", self.form);
        }
        write!(f, "{}: does not match", self.form)?;
        if self.expected_lines != self.actual_lines {
            write!(
                f,
                "\n  expected {} lines, found {}",
                self.expected_lines, self.actual_lines
            )?;
        }
        for m in &self.syllable_mismatches {
            write!(
                f,
                "\n  line {}: expected {} syllables, found {}",
                m.line + 1,
                m.expected,
                m.actual
            )?;
        }
        for group in &self.unrhymed {
            write!(f, "\n  lines {} should rhyme", line_list(group))?;
        }
        for group in &self.unexpected_rhymes {
            write!(f, "\n  lines {} rhyme but should not", line_list(group))?;
        }
        Ok(())
    }
}

/// Check a poem's syllable counts and rhyme scheme against `form`.
pub fn check_form(
    form: &PoetryForm,
    syllables: &[usize],
    scheme: &[RhymeLabel],
    strict_rhymes: bool,
) -> FormReport {
    let syllable_mismatches = form
        .syllables
        .iter()
        .zip(syllables)
        .enumerate()
        .filter(|&(_, (&expected, &actual))| expected != 0 && expected != actual)
        .map(|(line, (&expected, &actual))| SyllableMismatch {
            line,
            expected,
            actual,
        })
        .collect();

    // Non-wildcard lines only, as (line, pattern label, rhyme label).
    let constrained: Vec<(usize, &str, RhymeLabel)> = form
        .pattern
        .iter()
        .zip(scheme)
        .enumerate()
        .filter_map(|(line, (pattern, &rhyme))| match pattern {
            PatternLabel::Any => None,
            PatternLabel::Rhyme(label) => Some((line, label.as_str(), rhyme)),
        })
        .collect();

    let unrhymed = groups_by(constrained.iter().map(|&(line, pattern, _)| (line, pattern)))
        .into_iter()
        .filter(|group| !all_same(group, |line| scheme[line]))
        .collect();

    let unexpected_rhymes = if strict_rhymes {
        let pattern_of: FxHashMap<usize, &str> = constrained
            .iter()
            .map(|&(line, pattern, _)| (line, pattern))
            .collect();
        groups_by(constrained.iter().map(|&(line, _, rhyme)| (line, rhyme)))
            .into_iter()
            .filter(|group| !all_same(group, |line| pattern_of[&line]))
            .collect()
    } else {
        Vec::new()
    };

    FormReport {
        form: form.name.clone(),
        expected_lines: form.line_count(),
        actual_lines: scheme.len(),
        syllable_mismatches,
        unrhymed,
        unexpected_rhymes,
    }
}

/// Group line indices by key, in first-seen key order.
fn groups_by<K: Eq + Hash>(items: impl Iterator<Item = (usize, K)>) -> Vec<Vec<usize>> {
    let mut slot_of: FxHashMap<K, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (line, key) in items {
        let slot = *slot_of.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(line);
    }
    groups
}

fn all_same<T: PartialEq>(lines: &[usize], value_of: impl Fn(usize) -> T) -> bool {
    let mut values = lines.iter().map(|&line| value_of(line));
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

fn line_list(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|line| (line + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(lines: &[(usize, &str)]) -> PoetryForm {
        PoetryForm::new(
            "Test",
            lines
                .iter()
                .map(|&(count, label)| (count, PatternLabel::parse(label, "*")))
                .collect(),
        )
    }

    fn scheme(labels: &str) -> Vec<RhymeLabel> {
        labels
            .chars()
            .map(|c| RhymeLabel::parse(&c.to_string()).unwrap())
            .collect()
    }

    fn limerick() -> PoetryForm {
        form(&[(8, "A"), (8, "A"), (5, "B"), (5, "B"), (8, "A")])
    }

    #[test]
    fn test_perfect_limerick() {
        let report = check_form(&limerick(), &[8, 8, 5, 5, 8], &scheme("AABBA"), true);
        assert!(report.is_match());
        assert_eq!(report.to_string(), "Test: matches");
    }

    #[test]
    fn test_syllable_mismatch() {
        let report = check_form(&limerick(), &[8, 9, 5, 5, 8], &scheme("AABBA"), true);
        assert!(!report.is_match());
        assert_eq!(
            report.syllable_mismatches,
            vec![SyllableMismatch {
                line: 1,
                expected: 8,
                actual: 9
            }]
        );
    }

    #[test]
    fn test_zero_syllables_unconstrained() {
        let couplet = form(&[(0, "A"), (0, "A")]);
        assert!(check_form(&couplet, &[3, 17], &scheme("AA"), true).is_match());
    }

    #[test]
    fn test_pattern_labels_need_not_match_scheme_letters() {
        // Pattern X X Y Y X is the same partition as AABBA.
        let renamed = form(&[(8, "X"), (8, "X"), (5, "Y"), (5, "Y"), (8, "X")]);
        assert!(check_form(&renamed, &[8, 8, 5, 5, 8], &scheme("AABBA"), true).is_match());
    }

    #[test]
    fn test_unrhymed_group() {
        // Last line does not rhyme with the first two.
        let report = check_form(&limerick(), &[8, 8, 5, 5, 8], &scheme("AABBC"), true);
        assert_eq!(report.unrhymed, vec![vec![0, 1, 4]]);
        assert!(report.unexpected_rhymes.is_empty());
    }

    #[test]
    fn test_unexpected_rhyme_only_when_strict() {
        // Everything rhymes: B lines rhyme with A lines.
        let strict = check_form(&limerick(), &[8, 8, 5, 5, 8], &scheme("AAAAA"), true);
        assert_eq!(strict.unexpected_rhymes, vec![vec![0, 1, 2, 3, 4]]);
        assert!(strict.unrhymed.is_empty());
        assert!(!strict.is_match());

        let lenient = check_form(&limerick(), &[8, 8, 5, 5, 8], &scheme("AAAAA"), false);
        assert!(lenient.is_match());
    }

    #[test]
    fn test_wildcards_ignored() {
        let haiku = form(&[(5, "*"), (7, "*"), (5, "*")]);
        assert!(check_form(&haiku, &[5, 7, 5], &scheme("AAB"), true).is_match());
        assert!(check_form(&haiku, &[5, 7, 5], &scheme("ABC"), true).is_match());
    }

    #[test]
    fn test_wildcard_line_may_rhyme_with_anything() {
        let ballad = form(&[(8, "*"), (6, "A"), (8, "*"), (6, "A")]);
        assert!(check_form(&ballad, &[8, 6, 8, 6], &scheme("AAAA"), true).is_match());
        let report = check_form(&ballad, &[8, 6, 8, 6], &scheme("ABAC"), true);
        assert_eq!(report.unrhymed, vec![vec![1, 3]]);
    }

    #[test]
    fn test_line_count_mismatch() {
        let report = check_form(&limerick(), &[8, 8, 5], &scheme("AAB"), true);
        assert!(!report.is_match());
        assert_eq!(report.expected_lines, 5);
        assert_eq!(report.actual_lines, 3);
        // The shared prefix is still clean.
        assert!(report.syllable_mismatches.is_empty());
        assert!(report.unrhymed.is_empty());
    }

    #[test]
    fn test_report_display() {
        let report = check_form(&limerick(), &[8, 9, 5, 5, 8, 8], &scheme("AABBCA"), true);
        assert_eq!(
            report.to_string(),
            "Test: does not match\n  expected 5 lines, found 6\n  \
             line 2: expected 8 syllables, found 9\n  lines 1, 2, 5 should rhyme"
        );
    }

    #[test]
    fn test_groups_by_first_seen_order() {
        let groups = groups_by([(0, 'b'), (1, 'a'), (2, 'b'), (3, 'c'), (4, 'a')].into_iter());
        assert_eq!(groups, vec![vec![0, 2], vec![1, 4], vec![3]]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A form built from a poem's own counts and scheme always fits it,
            /// whatever tokens stand in for the rhyme labels.
            #[test]
            fn poem_fits_its_own_shape(
                lines in prop::collection::vec((1usize..20, 0usize..6), 1..16),
                prefix in "[a-z]{1,3}",
            ) {
                let syllables: Vec<usize> = lines.iter().map(|&(s, _)| s).collect();
                let scheme: Vec<RhymeLabel> = lines
                    .iter()
                    .map(|&(_, group)| RhymeLabel::from_index(group))
                    .collect();
                let shape = PoetryForm::new(
                    "Shape",
                    lines
                        .iter()
                        .map(|&(s, group)| (s, PatternLabel::Rhyme(format!("{prefix}{group}"))))
                        .collect(),
                );
                prop_assert!(check_form(&shape, &syllables, &scheme, true).is_match());
            }

            /// An all-wildcard, all-zero form accepts any poem of its length.
            #[test]
            fn free_form_fits_anything(
                lines in prop::collection::vec((0usize..20, 0usize..6), 0..16),
            ) {
                let syllables: Vec<usize> = lines.iter().map(|&(s, _)| s).collect();
                let scheme: Vec<RhymeLabel> = lines
                    .iter()
                    .map(|&(_, group)| RhymeLabel::from_index(group))
                    .collect();
                let free = PoetryForm::new("Free", vec![(0, PatternLabel::Any); lines.len()]);
                prop_assert!(check_form(&free, &syllables, &scheme, true).is_match());
            }
        }
    }
}
