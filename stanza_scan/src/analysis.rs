// One poem's complete scansion, plus batch analysis of poem files.
//
// `PoemAnalysis::run()` chains the core stages (normalize, map, count,
// label) under a `ScanConfig`. Before mapping, every word missing from the
// dictionary is logged in one warning, so a user fixing their dictionary
// sees all the gaps at once instead of one per run.
//
// `analyze_files()` reads and scans several poems in parallel with rayon.
// The dictionary is shared read-only; results come back in input order.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use stanza_prosody::normalize::normalize_poem_with;
use stanza_prosody::render::render_scansion;
use stanza_prosody::{
    Poem, PoemPronunciation, PronouncingDictionary, RhymeLabel, count_syllables, map_poem, render,
    rhyme_scheme,
};

use crate::check::{FormReport, check_form};
use crate::config::ScanConfig;
use crate::error::ScanResult;
use crate::forms::{FormCatalog, PoetryForm};

/// Everything the pipeline derives from one poem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoemAnalysis {
    pub poem: Poem,
    pub pronunciation: PoemPronunciation,
    pub syllables: Vec<usize>,
    pub scheme: Vec<RhymeLabel>,
}

impl PoemAnalysis {
    /// Scan raw poem text against `dictionary`.
    pub fn run(
        raw: &str,
        dictionary: &PronouncingDictionary,
        config: &ScanConfig,
    ) -> ScanResult<Self> {
        let poem = normalize_poem_with(raw, config.empty_words)?;
        if poem.is_empty() {
            tracing::info!("poem has no words");
        }

        let missing = dictionary.missing_words(&poem);
        if !missing.is_empty() {
            tracing::warn!(
                count = missing.len(),
                words = %missing.join(", "),
                "words missing from the pronouncing dictionary"
            );
        }

        let pronunciation = map_poem(&poem, dictionary)?;
        let syllables = count_syllables(&pronunciation);
        let scheme = rhyme_scheme(&pronunciation)?;
        Ok(PoemAnalysis {
            poem,
            pronunciation,
            syllables,
            scheme,
        })
    }

    /// Compare this poem with one form.
    pub fn check(&self, form: &PoetryForm, config: &ScanConfig) -> FormReport {
        check_form(form, &self.syllables, &self.scheme, config.strict_rhymes)
    }

    /// Check against every form in `catalog`, in catalog order.
    pub fn check_all(&self, catalog: &FormCatalog, config: &ScanConfig) -> Vec<FormReport> {
        catalog.iter().map(|form| self.check(form, config)).collect()
    }

    /// Names of the catalog forms this poem fits.
    pub fn matching_forms<'a>(&self, catalog: &'a FormCatalog, config: &ScanConfig) -> Vec<&'a str> {
        catalog
            .iter()
            .filter(|form| self.check(form, config).is_match())
            .map(|form| form.name.as_str())
            .collect()
    }

    /// Label / syllable / text table, one row per line.
    pub fn scansion_table(&self) -> String {
        render_scansion(&self.poem, &self.syllables, &self.scheme)
    }

    /// The phoneme grid, as rendered by `stanza_prosody::render()`.
    pub fn phonemes(&self) -> String {
        render(&self.pronunciation)
    }
}

/// Read and scan each poem file in parallel. Output order matches `paths`.
pub fn analyze_files(
    paths: &[PathBuf],
    dictionary: &PronouncingDictionary,
    config: &ScanConfig,
) -> Vec<ScanResult<PoemAnalysis>> {
    paths
        .par_iter()
        .map(|path| analyze_file(path, dictionary, config))
        .collect()
}

/// Read and scan one poem file.
pub fn analyze_file(
    path: &Path,
    dictionary: &PronouncingDictionary,
    config: &ScanConfig,
) -> ScanResult<PoemAnalysis> {
    let raw = crate::read_text(path)?;
    let _span = tracing::debug_span!("poem", path = %path.display()).entered();
    PoemAnalysis::run(&raw, dictionary, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScanError;
    use crate::cmudict::parse_dictionary;
    use stanza_prosody::{EmptyWordPolicy, ProsodyError};

    const DICTIONARY: &str = ";;; test vocabulary
IS  IH1 Z
THIS  DH IH1 S
MIC  M AY1 K
ON  AA1 N
GET  G EH1 T
OFF  AO1 F
MY  M AY1
LAWN  L AO1 N
HMM  HH M
";

    fn dictionary() -> PronouncingDictionary {
        parse_dictionary(DICTIONARY, ";;;").unwrap()
    }

    #[test]
    fn test_run_scenario() {
        let analysis =
            PoemAnalysis::run("Is this mic on?\n\nGet off my lawn.\n", &dictionary(), &ScanConfig::default())
                .unwrap();
        assert_eq!(analysis.poem.len(), 2);
        assert_eq!(analysis.syllables, vec![4, 4]);
        assert_eq!(
            analysis.scheme.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        assert_eq!(
            analysis.phonemes(),
            "IH1 Z | DH IH1 S | M AY1 K | AA1 N\nG EH1 T | AO1 F | M AY1 | L AO1 N"
        );
        assert_eq!(analysis.scansion_table(), "A   4  IS THIS MIC ON\nB   4  GET OFF MY LAWN");
    }

    #[test]
    fn test_run_missing_word() {
        let err = PoemAnalysis::run("Is this mic working?", &dictionary(), &ScanConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ScanError::Prosody(ProsodyError::MissingPronunciation { line: 0, ref word }) if word == "WORKING"
        ));
    }

    #[test]
    fn test_run_malformed_line() {
        let err = PoemAnalysis::run("Get off my lawn\nHmm", &dictionary(), &ScanConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ScanError::Prosody(ProsodyError::MalformedLine { line: 1, .. })
        ));
    }

    #[test]
    fn test_run_respects_empty_word_policy() {
        let raw = "Get off -- my lawn";
        assert!(PoemAnalysis::run(raw, &dictionary(), &ScanConfig::default()).is_ok());
        let strict = ScanConfig {
            empty_words: EmptyWordPolicy::Reject,
            ..Default::default()
        };
        assert!(matches!(
            PoemAnalysis::run(raw, &dictionary(), &strict),
            Err(ScanError::Prosody(ProsodyError::EmptyWord { .. }))
        ));
    }

    #[test]
    fn test_run_empty_poem() {
        let analysis = PoemAnalysis::run("\n \n", &dictionary(), &ScanConfig::default()).unwrap();
        assert!(analysis.poem.is_empty());
        assert!(analysis.syllables.is_empty());
        assert!(analysis.scheme.is_empty());
    }

    #[test]
    fn test_matching_forms() {
        let catalog = FormCatalog::parse("Couplet\n0 A\n0 A\n\nPair\n4 *\n4 *\n\nSolo\n0 *\n", "*")
            .unwrap();
        let analysis =
            PoemAnalysis::run("Is this mic on?\nGet off my lawn.", &dictionary(), &ScanConfig::default())
                .unwrap();
        assert_eq!(analysis.matching_forms(&catalog, &ScanConfig::default()), vec!["Pair"]);
        let reports = analysis.check_all(&catalog, &ScanConfig::default());
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].unrhymed, vec![vec![0, 1]]);
    }

    #[test]
    fn test_analyze_files_keeps_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        std::fs::write(&first, "Is this mic on?").unwrap();
        std::fs::write(&second, "Get off my lawn.\nGet off my lawn.").unwrap();
        let missing = dir.path().join("missing.txt");

        let results = analyze_files(
            &[first, missing, second],
            &dictionary(),
            &ScanConfig::default(),
        );
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().poem.len(), 1);
        assert!(matches!(results[1], Err(ScanError::Io { .. })));
        assert_eq!(results[2].as_ref().unwrap().poem.len(), 2);
    }
}
