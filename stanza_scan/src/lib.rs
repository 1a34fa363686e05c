// Stanza scanner: file readers, form checking, and batch analysis around the
// `stanza_prosody` core.
//
// The core crate only transforms in-memory values. This crate supplies the
// values from disk and decides what the results mean for a given form:
//
// Architecture:
// - `cmudict.rs`: CMU-format pronouncing dictionary -> `PronouncingDictionary`
// - `forms.rs`: `PoetryForm`, `PatternLabel`, `FormCatalog`, built-in catalog
// - `check.rs`: compare syllable counts and rhyme scheme with a form
// - `analysis.rs`: `PoemAnalysis` (the whole pipeline for one poem) and
//   parallel analysis of several poem files
// - `config.rs`: `ScanConfig`, loaded from JSON
// - `error.rs`: `ScanError`
// - `main.rs`: the `scan_poem` command-line driver
//
// Raw poem text is read verbatim; blank lines and surrounding whitespace are
// removed once, by the core normalizer.

pub mod analysis;
pub mod check;
pub mod cmudict;
pub mod config;
pub mod error;
pub mod forms;

pub use analysis::{PoemAnalysis, analyze_file, analyze_files};
pub use check::{FormReport, SyllableMismatch, check_form};
pub use cmudict::{load_dictionary, parse_dictionary};
pub use config::ScanConfig;
pub use error::{ScanError, ScanResult};
pub use forms::{FormCatalog, PatternLabel, PoetryForm, default_catalog};

use std::path::Path;

/// Read a whole text file, attaching the path to any I/O error.
pub fn read_text(path: &Path) -> ScanResult<String> {
    std::fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })
}
