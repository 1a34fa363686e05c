// Stanza scanner CLI entry point.
//
// Scans one or more poems against a pronouncing dictionary and reports, for
// each poem, its scansion table and either the verdict for one named form or
// the list of catalog forms it fits.
//
// Usage:
//   scan_poem [OPTIONS] <POEM>...
//     -d, --dictionary <PATH>  CMU-format dictionary (default: data/dictionary.txt)
//         --forms <PATH>       Form catalog (default: built-in catalog)
//     -f, --form <NAME>        Check only this form, with details
//     -c, --config <PATH>      JSON config (see config.rs)
//         --json               Emit JSON instead of text
//         --phonemes           Also print each line's phonemes
//
// Logging goes to stderr through tracing; set RUST_LOG=debug for detail.
// Exit code 1 on any error, including an unreadable or unscannable poem.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use stanza_scan::{
    FormCatalog, FormReport, PoemAnalysis, ScanConfig, ScanResult, analyze_files, default_catalog,
    load_dictionary,
};

#[derive(Parser, Debug)]
#[command(name = "scan_poem")]
#[command(about = "Check poems against poetic forms using a pronouncing dictionary")]
struct Args {
    /// Poem files to scan
    #[arg(required = true)]
    poems: Vec<PathBuf>,

    /// Pronouncing dictionary in CMU format
    #[arg(short, long, default_value = "data/dictionary.txt")]
    dictionary: PathBuf,

    /// Poetry form catalog (the built-in catalog when omitted)
    #[arg(long)]
    forms: Option<PathBuf>,

    /// Check only this form and explain any mismatch
    #[arg(short, long)]
    form: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Print each line's phonemes
    #[arg(long)]
    phonemes: bool,
}

/// JSON output for one poem.
#[derive(Serialize)]
struct PoemOutput<'a> {
    path: &'a str,
    analysis: &'a PoemAnalysis,
    reports: Vec<FormReport>,
    matches: Vec<&'a str>,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(args: &Args) -> ScanResult<()> {
    let config = match &args.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };
    let catalog = match &args.forms {
        Some(path) => FormCatalog::load(path, &config.wildcard)?,
        None => default_catalog(),
    };
    // Resolve the form before the expensive part so a typo fails fast.
    let form = args
        .form
        .as_deref()
        .map(|name| catalog.require(name))
        .transpose()?;
    let dictionary = load_dictionary(&args.dictionary, &config.comment_marker)?;
    tracing::info!(
        words = dictionary.len(),
        forms = catalog.len(),
        poems = args.poems.len(),
        "loaded dictionary and catalog"
    );

    let results = analyze_files(&args.poems, &dictionary, &config);
    let mut json_out = Vec::new();

    for (path, result) in args.poems.iter().zip(results) {
        let analysis = result?;
        let reports = match form {
            Some(form) => vec![analysis.check(form, &config)],
            None => analysis.check_all(&catalog, &config),
        };

        if args.json {
            let path = path.to_string_lossy().into_owned();
            json_out.push((path, analysis, reports));
            continue;
        }

        println!("== {}", path.display());
        println!("{}", analysis.scansion_table());
        if args.phonemes {
            println!();
            println!("{}", analysis.phonemes());
        }
        println!();
        if form.is_some() {
            for report in &reports {
                println!("{report}");
            }
        } else {
            let matches: Vec<&str> = reports
                .iter()
                .filter(|r| r.is_match())
                .map(|r| r.form.as_str())
                .collect();
            if matches.is_empty() {
                println!("Matching forms: none");
            } else {
                println!("Matching forms: {}", matches.join(", "));
            }
        }
        println!();
    }

    if args.json {
        let output: Vec<PoemOutput<'_>> = json_out
            .iter()
            .map(|(path, analysis, reports)| PoemOutput {
                path,
                analysis,
                matches: reports
                    .iter()
                    .filter(|r| r.is_match())
                    .map(|r| r.form.as_str())
                    .collect(),
                reports: reports.clone(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
