use anyhow::{bail, Result};
use autofill_core::classifier::FilenameClassifier;
use autofill_core::config;
use autofill_core::config::AppConfig;
use autofill_core::filename::parse_filename;
use autofill_core::pipeline::{Autofill, StartOutcome};
use autofill_core::suggester::SubjectSuggester;
use clap::{Parser, Subcommand};
use cli::report::{print_outcomes, PrintSink};
use cli::snapshot::PageSnapshot;
use cli::watch;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::Level;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify { filenames, json } => run_classify(&cfg, &filenames, json),
        Commands::Keywords { title, json } => run_keywords(&cfg, &title, json),
        Commands::Suggest { snapshot, json } => run_suggest(&cfg, &snapshot, json),
        Commands::Fill {
            snapshot,
            write,
            json,
        } => run_fill(&cfg, &snapshot, write, json),
        Commands::Run {
            snapshot,
            write,
            json,
        } => run_start(&cfg, &snapshot, write, json).await,
        Commands::Watch {
            snapshot,
            write,
            json,
        } => watch::watch_snapshot(cfg, snapshot, write, json).await,
    }
}

#[derive(Parser)]
#[command(name = "eprints-autofill", version, about = "EPrints deposit autofill")]
struct Cli {
    /// Path to config TOML
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify uploaded filenames into description, visibility and language
    Classify {
        #[arg(required = true)]
        filenames: Vec<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the signal keywords extracted from a title
    Keywords {
        title: String,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Build the subject suggestion panel for a page snapshot
    Suggest {
        snapshot: PathBuf,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill every upload entry of a page snapshot once
    Fill {
        snapshot: PathBuf,
        /// Save the filled snapshot back to disk
        #[arg(long)]
        write: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Detect the page stage and run its pipeline after the startup delay
    Run {
        snapshot: PathBuf,
        /// Save the filled snapshot back to disk
        #[arg(long)]
        write: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill the snapshot, then re-scan whenever new entries appear in it
    Watch {
        snapshot: PathBuf,
        /// Save the filled snapshot back to disk after each pass
        #[arg(long)]
        write: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

fn run_classify(cfg: &AppConfig, filenames: &[String], json: bool) -> Result<()> {
    let classifier = FilenameClassifier::from_config(&cfg.classifier);
    let mut rows = Vec::new();
    for raw in filenames {
        let parsed = parse_filename(raw);
        let result = classifier.classify(raw);
        if json {
            rows.push(json!({
                "filename": raw,
                "parsed": parsed,
                "result": result,
            }));
        } else {
            println!(
                "{:?} -> {} | {} | {}",
                raw,
                result.canonical_label,
                classifier.visibility_label(result.visibility_tier),
                classifier.language_label(result.language),
            );
        }
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    }
    Ok(())
}

fn run_keywords(cfg: &AppConfig, title: &str, json: bool) -> Result<()> {
    let suggester = SubjectSuggester::new(&cfg.suggester);
    let extractor = suggester.extractor();
    let keywords = extractor.extract(extractor.strip_title_prefix(title));
    if json {
        println!("{}", serde_json::to_string_pretty(&keywords)?);
    } else if keywords.is_empty() {
        println!("(none)");
    } else {
        println!("{}", keywords.iter().cloned().collect::<Vec<_>>().join(", "));
    }
    Ok(())
}

fn run_suggest(cfg: &AppConfig, snapshot: &Path, json: bool) -> Result<()> {
    let page = PageSnapshot::load(snapshot)?;
    let autofill = Autofill::new(cfg);
    let mut sink = PrintSink::new(json);
    if autofill.run_subject_suggestion_now(&page, &mut sink).is_none() {
        bail!("snapshot {:?} has no title or no subject tree", snapshot);
    }
    Ok(())
}

fn run_fill(cfg: &AppConfig, snapshot: &Path, write: bool, json: bool) -> Result<()> {
    let mut page = PageSnapshot::load(snapshot)?;
    let mut autofill = Autofill::new(cfg);
    let outcomes = autofill.run_file_classification_now(&mut page);
    print_outcomes(&outcomes, json)?;
    if write {
        page.save(snapshot)?;
    }
    Ok(())
}

async fn run_start(cfg: &AppConfig, snapshot: &Path, write: bool, json: bool) -> Result<()> {
    let mut page = PageSnapshot::load(snapshot)?;
    let mut autofill = Autofill::new(cfg);
    let mut sink = PrintSink::new(json);
    match autofill.start(&mut page, &mut sink).await {
        StartOutcome::Skipped(mode) => {
            println!("not a deposit edit page ({:?}), nothing to do", mode);
        }
        StartOutcome::Files(outcomes) => {
            print_outcomes(&outcomes, json)?;
            if write {
                page.save(snapshot)?;
            }
        }
        StartOutcome::Subjects(None) => {
            println!("no title or subject tree on the page");
        }
        StartOutcome::Subjects(Some(_)) => {}
    }
    Ok(())
}
