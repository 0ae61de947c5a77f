//! mtk-clean - apply tag normalization rules to media tag snapshots
//!
//! **Usage:**
//! ```bash
//! mtk-clean [--config <file>] [--rules <file>] [--output <file>] <snapshot.json>...
//! mtk-clean --list-rules
//! ```
//!
//! Each input is a JSON array of tag records. Cleaned records are written
//! back to the input file, or to `--output` when a single input is given.

use anyhow::{bail, Context, Result};
use clap::Parser;
use mtk_clean::rule_set::load_rules;
use mtk_clean::snapshot::{read_snapshot, write_snapshot};
use mtk_clean::{clean_records, CleanSummary};
use mtk_common::config::{load_config, resolve_rules_source, RULES_ENV_VAR};
use mtk_common::logging::init_tracing;
use std::path::PathBuf;
use tracing::info;

/// Tag cleaning utility
#[derive(Parser, Debug)]
#[clap(name = "mtk-clean")]
#[clap(about = "Normalize media tag snapshots with a declarative rule set")]
struct Args {
    /// Configuration file (TOML)
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rule definition file (JSON), overrides MTK_RULES_FILE and the config
    #[clap(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Write cleaned records here instead of back to the input file
    #[clap(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the effective rule set as JSON and exit
    #[clap(long)]
    list_rules: bool,

    /// Load rule sets that contain unusable rules instead of refusing them
    #[clap(long)]
    no_strict: bool,

    /// Tag snapshot files
    #[clap(value_name = "INPUT")]
    inputs: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, config_source) =
        load_config(args.config.as_deref()).context("Failed to load configuration")?;

    init_tracing(&config.logging)?;

    info!(
        "Starting mtk-clean v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    config_source.report();

    let source = resolve_rules_source(args.rules.as_deref(), RULES_ENV_VAR, &config);
    let strict = config.strict && !args.no_strict;
    let rules = load_rules(&source, strict)
        .with_context(|| format!("Failed to load rules from {:?}", source))?;

    if args.list_rules {
        println!("{}", rules.to_json()?);
        return Ok(());
    }

    if args.inputs.is_empty() {
        bail!("No input snapshot files given");
    }
    if args.output.is_some() && args.inputs.len() > 1 {
        bail!("--output needs exactly one input file");
    }

    let mut total = CleanSummary::default();

    for input in &args.inputs {
        let mut records = read_snapshot(input)
            .with_context(|| format!("Failed to read snapshot {}", input.display()))?;

        let summary = clean_records(&rules, &mut records);

        let target = args.output.as_deref().unwrap_or(input);
        if summary.updated > 0 || target != input.as_path() {
            write_snapshot(target, &records)
                .with_context(|| format!("Failed to write snapshot {}", target.display()))?;
        }

        info!(
            file = %input.display(),
            checked = summary.checked,
            updated = summary.updated,
            "Snapshot cleaned"
        );
        total.merge(summary);
    }

    info!(checked = total.checked, updated = total.updated, "Cleaning complete");

    Ok(())
}
