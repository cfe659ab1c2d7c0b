use anyhow::{Context, Result};
use clap::Parser;
use game_core::{InputJournal, ReplayResult, replay::replay_with_rules};
use odyssey_tools::rules_file::rules_or_default;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: String,
    /// Rules the run was recorded under, when not the defaults
    #[arg(long)]
    rules: Option<PathBuf>,
}

fn main() -> Result<()> {
    odyssey_tools::logging::init();
    let args = Args::parse();
    let rules = rules_or_default(args.rules.as_deref())?;

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal))?;
    let journal =
        InputJournal::from_json(&journal_data).with_context(|| "Failed to deserialize journal JSON")?;
    tracing::info!(seed = journal.seed, inputs = journal.inputs.len(), "replaying journal");

    let result: ReplayResult =
        replay_with_rules(&journal, rules).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Actions applied: {}", result.actions_applied);
    println!("Final Layer: {}", result.final_depth);
    println!("Outcome: {:?}", result.final_outcome);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
