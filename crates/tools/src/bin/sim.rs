use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use game_core::random::seeded;
use game_core::{FusionTable, RunOutcome, Session, SkillCatalog};
use odyssey_tools::autopilot::Autopilot;
use odyssey_tools::rules_file::rules_or_default;

#[derive(Parser)]
#[command(author, version, about = "Runs seeded autopilot sessions and reports outcomes", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 100)]
    runs: u64,
    #[arg(short, long, default_value_t = 1000)]
    max_actions: u32,
    /// Fights per layer before the autopilot climbs
    #[arg(long, default_value_t = 2)]
    fights_per_layer: u32,
    /// Optional TOML file overriding the default rules
    #[arg(long)]
    rules: Option<PathBuf>,
}

#[derive(Default)]
struct Tally {
    victories: u64,
    defeats: u64,
    unfinished: u64,
    encounters: u64,
    defeat_depths: Vec<i32>,
}

fn main() -> Result<()> {
    odyssey_tools::logging::init();
    let args = Args::parse();
    let rules = rules_or_default(args.rules.as_deref())?;

    println!(
        "Simulating {} runs from seed {} (max {} actions each)...",
        args.runs, args.seed, args.max_actions
    );
    let mut tally = Tally::default();

    for run in 0..args.runs {
        let seed = args.seed.wrapping_add(run);
        let mut rng = seeded(seed);
        let mut session = Session::with_content(
            SkillCatalog::builtin(),
            FusionTable::builtin(),
            rules.clone(),
            &mut rng,
        )?;
        let mut pilot = Autopilot::new(args.fights_per_layer, 40);

        for _ in 0..args.max_actions {
            if session.is_finished() {
                break;
            }
            let action = pilot.next_action(&session);
            session.apply(action, &mut rng)?;

            // Assert invariants
            let player = session.player();
            if player.health() > player.max_health() {
                bail!("Invariant failed: HP > Max HP on seed {seed}");
            }
            let unique: BTreeSet<&str> = player.skills.identities().collect();
            if unique.len() != player.skills.len() {
                bail!("Invariant failed: duplicate skill identity on seed {seed}");
            }
        }

        tally.encounters += u64::from(session.encounters());
        match session.outcome() {
            Some(RunOutcome::Victory) => tally.victories += 1,
            Some(RunOutcome::Defeat) => {
                tally.defeats += 1;
                tally.defeat_depths.push(session.depth_layer());
            }
            None => tally.unfinished += 1,
        }
        tracing::debug!(seed, outcome = ?session.outcome(), hash = session.snapshot_hash(), "run finished");
    }

    println!("Victories:  {}", tally.victories);
    println!("Defeats:    {}", tally.defeats);
    println!("Unfinished: {}", tally.unfinished);
    if args.runs > 0 {
        println!("Encounters per run: {:.2}", tally.encounters as f64 / args.runs as f64);
    }
    if !tally.defeat_depths.is_empty() {
        let total: i64 = tally.defeat_depths.iter().map(|depth| i64::from(*depth)).sum();
        println!(
            "Average defeat layer: {:.2}",
            total as f64 / tally.defeat_depths.len() as f64
        );
    }
    println!("Simulation completed successfully.");
    Ok(())
}
