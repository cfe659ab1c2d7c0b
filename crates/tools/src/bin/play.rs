use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use game_core::random::seeded;
use game_core::{
    ActionResult, EncounterResult, FusionOutcome, FusionTable, InputJournal, RunOutcome, Session,
    SessionAction, Side, SkillCatalog,
};
use odyssey_tools::render;
use odyssey_tools::rules_file::rules_or_default;
use rand_chacha::ChaCha8Rng;

#[derive(Parser)]
#[command(author, version, about = "Play a session in the terminal", long_about = None)]
struct Args {
    /// Seed for the run; a fresh one is generated when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Optional TOML file overriding the default rules
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Write the input journal to this JSON file when the session ends
    #[arg(long)]
    record: Option<PathBuf>,
}

struct Console<R> {
    input: R,
}

impl<R: BufRead> Console<R> {
    /// `None` on end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        print!("{text}");
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }
}

fn generate_seed() -> u64 {
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let mut value = (nanos as u64) ^ u64::from(process::id()).rotate_left(17);
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value ^ (value >> 31)
}

struct Game<R> {
    console: Console<R>,
    session: Session,
    rng: ChaCha8Rng,
    journal: InputJournal,
}

impl<R: BufRead> Game<R> {
    fn apply(&mut self, action: SessionAction) -> Result<ActionResult> {
        let result = self.session.apply(action, &mut self.rng)?;
        self.journal.append(action);
        Ok(result)
    }

    fn run(&mut self) -> Result<()> {
        println!("Welcome to Predator's Odyssey!\n");
        println!("You awaken in the depths of a dark dungeon.  You feel strangely hungry...\n");

        while !self.session.is_finished() {
            println!("{}\n", render::status_line(&self.session));
            println!("Skills:");
            for skill in self.session.player().skills.iter() {
                println!("  - {}", skill.identity);
            }
            println!("\nWhat would you like to do?");
            println!("  1. Explore (fight a random enemy)");
            println!("  2. Fuse skills");
            println!("  3. Ascend to the next layer");
            println!("  4. Quit");
            let Some(choice) = self.console.prompt("Enter your choice: ")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.explore()?,
                "2" => self.fuse()?,
                "3" => self.ascend()?,
                "4" => {
                    println!("Thanks for playing!\n");
                    break;
                }
                _ => println!("Invalid choice.  Please enter 1, 2, 3 or 4.\n"),
            }
        }

        match self.session.outcome() {
            Some(RunOutcome::Victory) => println!(
                "You survived the depths and emerged stronger than before.\n"
            ),
            Some(RunOutcome::Defeat) => println!("\nGAME OVER - your journey ends here.\n"),
            None => {}
        }
        Ok(())
    }

    fn explore(&mut self) -> Result<()> {
        let ActionResult::Explore(encounter) = self.apply(SessionAction::Explore)? else {
            return Ok(());
        };
        println!("\n{}\n", render::encounter_intro(&encounter));
        for line in render::battle_lines(&encounter.enemy().name, encounter.battle()) {
            println!("{line}");
        }
        println!(
            "(You dealt {} damage and took {}.)",
            encounter.battle().damage_dealt_by(Side::Player),
            encounter.battle().damage_dealt_by(Side::Enemy)
        );

        let EncounterResult::Victory { enemy, candidates, .. } = encounter else {
            println!("\nYou have been defeated...");
            return Ok(());
        };
        println!("\nYou defeated the {}!\n", enemy.name);

        println!("Which skill would you like to absorb?");
        for line in render::absorb_menu(&candidates) {
            println!("{line}");
        }
        let index = loop {
            let Some(raw) = self.console.prompt("Enter the number of the skill: ")? else {
                return Ok(());
            };
            match render::parse_selection(&raw, candidates.len()) {
                Some(index) => break index,
                None => println!("Invalid selection.  Please choose a valid number."),
            }
        };
        if let ActionResult::Absorb(absorbed) =
            self.apply(SessionAction::Absorb { index })?
        {
            println!("You devour the {} and learn {}!\n", enemy.name, absorbed.skill.identity);
        }

        if let ActionResult::Evolve(Some(evolution)) = self.apply(SessionAction::Evolve)? {
            println!(
                "\n[EVOLUTION] You feel your body changing, your skin thickens and your vitality grows! (Max HP {})\n",
                evolution.max_health
            );
        }
        Ok(())
    }

    fn fuse(&mut self) -> Result<()> {
        if self.session.player().skills.len() < 2 {
            println!("You need at least two skills to attempt a fusion.\n");
            return Ok(());
        }
        let candidates = self.session.available_fusions();
        if candidates.is_empty() {
            println!("None of your current skills can be fused together right now.\n");
            return Ok(());
        }
        println!("Possible fusions:");
        for line in render::fusion_menu(&candidates) {
            println!("{line}");
        }
        loop {
            let Some(raw) = self.console.prompt(
                "Enter the number of the fusion to perform (or press Enter to cancel): ",
            )?
            else {
                return Ok(());
            };
            if raw.is_empty() {
                println!("Fusion cancelled.\n");
                return Ok(());
            }
            let Ok(number) = raw.parse::<usize>() else {
                println!("Invalid choice.  Please enter a valid number or press Enter to cancel.");
                continue;
            };
            let Some(index) = number.checked_sub(1) else {
                println!("Invalid choice.  Please enter a valid number or press Enter to cancel.");
                continue;
            };
            match self.session.fuse_skills(index) {
                Ok(FusionOutcome::Applied(application)) => {
                    self.journal.append(SessionAction::Fuse { index });
                    println!(
                        "\nYou fused {} and {} into {}!\n",
                        application.consumed[0].identity,
                        application.consumed[1].identity,
                        application.result.identity
                    );
                    return Ok(());
                }
                Ok(FusionOutcome::NoFusionAvailable) => return Ok(()),
                Err(err) if err.is_recoverable() => {
                    println!("Invalid choice.  Please enter a valid number or press Enter to cancel.");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn ascend(&mut self) -> Result<()> {
        if let ActionResult::Ascend(result) = self.apply(SessionAction::Ascend)? {
            println!("{}\n", render::ascend_message(&result));
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    odyssey_tools::logging::init();
    let args = Args::parse();
    let rules = rules_or_default(args.rules.as_deref())?;
    let seed = args.seed.unwrap_or_else(generate_seed);
    tracing::info!(seed, "starting session");

    let mut rng = seeded(seed);
    let session =
        Session::with_content(SkillCatalog::builtin(), FusionTable::builtin(), rules, &mut rng)?;
    let stdin = io::stdin();
    let mut game = Game {
        console: Console { input: stdin.lock() },
        session,
        rng,
        journal: InputJournal::new(seed),
    };
    game.run()?;

    if let Some(path) = args.record {
        fs::write(&path, game.journal.to_json()?)
            .with_context(|| format!("Failed to write journal file: {}", path.display()))?;
        tracing::info!(path = %path.display(), inputs = game.journal.inputs.len(), "journal written");
    }
    Ok(())
}
