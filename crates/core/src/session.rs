//! The progression controller: one player's run from the depths to the surface.

use tracing::debug;

use crate::content::{SkillCatalog, SkillRef};
use crate::creature::Player;
use crate::error::{EngineError, Result};
use crate::fusion::{FusionCandidate, FusionTable};
use crate::random::RandomSource;
use crate::rules::Rules;
use crate::types::*;

mod ascend;
mod encounter;
mod fusing;
mod hash;


/// Owns the player and the fusion table for the lifetime of one run.
///
/// Every operation that needs randomness takes the random source explicitly,
/// so a seed (or a scripted source) fully determines the run.
pub struct Session {
    catalog: SkillCatalog,
    fusions: FusionTable,
    rules: Rules,
    player: Player,
    outcome: Option<RunOutcome>,
    // Unanswered offer from the last victory; dropped when the player moves on.
    pending_absorb: Option<Vec<SkillRef>>,
    evolution_roll_pending: bool,
    encounters: u32,
    log: Vec<LogEvent>,
}

impl Session {
    /// A run with the built-in catalog, fusion rules and default rules.
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        Self::with_content(SkillCatalog::builtin(), FusionTable::builtin(), Rules::default(), rng)
    }

    pub fn with_content<R: RandomSource + ?Sized>(
        catalog: SkillCatalog,
        fusions: FusionTable,
        rules: Rules,
        rng: &mut R,
    ) -> Result<Self> {
        rules.ensure_valid_for(&catalog)?;
        let player = Player::spawn(&catalog, &rules, rng)?;
        Self::from_player(player, catalog, fusions, rules)
    }

    /// Resumes from an existing player. Rejects rules the catalog cannot satisfy.
    pub fn from_player(
        player: Player,
        catalog: SkillCatalog,
        fusions: FusionTable,
        rules: Rules,
    ) -> Result<Self> {
        rules.ensure_valid_for(&catalog)?;
        debug!(
            depth = player.depth_layer,
            skills = ?player.skills.identities().collect::<Vec<_>>(),
            "session started"
        );
        Ok(Self {
            catalog,
            fusions,
            rules,
            player,
            outcome: None,
            pending_absorb: None,
            evolution_roll_pending: false,
            encounters: 0,
            log: Vec::new(),
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn fusions(&self) -> &FusionTable {
        &self.fusions
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn depth_layer(&self) -> i32 {
        self.player.depth_layer
    }

    pub fn encounters(&self) -> u32 {
        self.encounters
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Skills offered by the last victory that has not been answered yet.
    pub fn pending_candidates(&self) -> &[SkillRef] {
        self.pending_absorb.as_deref().unwrap_or_default()
    }

    pub fn evolution_roll_pending(&self) -> bool {
        self.evolution_roll_pending
    }

    pub fn available_fusions(&self) -> Vec<FusionCandidate> {
        self.fusions.find_all_fusions(&self.player.skills)
    }

    /// Dispatches one journaled action.
    pub fn apply<R: RandomSource + ?Sized>(
        &mut self,
        action: SessionAction,
        rng: &mut R,
    ) -> Result<ActionResult> {
        Ok(match action {
            SessionAction::Explore => ActionResult::Explore(self.explore(rng)?),
            SessionAction::Absorb { index } => ActionResult::Absorb(self.absorb(index)?),
            SessionAction::Evolve => ActionResult::Evolve(self.maybe_evolve(rng)),
            SessionAction::Fuse { index } => ActionResult::Fuse(self.fuse_skills(index)?),
            SessionAction::Ascend => ActionResult::Ascend(self.ascend()?),
        })
    }

    fn ensure_running(&self) -> Result<()> {
        if self.is_finished() {
            return Err(EngineError::SessionFinished);
        }
        Ok(())
    }

    fn clear_pending(&mut self) {
        self.pending_absorb = None;
        self.evolution_roll_pending = false;
    }

    fn skill_names(skills: &[SkillRef]) -> Vec<String> {
        skills.iter().map(|skill| skill.identity.clone()).collect()
    }
}
