use std::sync::Arc;

use tracing::debug;

use super::*;

impl Session {
    /// Performs fusion candidate `index` from [`Session::available_fusions`].
    ///
    /// Both ingredients are removed by identity and the result is absorbed.
    /// The selection is validated before anything is removed.
    pub fn fuse_skills(&mut self, index: usize) -> Result<FusionOutcome> {
        self.ensure_running()?;

        let mut candidates = self.available_fusions();
        if candidates.is_empty() {
            return Ok(FusionOutcome::NoFusionAvailable);
        }
        if index >= candidates.len() {
            return Err(EngineError::SelectionOutOfRange { index, available: candidates.len() });
        }
        let chosen = candidates.swap_remove(index);

        for ingredient in [&chosen.first_skill, &chosen.second_skill] {
            self.player.skills.remove(&ingredient.identity);
        }
        self.player.absorb_skill(Arc::clone(&chosen.result));

        let consumed = [chosen.first_skill, chosen.second_skill];
        self.log.push(LogEvent::SkillsFused {
            consumed: [consumed[0].identity.clone(), consumed[1].identity.clone()],
            result: chosen.result.identity.clone(),
        });
        debug!(
            first = %consumed[0].identity,
            second = %consumed[1].identity,
            result = %chosen.result.identity,
            "skills fused"
        );
        Ok(FusionOutcome::Applied(FusionApplication { consumed, result: chosen.result }))
    }
}
