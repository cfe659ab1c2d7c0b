use tracing::{debug, info};

use super::*;

impl Session {
    /// Climbs one layer and recovers a little health, or leaves the dungeon
    /// when already on the shallowest layer.
    pub fn ascend(&mut self) -> Result<AscendResult> {
        self.ensure_running()?;
        self.clear_pending();

        if self.player.depth_layer >= self.rules.final_depth {
            self.outcome = Some(RunOutcome::Victory);
            self.log.push(LogEvent::SurfaceReached);
            info!(encounters = self.encounters, "surface reached");
            return Ok(AscendResult::SurfaceReached);
        }

        self.player.depth_layer += 1;
        let healed = self.player.vitals.heal(self.rules.ascend_heal);
        let depth_layer = self.player.depth_layer;
        self.log.push(LogEvent::Ascended { depth_layer, healed });
        debug!(depth_layer, healed, "ascended");
        Ok(AscendResult::Ascended { depth_layer, healed })
    }
}
