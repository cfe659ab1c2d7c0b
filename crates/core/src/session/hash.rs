//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from session rules.
//! It does not own replay execution or journal recording.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Session {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_i32(self.player.depth_layer);
        hasher.write_u32(self.player.health());
        hasher.write_u32(self.player.max_health());
        hasher.write_u32(self.encounters);
        hasher.write_u8(match self.outcome {
            None => 0,
            Some(RunOutcome::Victory) => 1,
            Some(RunOutcome::Defeat) => 2,
        });
        hasher.write_u64(self.player.skills.len() as u64);
        for identity in self.player.skills.identities() {
            hasher.write(identity.as_bytes());
            hasher.write_u8(0xff);
        }
        hasher.write_u64(self.pending_candidates().len() as u64);
        hasher.write_u8(u8::from(self.evolution_roll_pending));
        hasher.finish()
    }
}
