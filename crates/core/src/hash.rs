//! Stable snapshot hashing for replay verification.
//!
//! Hashes cover what a player could observe plus pile order, so two runs with equal hashes
//! will also agree on every future command. Values are stable for a given build.

use std::hash::{Hash, Hasher};

use slotmap::Key;
use xxhash_rust::xxh3::Xxh3;

use crate::battle::Battle;
use crate::run::RunState;
use crate::types::CardId;

fn write_card_id(hasher: &mut Xxh3, id: CardId) {
    hasher.write_u64(id.data().as_ffi());
}

fn write_battle(hasher: &mut Xxh3, battle: &Battle) {
    hasher.write_u32(battle.turn());
    battle.status().hash(hasher);
    battle.player().hash(hasher);
    battle.enemy().hash(hasher);
    for id in battle.hand_ids() {
        write_card_id(hasher, *id);
    }
    hasher.write_u8(0xfe);
    for id in battle.draw_pile_ids() {
        write_card_id(hasher, id);
    }
    hasher.write_u8(0xfe);
    for id in battle.discard_pile_ids() {
        write_card_id(hasher, *id);
    }
    hasher.write_u64(battle.log().len() as u64);
}

impl RunState {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed());
        hasher.write_u64(self.commands_applied());
        self.config().hash(&mut hasher);
        self.phase().hash(&mut hasher);
        hasher.write(&self.tree().canonical_bytes());
        hasher.write_u32(self.current_node_id().0);

        hasher.write_i32(self.player_hp());
        hasher.write_i32(self.player_max_hp());
        hasher.write_u32(self.max_energy());
        hasher.write_u32(self.draw_bonus());
        hasher.write_u32(self.gold());
        hasher.write_u32(self.battles_won());
        hasher.write_u32(self.earned_points());
        self.pending_battle_buff().hash(&mut hasher);
        self.outcome().hash(&mut hasher);

        hasher.write_u64(self.deck().len() as u64);
        for (id, card) in self.deck().iter() {
            write_card_id(&mut hasher, id);
            card.hash(&mut hasher);
        }
        self.reward_offer().hash(&mut hasher);
        self.shop().hash(&mut hasher);
        hasher.write_u8(self.removals_left());

        match self.battle() {
            Some(battle) => {
                hasher.write_u8(1);
                write_battle(&mut hasher, battle);
            }
            None => hasher.write_u8(0),
        }
        hasher.write_u64(self.log().len() as u64);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::RunConfig;
    use crate::progression::ProgressionRecord;
    use crate::run::RunState;
    use crate::types::RunCommand;

    #[test]
    fn hash_tracks_state_changes() {
        let record = ProgressionRecord::default();
        let config = RunConfig::default();
        let mut first = RunState::new(8, &record, &config);
        let second = RunState::new(8, &record, &config);
        assert_eq!(first.snapshot_hash(), second.snapshot_hash());
        assert_ne!(first.snapshot_hash(), RunState::new(9, &record, &config).snapshot_hash());

        first.apply(RunCommand::EndTurn).expect("end turn");
        assert_ne!(first.snapshot_hash(), second.snapshot_hash());
    }
}
