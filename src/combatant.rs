use crate::battle::stat_stages::{apply_stat_stage_multiplier, StatStages};
use crate::battle::tags::{BattlerTag, BattlerTags, StackBoost, TagAddOutcome};
use schema::{BattlerIndex, Move, MoveResult, StatType, TagKind};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum PlayerAction {
    // The index refers to the move's position in the combatant's moveset.
    UseMove { move_index: usize },
    Forfeit,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerType {
    Human,
    Npc,
}

/// One entry per move-use attempt, appended by the resolution engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveInvocationRecord {
    pub move_used: Move,
    pub result: MoveResult,
    pub targets: Vec<BattlerIndex>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            hp: 100,
            attack: 100,
            defense: 100,
            sp_attack: 100,
            sp_defense: 100,
            speed: 100,
        }
    }
}

/// A combatant on the field: stats, battle-scoped modifiers and its
/// move history.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub battler_index: BattlerIndex,
    pub player_type: PlayerType,
    pub level: u8,
    pub stats: BaseStats,
    current_hp: u16,
    pub moveset: Vec<Move>,
    pub stat_stages: StatStages,
    pub tags: BattlerTags,
    move_history: Vec<MoveInvocationRecord>,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        battler_index: BattlerIndex,
        player_type: PlayerType,
        level: u8,
        stats: BaseStats,
        moveset: Vec<Move>,
    ) -> Self {
        Self {
            name: name.into(),
            battler_index,
            player_type,
            level,
            stats,
            current_hp: stats.hp,
            moveset,
            stat_stages: StatStages::new(),
            tags: BattlerTags::new(),
            move_history: Vec::new(),
        }
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Set HP directly, clamped to max HP. Used for scenario setup.
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp());
    }

    /// Apply damage and return true if this caused the combatant to faint.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        let was_fainted = self.is_fainted();
        self.current_hp = self.current_hp.saturating_sub(damage);
        !was_fainted && self.is_fainted()
    }

    /// Restore HP up to max and return the amount actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp());
        self.current_hp - before
    }

    pub fn get_stat_stage(&self, stat: StatType) -> i8 {
        self.stat_stages.get(stat)
    }

    /// Base stat with the current stage multiplier applied.
    ///
    /// Accuracy and evasion have no base value and are handled by the
    /// hit check, so they report 0 here.
    pub fn effective_stat(&self, stat: StatType) -> u16 {
        let base = match stat {
            StatType::Atk => self.stats.attack,
            StatType::Def => self.stats.defense,
            StatType::SpAtk => self.stats.sp_attack,
            StatType::SpDef => self.stats.sp_defense,
            StatType::Spe => self.stats.speed,
            StatType::Acc | StatType::Eva => return 0,
        };
        apply_stat_stage_multiplier(base, self.get_stat_stage(stat))
    }

    pub fn add_tag(&mut self, kind: TagKind) -> TagAddOutcome {
        self.tags.add(kind)
    }

    /// Stack boosts waiting to be scheduled, one entry per stack.
    pub fn take_pending_boosts(&mut self) -> Vec<TagKind> {
        self.tags.take_pending_boosts()
    }

    pub fn apply_stack_boost(&mut self, kind: TagKind) -> Option<Vec<StackBoost>> {
        self.tags.apply_stack_boost(kind, &mut self.stat_stages)
    }

    pub fn remove_tag(&mut self, kind: TagKind) -> Option<BattlerTag> {
        self.tags.remove(kind, &mut self.stat_stages)
    }

    pub fn get_tag(&self, kind: TagKind) -> Option<&BattlerTag> {
        self.tags.get(kind)
    }

    /// Changes made through this reference bypass the tag hooks.
    pub fn get_tag_mut(&mut self, kind: TagKind) -> Option<&mut BattlerTag> {
        self.tags.get_mut(kind)
    }

    pub fn has_tag(&self, kind: TagKind) -> bool {
        self.tags.contains(kind)
    }

    pub fn stockpile_count(&self) -> u8 {
        self.tags.stack_count(TagKind::Stockpiling)
    }

    pub fn clear_turn_end_tags(&mut self) -> Vec<TagKind> {
        self.tags.clear_turn_end(&mut self.stat_stages)
    }

    pub fn record_move(&mut self, record: MoveInvocationRecord) {
        self.move_history.push(record);
    }

    pub fn get_move_history(&self) -> &[MoveInvocationRecord] {
        &self.move_history
    }

    pub fn last_move_record(&self) -> Option<&MoveInvocationRecord> {
        self.move_history.last()
    }
}
