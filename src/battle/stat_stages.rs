use crate::config::BattleConfig;
use schema::StatType;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

/// Per-combatant stat stage store, one clamped stage per `StatType`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatStages {
    stages: [i8; StatType::COUNT],
}

/// A single observed stage movement, used for event emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageChange {
    pub stat: StatType,
    pub old_stage: i8,
    pub new_stage: i8,
}

impl StageChange {
    pub fn applied(&self) -> i8 {
        self.new_stage - self.old_stage
    }
}

impl StatStages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current stage for a stat (0 if never modified)
    pub fn get(&self, stat: StatType) -> i8 {
        self.stages[stat.index()]
    }

    /// Set the stage for a stat, clamped to the stage bounds
    pub fn set(&mut self, stat: StatType, stage: i8) {
        self.stages[stat.index()] =
            stage.clamp(BattleConfig::MIN_STAT_STAGE, BattleConfig::MAX_STAT_STAGE);
    }

    /// Apply a delta and return the signed amount that actually landed.
    ///
    /// The result is smaller in magnitude than `delta` when the stage hits a
    /// bound, and zero when the stage already sits at that bound.
    pub fn apply_delta(&mut self, stat: StatType, delta: i8) -> i8 {
        let current = self.get(stat);
        let target = current
            .saturating_add(delta)
            .clamp(BattleConfig::MIN_STAT_STAGE, BattleConfig::MAX_STAT_STAGE);
        self.stages[stat.index()] = target;
        target - current
    }

    /// Reset every stage to 0
    pub fn clear(&mut self) {
        self.stages = [0; StatType::COUNT];
    }

    /// True if no stat carries a modification
    pub fn is_neutral(&self) -> bool {
        self.stages.iter().all(|stage| *stage == 0)
    }

    /// Stats whose stage differs between `before` and `self`, in stat order.
    pub fn changes_from(&self, before: &StatStages) -> Vec<StageChange> {
        StatType::iter()
            .filter(|stat| before.get(*stat) != self.get(*stat))
            .map(|stat| StageChange {
                stat,
                old_stage: before.get(stat),
                new_stage: self.get(stat),
            })
            .collect()
    }
}

/// Apply stat stage multipliers according to Pokemon formula
/// Negative stages: (2 / (2 + |stage|))
/// Positive stages: ((2 + stage) / 2)
pub fn apply_stat_stage_multiplier(base_stat: u16, stage: i8) -> u16 {
    let clamped_stage = stage.clamp(BattleConfig::MIN_STAT_STAGE, BattleConfig::MAX_STAT_STAGE);

    if clamped_stage == 0 {
        return base_stat;
    }

    let multiplier = if clamped_stage < 0 {
        2.0 / (2.0 + (-clamped_stage) as f64)
    } else {
        (2.0 + clamped_stage as f64) / 2.0
    };

    ((base_stat as f64) * multiplier).round() as u16
}

/// Accuracy/evasion use thirds instead of halves.
pub fn accuracy_stage_multiplier(stage: i8) -> f64 {
    let clamped_stage = stage.clamp(BattleConfig::MIN_STAT_STAGE, BattleConfig::MAX_STAT_STAGE);
    if clamped_stage < 0 {
        3.0 / (3.0 + (-clamped_stage) as f64)
    } else {
        (3.0 + clamped_stage as f64) / 3.0
    }
}
