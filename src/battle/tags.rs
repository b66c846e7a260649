use crate::battle::stat_stages::StatStages;
use crate::config::BattleConfig;
use schema::{StatType, TagKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{EnumCount, IntoEnumIterator};

/// Signed per-stat stage amounts a tag has actually applied to its holder.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatDeltas {
    deltas: [i8; StatType::COUNT],
}

impl StatDeltas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: StatType) -> i8 {
        self.deltas[stat.index()]
    }

    pub fn set(&mut self, stat: StatType, delta: i8) {
        self.deltas[stat.index()] = delta;
    }

    pub fn add(&mut self, stat: StatType, delta: i8) {
        let entry = &mut self.deltas[stat.index()];
        *entry = entry.saturating_add(delta);
    }

    pub fn iter_nonzero(&self) -> impl Iterator<Item = (StatType, i8)> + '_ {
        StatType::iter()
            .map(|stat| (stat, self.get(stat)))
            .filter(|(_, delta)| *delta != 0)
    }
}

/// Live volatile tag attached to a combatant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum BattlerTag {
    Stockpiling {
        count: u8,
        stat_changes: StatDeltas,
        /// Stacks whose stage boost has not been scheduled yet.
        #[serde(default)]
        pending_boosts: u8,
    },
    Protected,
}

/// One stat of a stack boost, as requested and as it landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackBoost {
    pub stat: StatType,
    pub requested: i8,
    pub applied: i8,
}

/// What happened when a tag was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAddOutcome {
    Added,
    Stacked { count: u8 },
    /// Stacking tag already at its limit. Nothing changed.
    AtMaximum,
    /// Non-stacking tag already present. Nothing changed.
    AlreadyPresent,
}

impl BattlerTag {
    fn fresh(kind: TagKind) -> Self {
        match kind {
            TagKind::Stockpiling => BattlerTag::Stockpiling {
                count: 0,
                stat_changes: StatDeltas::new(),
                pending_boosts: 0,
            },
            TagKind::Protected => BattlerTag::Protected,
        }
    }

    pub fn kind(&self) -> TagKind {
        match self {
            BattlerTag::Stockpiling { .. } => TagKind::Stockpiling,
            BattlerTag::Protected => TagKind::Protected,
        }
    }

    /// Stack counter for stacking tags, 1 for everything else.
    pub fn stack_count(&self) -> u8 {
        match self {
            BattlerTag::Stockpiling { count, .. } => *count,
            BattlerTag::Protected => 1,
        }
    }

    /// Stat deltas this tag has applied and will reverse on removal.
    pub fn stat_changes(&self) -> Option<&StatDeltas> {
        match self {
            BattlerTag::Stockpiling { stat_changes, .. } => Some(stat_changes),
            BattlerTag::Protected => None,
        }
    }

    fn max_stacks(&self) -> u8 {
        match self {
            BattlerTag::Stockpiling { .. } => BattleConfig::MAX_STOCKPILE_STACKS,
            BattlerTag::Protected => 1,
        }
    }

    /// Stage changes granted by each stack.
    pub fn stack_boosts(&self) -> &'static [(StatType, i8)] {
        match self {
            BattlerTag::Stockpiling { .. } => &[(StatType::Def, 1), (StatType::SpDef, 1)],
            BattlerTag::Protected => &[],
        }
    }

    /// Runs once per successful add, including the first one. The stack
    /// counts immediately; its stage boost waits until it is applied.
    fn on_stack(&mut self) {
        match self {
            BattlerTag::Stockpiling {
                count,
                pending_boosts,
                ..
            } => {
                *count += 1;
                *pending_boosts += 1;
            }
            BattlerTag::Protected => {}
        }
    }

    fn take_pending_boosts(&mut self) -> u8 {
        match self {
            BattlerTag::Stockpiling { pending_boosts, .. } => std::mem::take(pending_boosts),
            BattlerTag::Protected => 0,
        }
    }

    /// Apply one stack's boost and record what actually landed.
    fn apply_stack_boost(&mut self, stages: &mut StatStages) -> Vec<StackBoost> {
        let boosts = self.stack_boosts();
        match self {
            BattlerTag::Stockpiling { stat_changes, .. } => boosts
                .iter()
                .map(|&(stat, requested)| {
                    let applied = stages.apply_delta(stat, requested);
                    stat_changes.add(stat, applied);
                    StackBoost {
                        stat,
                        requested,
                        applied,
                    }
                })
                .collect(),
            BattlerTag::Protected => Vec::new(),
        }
    }

    /// Undo exactly what was recorded, never the nominal per-stack amount.
    fn on_remove(&self, stages: &mut StatStages) {
        if let Some(stat_changes) = self.stat_changes() {
            for (stat, delta) in stat_changes.iter_nonzero() {
                stages.apply_delta(stat, delta.saturating_neg());
            }
        }
    }
}

/// Registry of volatile tags, at most one entry per `TagKind`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BattlerTags {
    tags: HashMap<TagKind, BattlerTag>,
}

impl BattlerTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag or stack onto an existing one, running its stack hook.
    /// Stage boosts from the new stack are left pending.
    pub fn add(&mut self, kind: TagKind) -> TagAddOutcome {
        match self.tags.get_mut(&kind) {
            Some(existing) if kind.is_stacking() => {
                if existing.stack_count() >= existing.max_stacks() {
                    return TagAddOutcome::AtMaximum;
                }
                existing.on_stack();
                TagAddOutcome::Stacked {
                    count: existing.stack_count(),
                }
            }
            Some(_) => TagAddOutcome::AlreadyPresent,
            None => {
                let mut tag = BattlerTag::fresh(kind);
                tag.on_stack();
                self.tags.insert(kind, tag);
                TagAddOutcome::Added
            }
        }
    }

    /// Detach the tag first, then reverse its recorded effects. Boosts
    /// that never landed are dropped with it.
    pub fn remove(&mut self, kind: TagKind, stages: &mut StatStages) -> Option<BattlerTag> {
        let tag = self.tags.remove(&kind)?;
        tag.on_remove(stages);
        Some(tag)
    }

    pub fn get(&self, kind: TagKind) -> Option<&BattlerTag> {
        self.tags.get(&kind)
    }

    /// Mutable access for scenario setup. Changes made here bypass the hooks.
    pub fn get_mut(&mut self, kind: TagKind) -> Option<&mut BattlerTag> {
        self.tags.get_mut(&kind)
    }

    pub fn contains(&self, kind: TagKind) -> bool {
        self.tags.contains_key(&kind)
    }

    pub fn stack_count(&self, kind: TagKind) -> u8 {
        self.get(kind).map_or(0, BattlerTag::stack_count)
    }

    /// Claim every pending stack boost, one entry per stack, in tag order.
    pub fn take_pending_boosts(&mut self) -> Vec<TagKind> {
        let mut kinds: Vec<TagKind> = self.tags.keys().copied().collect();
        kinds.sort_by_key(|kind| *kind as u8);

        let mut pending = Vec::new();
        for kind in kinds {
            if let Some(tag) = self.tags.get_mut(&kind) {
                let stacks = tag.take_pending_boosts();
                pending.extend(std::iter::repeat(kind).take(stacks as usize));
            }
        }
        pending
    }

    /// Apply one stack boost for `kind`. Returns `None` if the tag is gone.
    pub fn apply_stack_boost(
        &mut self,
        kind: TagKind,
        stages: &mut StatStages,
    ) -> Option<Vec<StackBoost>> {
        self.tags
            .get_mut(&kind)
            .map(|tag| tag.apply_stack_boost(stages))
    }

    /// Remove every tag that only lasts for the current turn.
    pub fn clear_turn_end(&mut self, stages: &mut StatStages) -> Vec<TagKind> {
        let mut expiring: Vec<TagKind> = self
            .tags
            .keys()
            .copied()
            .filter(|kind| kind.expires_at_turn_end())
            .collect();
        expiring.sort_by_key(|kind| *kind as u8);

        for kind in &expiring {
            self.remove(*kind, stages);
        }
        expiring
    }
}
