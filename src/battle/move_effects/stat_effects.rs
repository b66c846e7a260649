use super::EffectContext;
use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleEvent, BattleState};
use crate::config::BattleConfig;
use schema::{StatType, Target};

/// Apply stat change effect.
///
/// A change that cannot move the stage at all is reported as blocked
/// instead of producing a no-op stage command.
pub(super) fn apply_stat_change_effect(
    target: Target,
    stat: StatType,
    stages: i8,
    context: &EffectContext,
    state: &BattleState,
) -> Vec<BattleCommand> {
    let target_index = context.target_index(target);
    let current = state.combatant(target_index).get_stat_stage(stat);

    let at_bound = (stages > 0 && current >= BattleConfig::MAX_STAT_STAGE)
        || (stages < 0 && current <= BattleConfig::MIN_STAT_STAGE);

    if stages == 0 {
        Vec::new()
    } else if at_bound {
        vec![BattleCommand::EmitEvent(BattleEvent::StatChangeBlocked {
            target: target_index,
            stat,
            rising: stages > 0,
        })]
    } else {
        vec![BattleCommand::ChangeStatStage {
            target: target_index,
            stat,
            delta: stages,
        }]
    }
}
