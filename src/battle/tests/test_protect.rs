#[cfg(test)]
mod tests {
    use crate::battle::phases::PhaseKind;
    use crate::battle::state::BattleEvent;
    use crate::battle::tests::common::{
        assert_ok, create_test_runner, predictable_rng, TestCombatantBuilder,
    };
    use pretty_assertions::assert_eq;
    use schema::{BattlerIndex, Move, MoveResult, StatType, TagKind};

    fn protect_runner() -> crate::battle::runner::BattleRunner {
        create_test_runner(
            TestCombatantBuilder::new("Swalot").with_moves(vec![Move::SpitUp, Move::Growl]),
            TestCombatantBuilder::new("Shuckle").with_moves(vec![Move::Protect]),
            predictable_rng(),
        )
    }

    #[test]
    fn test_spit_up_into_protect_misses_but_consumes_stacks() {
        let mut runner = protect_runner();
        let player = runner.state_mut().combatant_mut(BattlerIndex::Player);
        player.add_tag(TagKind::Stockpiling);
        player.add_tag(TagKind::Stockpiling);

        assert_ok(runner.select_move(BattlerIndex::Player, Move::SpitUp));
        assert_ok(runner.run_until(PhaseKind::TurnInit));
        runner
            .events()
            .print_debug_with_message("Events for test_spit_up_into_protect_misses_but_consumes_stacks:");

        let player = runner.state().combatant(BattlerIndex::Player);
        assert_eq!(
            player.last_move_record().map(|record| record.result),
            Some(MoveResult::Miss)
        );
        assert_eq!(player.stockpile_count(), 0);
        assert_eq!(player.get_stat_stage(StatType::Def), 0);

        let enemy = runner.state().combatant(BattlerIndex::Enemy);
        assert_eq!(enemy.current_hp(), enemy.max_hp());
        assert!(runner.events().events().contains(&BattleEvent::MoveBlocked {
            target: BattlerIndex::Enemy,
            move_used: Move::SpitUp,
        }));
        // Power is still computed before the protection check
        assert!(runner.events().events().iter().any(|event| matches!(
            event,
            BattleEvent::PowerCalculated { power: 200, .. }
        )));
    }

    #[test]
    fn test_protect_blocks_target_stat_drops() {
        let mut runner = protect_runner();

        assert_ok(runner.select_move(BattlerIndex::Player, Move::Growl));
        assert_ok(runner.run_until(PhaseKind::TurnInit));

        assert_eq!(
            runner
                .state()
                .combatant(BattlerIndex::Enemy)
                .get_stat_stage(StatType::Atk),
            0
        );
    }

    #[test]
    fn test_protect_expires_at_turn_end() {
        let mut runner = protect_runner();

        assert_ok(runner.select_move(BattlerIndex::Player, Move::Growl));
        assert_ok(runner.run_until(PhaseKind::TurnEnd));
        assert!(runner
            .state()
            .combatant(BattlerIndex::Enemy)
            .has_tag(TagKind::Protected));

        assert_ok(runner.run_until(PhaseKind::TurnInit));
        assert!(!runner
            .state()
            .combatant(BattlerIndex::Enemy)
            .has_tag(TagKind::Protected));
        assert!(runner.events().events().contains(&BattleEvent::TagRemoved {
            target: BattlerIndex::Enemy,
            tag: TagKind::Protected,
        }));
    }
}
