use crate::battle::runner::BattleRunner;
use crate::battle::state::{BattleState, TurnRng};
use crate::combatant::{BaseStats, Combatant, PlayerType};
use crate::errors::BattleResult;
use schema::{BattlerIndex, Move};

/// A builder for creating test combatants with common defaults.
///
/// # Example
/// ```ignore
/// let swalot = TestCombatantBuilder::new("Swalot")
///     .with_moves(vec![Move::Stockpile, Move::SpitUp])
///     .with_hp(40);
/// ```
pub struct TestCombatantBuilder {
    name: String,
    level: u8,
    stats: BaseStats,
    moves: Vec<Move>,
    current_hp: Option<u16>,
    player_type: Option<PlayerType>,
}

impl TestCombatantBuilder {
    /// Level 50, all base stats 100, knows only Splash.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 50,
            stats: BaseStats::default(),
            moves: vec![Move::Splash],
            current_hp: None,
            player_type: None,
        }
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_max_hp(mut self, hp: u16) -> Self {
        self.stats.hp = hp;
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.stats.speed = speed;
        self
    }

    /// Sets the current HP for the test combatant. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn controlled_by(mut self, player_type: PlayerType) -> Self {
        self.player_type = Some(player_type);
        self
    }

    /// Player side defaults to human control, enemy side to NPC.
    pub fn build(self, battler_index: BattlerIndex) -> Combatant {
        let player_type = self.player_type.unwrap_or(match battler_index {
            BattlerIndex::Player => PlayerType::Human,
            BattlerIndex::Enemy => PlayerType::Npc,
        });
        let mut combatant = Combatant::new(
            self.name,
            battler_index,
            player_type,
            self.level,
            self.stats,
            self.moves,
        );
        if let Some(hp) = self.current_hp {
            combatant.set_hp(hp);
        }
        combatant
    }
}

/// Creates a standard 1v1 battle state for testing.
pub fn create_test_battle(player: TestCombatantBuilder, enemy: TestCombatantBuilder) -> BattleState {
    BattleState::new(
        "test_battle".to_string(),
        player.build(BattlerIndex::Player),
        enemy.build(BattlerIndex::Enemy),
    )
}

/// Creates a runner over a fresh 1v1 battle, already advanced to the
/// first command selection.
pub fn create_test_runner(
    player: TestCombatantBuilder,
    enemy: TestCombatantBuilder,
    rng: TurnRng,
) -> BattleRunner {
    let mut runner = BattleRunner::new(create_test_battle(player, enemy), rng);
    assert_ok(runner.start());
    runner
}

/// The usual Spit Up scenario: a Stockpile user against a bulky NPC that
/// only knows Splash.
pub fn spit_up_runner() -> BattleRunner {
    create_test_runner(
        TestCombatantBuilder::new("Swalot").with_moves(vec![
            Move::SpitUp,
            Move::Stockpile,
            Move::Swallow,
        ]),
        TestCombatantBuilder::new("Snorlax").with_max_hp(5000),
        predictable_rng(),
    )
}

/// Creates a `TurnRng` instance with a long list of default values (50).
/// Useful for tests where the specific RNG outcome is not important, preventing panics from exhaustion.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
