use crate::combatant::{Combatant, PlayerAction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{BattlerIndex, Move, StatType, TagKind};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum GameState {
    WaitingForActions,
    TurnInProgress,
    PlayerWin,
    EnemyWin,
}

impl GameState {
    pub fn is_over(self) -> bool {
        matches!(self, GameState::PlayerWin | GameState::EnemyWin)
    }

    pub fn win_for(winner: BattlerIndex) -> Self {
        match winner {
            BattlerIndex::Player => GameState::PlayerWin,
            BattlerIndex::Enemy => GameState::EnemyWin,
        }
    }
}

/// Why a move attempt failed before reaching its effects.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFailureReason {
    NoStockpile,
    StockpileFull,
    UserFainted,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded {
        turn_number: u32,
    },

    // Move resolution
    MoveUsed {
        user: BattlerIndex,
        move_used: Move,
    },
    MoveFailed {
        user: BattlerIndex,
        move_used: Move,
        reason: MoveFailureReason,
    },
    PowerCalculated {
        user: BattlerIndex,
        move_used: Move,
        power: u16,
    },
    MoveMissed {
        user: BattlerIndex,
        target: BattlerIndex,
        move_used: Move,
    },
    MoveBlocked {
        target: BattlerIndex,
        move_used: Move,
    },

    // Damage and healing
    DamageDealt {
        target: BattlerIndex,
        damage: u16,
        remaining_hp: u16,
    },
    CombatantHealed {
        target: BattlerIndex,
        amount: u16,
        new_hp: u16,
    },
    CombatantFainted {
        target: BattlerIndex,
    },

    // Stat stages
    StatStageChanged {
        target: BattlerIndex,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        target: BattlerIndex,
        stat: StatType,
        rising: bool,
    },

    // Volatile tags
    TagAdded {
        target: BattlerIndex,
        tag: TagKind,
    },
    TagStacked {
        target: BattlerIndex,
        tag: TagKind,
        count: u8,
    },
    TagRemoved {
        target: BattlerIndex,
        tag: TagKind,
    },

    // Battle end
    PlayerForfeited {
        battler: BattlerIndex,
    },
    BattleEnded {
        winner: BattlerIndex,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        let name = |index: BattlerIndex| battle_state.combatant(index).name.as_str();

        match self {
            // === Turn Management Events ===
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded { .. } => None,

            // === Move Events ===
            BattleEvent::MoveUsed { user, move_used } => {
                Some(format!("{} used {}!", name(*user), move_used))
            }
            BattleEvent::MoveFailed {
                move_used, reason, ..
            } => Some(match reason {
                MoveFailureReason::NoStockpile if *move_used == Move::Swallow => {
                    "But it failed to swallow a thing!".to_string()
                }
                MoveFailureReason::NoStockpile => "But it failed to spit up a thing!".to_string(),
                MoveFailureReason::StockpileFull => "But it can't stockpile any more!".to_string(),
                MoveFailureReason::UserFainted => "But it failed!".to_string(),
            }),
            BattleEvent::PowerCalculated { .. } => None,
            BattleEvent::MoveMissed { user, .. } => {
                Some(format!("{}'s attack missed!", name(*user)))
            }
            BattleEvent::MoveBlocked { target, .. } => {
                Some(format!("{} protected itself!", name(*target)))
            }

            // === Damage and Healing Events ===
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", name(*target), damage))
            }
            BattleEvent::CombatantHealed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", name(*target), amount))
            }
            BattleEvent::CombatantFainted { target } => {
                Some(format!("{} fainted!", name(*target)))
            }

            // === Stat Stage Events ===
            BattleEvent::StatStageChanged {
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                let difference = new_stage - old_stage;
                let change_text = match difference {
                    1 => "rose",
                    2 => "rose sharply",
                    d if d >= 3 => "rose drastically",
                    -1 => "fell",
                    -2 => "harshly fell",
                    _ => "severely fell",
                };
                Some(format!("{}'s {} {}!", name(*target), stat, change_text))
            }
            BattleEvent::StatChangeBlocked { target, stat, rising } => {
                let direction = if *rising { "higher" } else { "lower" };
                Some(format!(
                    "{}'s {} won't go any {}!",
                    name(*target),
                    stat,
                    direction
                ))
            }

            // === Tag Events ===
            BattleEvent::TagAdded { target, tag } => match tag {
                TagKind::Stockpiling => Some(format!("{} stockpiled 1!", name(*target))),
                TagKind::Protected => Some(format!("{} protected itself!", name(*target))),
            },
            BattleEvent::TagStacked { target, count, .. } => {
                Some(format!("{} stockpiled {}!", name(*target), count))
            }
            BattleEvent::TagRemoved { target, tag } => match tag {
                TagKind::Stockpiling => {
                    Some(format!("{}'s stockpiled effect wore off!", name(*target)))
                }
                TagKind::Protected => None,
            },

            // === Battle End Events ===
            BattleEvent::PlayerForfeited { battler } => {
                Some(format!("{} forfeited the battle!", name(*battler)))
            }
            BattleEvent::BattleEnded { winner } => {
                Some(format!("{} won the battle!", name(*winner)))
            }
        }
    }
}

/// Event bus for collecting and managing battle events.
///
/// ## Usage Examples
///
/// ```rust,ignore
/// event_bus.print_debug();                                    // Just print events
/// event_bus.print_debug_with_message("Turn 1 events:");      // With header message
/// event_bus.print_formatted(&battle_state);                  // Human-readable format
/// println!("{}", event_bus);                                  // Display trait
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::trace!(?event, "battle event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Drain all collected events, leaving the bus empty.
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    /// Print all events using their formatted text (when available).
    /// Falls back to debug format for silent events.
    pub fn print_formatted(&self, battle_state: &BattleState) {
        for event in &self.events {
            match event.format(battle_state) {
                Some(formatted) => println!("  {}", formatted),
                None => println!("  {:?} (silent)", event),
            }
        }
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

const RNG_BATCH: usize = 100;

/// Source of 1..=100 outcomes for every random decision in a battle.
///
/// Scripted sequences panic when exhausted so that tests fail loudly on an
/// unexpected draw. Generator-backed instances refill in batches.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u8>,
    index: usize,
    generator: Option<StdRng>,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            outcomes,
            index: 0,
            generator: None,
        }
    }

    pub fn new_random() -> Self {
        Self::with_generator(StdRng::from_rng(&mut rand::rng()))
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::with_generator(StdRng::seed_from_u64(seed))
    }

    fn with_generator(generator: StdRng) -> Self {
        Self {
            outcomes: Vec::new(),
            index: 0,
            generator: Some(generator),
        }
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if self.index >= self.outcomes.len() {
            match self.generator.as_mut() {
                Some(generator) => {
                    self.outcomes = (0..RNG_BATCH)
                        .map(|_| generator.random_range(1..=100))
                        .collect();
                    self.index = 0;
                }
                None => panic!(
                    "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                    reason
                ),
            }
        }
        let outcome = self.outcomes[self.index];
        tracing::trace!(outcome, reason, "rng consumed");

        self.index += 1;
        outcome
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub battle_id: String,
    pub combatants: [Combatant; 2],
    pub turn_number: u32,
    pub game_state: GameState,
    pub action_queue: [Option<PlayerAction>; 2],
}

impl BattleState {
    pub fn new(id: String, player: Combatant, enemy: Combatant) -> Self {
        Self {
            battle_id: id,
            combatants: [player, enemy],
            turn_number: 1,
            game_state: GameState::WaitingForActions,
            action_queue: [None, None],
        }
    }

    pub fn combatant(&self, index: BattlerIndex) -> &Combatant {
        &self.combatants[index.to_index()]
    }

    pub fn combatant_mut(&mut self, index: BattlerIndex) -> &mut Combatant {
        &mut self.combatants[index.to_index()]
    }

    pub fn queued_action(&self, index: BattlerIndex) -> Option<&PlayerAction> {
        self.action_queue[index.to_index()].as_ref()
    }

    pub fn winner(&self) -> Option<BattlerIndex> {
        match self.game_state {
            GameState::PlayerWin => Some(BattlerIndex::Player),
            GameState::EnemyWin => Some(BattlerIndex::Enemy),
            _ => None,
        }
    }

    pub fn is_battle_over(&self) -> bool {
        self.game_state.is_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{BaseStats, PlayerType};
    use pretty_assertions::assert_eq;

    fn test_state() -> BattleState {
        let player = Combatant::new(
            "Swalot",
            BattlerIndex::Player,
            PlayerType::Human,
            50,
            BaseStats::default(),
            vec![Move::SpitUp],
        );
        let enemy = Combatant::new(
            "Magikarp",
            BattlerIndex::Enemy,
            PlayerType::Npc,
            50,
            BaseStats::default(),
            vec![Move::Splash],
        );
        BattleState::new("test".to_string(), player, enemy)
    }

    #[test]
    fn test_scripted_rng_yields_in_order() {
        let mut rng = TurnRng::new_for_test(vec![10, 20]);
        assert_eq!(rng.next_outcome("first"), 10);
        assert_eq!(rng.next_outcome("second"), 20);
    }

    #[test]
    #[should_panic(expected = "TurnRng exhausted")]
    fn test_scripted_rng_panics_when_exhausted() {
        let mut rng = TurnRng::new_for_test(vec![]);
        rng.next_outcome("nothing left");
    }

    #[test]
    fn test_seeded_rng_is_reproducible_and_in_range() {
        let mut first = TurnRng::from_seed(42);
        let mut second = TurnRng::from_seed(42);
        for _ in 0..250 {
            let value = first.next_outcome("roll");
            assert!((1..=100).contains(&value));
            assert_eq!(value, second.next_outcome("roll"));
        }
    }

    #[test]
    fn test_event_formatting_uses_names() {
        let state = test_state();
        let used = BattleEvent::MoveUsed {
            user: BattlerIndex::Player,
            move_used: Move::SpitUp,
        };
        assert_eq!(used.format(&state), Some("Swalot used Spit Up!".to_string()));

        let raised = BattleEvent::StatStageChanged {
            target: BattlerIndex::Player,
            stat: StatType::Def,
            old_stage: 0,
            new_stage: 1,
        };
        assert_eq!(raised.format(&state), Some("Swalot's Defense rose!".to_string()));

        assert_eq!(
            BattleEvent::TurnEnded { turn_number: 1 }.format(&state),
            None
        );
    }

    #[test]
    fn test_event_bus_take_events_empties_bus() {
        let mut bus = EventBus::new();
        bus.push(BattleEvent::TurnStarted { turn_number: 1 });
        assert_eq!(bus.len(), 1);
        let drained = bus.take_events();
        assert_eq!(drained.len(), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_winner_follows_game_state() {
        let mut state = test_state();
        assert_eq!(state.winner(), None);
        state.game_state = GameState::win_for(BattlerIndex::Enemy);
        assert_eq!(state.winner(), Some(BattlerIndex::Enemy));
        assert!(state.is_battle_over());
    }
}
