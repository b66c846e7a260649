use crate::battle_data::{StatType, TagKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Move {
    Tackle,
    QuickAttack,
    Splash,
    Stockpile,
    SpitUp,
    Swallow,
    Protect,
    Harden,
    Amnesia,
    Growl,
    SwordsDance,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            Move::Tackle => "Tackle",
            Move::QuickAttack => "Quick Attack",
            Move::Splash => "Splash",
            Move::Stockpile => "Stockpile",
            Move::SpitUp => "Spit Up",
            Move::Swallow => "Swallow",
            Move::Protect => "Protect",
            Move::Harden => "Harden",
            Move::Amnesia => "Amnesia",
            Move::Growl => "Growl",
            Move::SwordsDance => "Swords Dance",
        };
        write!(f, "{}", display_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
            MoveCategory::Status => write!(f, "Status"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    User,
    Target,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::User => write!(f, "User"),
            Target::Target => write!(f, "Target"),
        }
    }
}

/// How a move's base power is obtained at use time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovePower {
    /// Status moves and fixed-effect moves that never reach the damage step.
    NonDamaging,
    Fixed(u16),
    /// Power per stockpiled stack on the user.
    PerStockpile(u16),
}

/// Gate checked before any power or effect computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovePrecondition {
    #[default]
    Always,
    /// User must hold at least one stockpile stack.
    RequiresStockpile,
    /// User must be below the stockpile stack limit.
    StockpileNotFull,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveEffect {
    StatChange(Target, StatType, i8), // target, stat, stages
    AddTag(Target, TagKind),
    ConsumeStockpile,  // remove the user's stockpile, reversing its boosts
    HealPerStockpile,  // 1/2/3 stacks heal 25/50/100% max HP
}

/// Immutable move descriptor as authored in the move table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: Move,
    pub name: String,
    pub category: MoveCategory,
    pub power: MovePower,
    pub accuracy: Option<u8>,
    #[serde(default)]
    pub priority: i8,
    pub target: Target,
    #[serde(default)]
    pub precondition: MovePrecondition,
    #[serde(default)]
    pub effects: Vec<MoveEffect>,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        !matches!(self.power, MovePower::NonDamaging)
    }

    /// Whether the move acts on the opposing combatant at all.
    pub fn targets_opponent(&self) -> bool {
        self.target == Target::Target
    }
}
