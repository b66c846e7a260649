use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumCount, EnumIter};

/// Stats that carry a battle stage. HP has no stage, so it is not listed.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount,
)]
pub enum StatType {
    Atk,
    Def,
    SpAtk,
    SpDef,
    Spe,
    Acc,
    Eva,
}

impl StatType {
    /// Position of this stat in fixed-size per-stat tables.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatType::Atk => "Attack",
            StatType::Def => "Defense",
            StatType::SpAtk => "Special Attack",
            StatType::SpDef => "Special Defense",
            StatType::Spe => "Speed",
            StatType::Acc => "accuracy",
            StatType::Eva => "evasiveness",
        };
        write!(f, "{}", display_name)
    }
}

/// Kinds of volatile tag a combatant can carry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum TagKind {
    /// Stacking tag built by Stockpile and consumed by Spit Up / Swallow.
    Stockpiling,
    /// Single-turn shield from Protect.
    Protected,
}

impl TagKind {
    /// Whether repeated adds increment a counter instead of being rejected.
    pub const fn is_stacking(self) -> bool {
        matches!(self, TagKind::Stockpiling)
    }

    /// Whether the tag is dropped during the turn-end phase.
    pub const fn expires_at_turn_end(self) -> bool {
        matches!(self, TagKind::Protected)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKind::Stockpiling => write!(f, "Stockpile"),
            TagKind::Protected => write!(f, "Protect"),
        }
    }
}

/// Terminal outcome of a single move-use attempt.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveResult {
    Success,
    Fail,
    Miss,
}

/// Field position of a combatant. Singles only: one slot per side.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum BattlerIndex {
    Player,
    Enemy,
}

impl BattlerIndex {
    pub fn to_index(self) -> usize {
        match self {
            BattlerIndex::Player => 0,
            BattlerIndex::Enemy => 1,
        }
    }

    pub fn opponent(self) -> BattlerIndex {
        match self {
            BattlerIndex::Player => BattlerIndex::Enemy,
            BattlerIndex::Enemy => BattlerIndex::Player,
        }
    }
}

impl fmt::Display for BattlerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattlerIndex::Player => write!(f, "Player"),
            BattlerIndex::Enemy => write!(f, "Enemy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_stat_indices_are_dense() {
        for (position, stat) in StatType::iter().enumerate() {
            assert_eq!(stat.index(), position);
        }
        assert_eq!(StatType::COUNT, 7);
    }

    #[test]
    fn test_battler_index_conversion() {
        assert_eq!(BattlerIndex::Player.to_index(), 0);
        assert_eq!(BattlerIndex::Enemy.to_index(), 1);
        assert_eq!(BattlerIndex::Player.opponent(), BattlerIndex::Enemy);
        assert_eq!(BattlerIndex::Enemy.opponent(), BattlerIndex::Player);
    }

    #[test]
    fn test_tag_kind_lifetimes() {
        assert!(TagKind::Stockpiling.is_stacking());
        assert!(!TagKind::Protected.is_stacking());
        assert!(TagKind::Protected.expires_at_turn_end());
        assert!(!TagKind::Stockpiling.expires_at_turn_end());
    }
}
