use crate::combatant::Combatant;
use crate::errors::{MoveDataError, MoveDataResult};
use schema::{Move, MoveData, MovePower};
use std::collections::HashMap;
use std::sync::LazyLock;

const BUILTIN_MOVES: &str = include_str!("../data/moves.ron");

// Global move table - parsed once on first access
static MOVE_DATA: LazyLock<MoveDataResult<HashMap<Move, MoveData>>> =
    LazyLock::new(|| load_move_table(BUILTIN_MOVES));

/// Parse a RON move table, rejecting duplicate entries.
pub fn load_move_table(text: &str) -> MoveDataResult<HashMap<Move, MoveData>> {
    let entries: Vec<MoveData> =
        ron::from_str(text).map_err(|err| MoveDataError::MalformedData(err.to_string()))?;

    let mut table = HashMap::with_capacity(entries.len());
    for entry in entries {
        let id = entry.id;
        if table.insert(id, entry).is_some() {
            return Err(MoveDataError::DuplicateEntry(id));
        }
    }
    tracing::debug!(moves = table.len(), "move table loaded");
    Ok(table)
}

/// Get move data for a specific move from the global table
pub fn get_move_data(move_: Move) -> MoveDataResult<&'static MoveData> {
    let table = MOVE_DATA.as_ref().map_err(Clone::clone)?;
    table.get(&move_).ok_or(MoveDataError::MoveNotFound(move_))
}

/// Base power for this use of the move.
///
/// Per-stockpile moves scale with the user's current stack count. Returns
/// `None` when the move has no power to give: non-damaging moves, or a
/// per-stockpile move used with no stacks.
pub fn calculate_battle_power(move_data: &MoveData, user: &Combatant) -> Option<u16> {
    match move_data.power {
        MovePower::NonDamaging => None,
        MovePower::Fixed(power) => Some(power),
        MovePower::PerStockpile(per_stack) => match user.stockpile_count() {
            0 => None,
            stacks => Some(per_stack.saturating_mul(u16::from(stacks))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{BaseStats, PlayerType};
    use pretty_assertions::assert_eq;
    use schema::{BattlerIndex, MovePrecondition, TagKind};
    use strum::IntoEnumIterator;

    fn user() -> Combatant {
        Combatant::new(
            "Swalot",
            BattlerIndex::Player,
            PlayerType::Human,
            50,
            BaseStats::default(),
            vec![Move::SpitUp],
        )
    }

    #[test]
    fn test_every_move_has_an_entry() {
        for move_ in Move::iter() {
            let data = get_move_data(move_).expect("builtin table covers every move");
            assert_eq!(data.id, move_);
        }
    }

    #[test]
    fn test_spit_up_entry() {
        let data = get_move_data(Move::SpitUp).expect("spit up present");
        assert_eq!(data.power, MovePower::PerStockpile(100));
        assert_eq!(data.precondition, MovePrecondition::RequiresStockpile);
    }

    #[test]
    fn test_duplicate_entries_are_rejected() {
        let text = r#"[
            (id: Splash, name: "Splash", category: Status, power: NonDamaging, accuracy: None, target: User),
            (id: Splash, name: "Splash", category: Status, power: NonDamaging, accuracy: None, target: User),
        ]"#;
        assert_eq!(
            load_move_table(text),
            Err(MoveDataError::DuplicateEntry(Move::Splash))
        );
    }

    #[test]
    fn test_malformed_table_is_reported() {
        assert!(matches!(
            load_move_table("[ (id: NotAMove) ]"),
            Err(MoveDataError::MalformedData(_))
        ));
    }

    #[test]
    fn test_spit_up_power_scales_with_stacks() {
        let data = get_move_data(Move::SpitUp).expect("spit up present");
        let mut combatant = user();

        assert_eq!(calculate_battle_power(data, &combatant), None);

        for expected in [100, 200, 300] {
            combatant.add_tag(TagKind::Stockpiling);
            assert_eq!(calculate_battle_power(data, &combatant), Some(expected));
        }
    }

    #[test]
    fn test_fixed_and_status_power() {
        let combatant = user();
        let tackle = get_move_data(Move::Tackle).expect("tackle present");
        let splash = get_move_data(Move::Splash).expect("splash present");
        assert_eq!(calculate_battle_power(tackle, &combatant), Some(40));
        assert_eq!(calculate_battle_power(splash, &combatant), None);
    }
}
