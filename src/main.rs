use pokemon_move_engine::{
    BaseStats, BattleConfig, BattleRunner, BattleState, BattlerIndex, Combatant, Move, PlayerType,
};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn demo_battle() -> BattleState {
    let swalot = Combatant::new(
        "Swalot",
        BattlerIndex::Player,
        PlayerType::Npc,
        50,
        BaseStats {
            hp: 100,
            attack: 73,
            defense: 83,
            sp_attack: 73,
            sp_defense: 83,
            speed: 55,
        },
        vec![Move::Stockpile, Move::SpitUp, Move::Swallow, Move::Protect],
    );
    let snorlax = Combatant::new(
        "Snorlax",
        BattlerIndex::Enemy,
        PlayerType::Npc,
        50,
        BaseStats {
            hp: 160,
            attack: 110,
            defense: 65,
            sp_attack: 65,
            sp_defense: 110,
            speed: 30,
        },
        vec![Move::Tackle, Move::Growl, Move::Harden],
    );
    BattleState::new("demo".to_string(), swalot, snorlax)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match BattleConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                println!("Error loading config {}: {}", path, e);
                return;
            }
        },
        None => BattleConfig::default(),
    };
    tracing::info!(?config, "starting demo battle");

    let mut runner = BattleRunner::from_config(demo_battle(), &config);
    let result = runner.run_to_completion(config.max_turns);

    if config.log_events {
        runner.events().print_formatted(runner.state());
    }

    match result {
        Ok(Some(winner)) => println!(
            "\n{} wins on turn {}!",
            runner.state().combatant(winner).name,
            runner.state().turn_number
        ),
        Ok(None) => println!("\nNo winner after {} turns.", config.max_turns),
        Err(e) => {
            println!("Battle aborted: {}", e);
            return;
        }
    }

    for combatant in &runner.state().combatants {
        match serde_json::to_string(combatant.get_move_history()) {
            Ok(json) => println!("{} move history: {}", combatant.name, json),
            Err(e) => println!("Could not serialize move history: {}", e),
        }
    }
}
