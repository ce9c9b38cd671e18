//! Headless combat arena.
//!
//! Runs a series of battles between an AI-driven hero and random enemy
//! waves, feeding every result into the difficulty scaler, and prints the
//! outcome of each battle along with the difficulty trajectory.
//!
//! ```bash
//! ARENA_BATTLES=50 ARENA_SEED=7 RUST_LOG=info cargo run -p arena
//! ```
mod config;
mod logging;
mod waves;

use anyhow::{Context, Result, anyhow};
use combat_content::{AbilityLoader, ConfigLoader, ContentFactory};
use combat_core::{AbilityCatalog, BalanceConfig, EffectRegistry};
use combat_runtime::{
    AiOrchestrator, Battle, BattleConfig, CombatRules, DifficultyLevel, RegistrationOptions,
    presets,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use config::ArenaConfig;

/// Seconds of simulated downtime between battles.
const REST_BETWEEN_BATTLES: f64 = 10.0;

fn main() -> Result<()> {
    // A missing .env is normal; the environment and defaults still apply.
    let dotenv = dotenvy::dotenv();

    let config = ArenaConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(%err, "no .env loaded"),
    }

    let effects = EffectRegistry::builtin();
    let (balance, catalog) = load_content(&config, &effects)?;
    tracing::info!(
        seed = config.seed,
        battles = config.battles,
        abilities = catalog.len(),
        "arena starting"
    );

    let rules = CombatRules::new(catalog, effects, balance.combat.clone());
    let mut orchestrator = AiOrchestrator::from_balance(rules, &balance, config.seed);
    let battle = Battle::new(BattleConfig {
        dt: config.dt,
        ..BattleConfig::default()
    });
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut trajectory = vec![orchestrator.scaler().level()];
    let mut clock = 0.0;
    let mut wins = 0;

    for number in 1..=config.battles {
        let (mut roster, enemies) = waves::encounter(&mut rng);
        let level = orchestrator.scaler().level();

        orchestrator.clear();
        let player_tree = presets::by_name(&config.player_tree)
            .ok_or_else(|| anyhow!("unknown player tree '{}'", config.player_tree))?;
        orchestrator.register(
            &mut roster,
            waves::HERO,
            player_tree,
            RegistrationOptions::default(),
        )?;
        for (id, archetype) in &enemies {
            let tree = presets::by_name(archetype.tree())
                .ok_or_else(|| anyhow!("unknown enemy tree '{}'", archetype.tree()))?;
            orchestrator.register(&mut roster, *id, tree, RegistrationOptions::default())?;
        }

        let summary = battle.run(&mut roster, &mut orchestrator, clock);
        clock = summary.finished_at() + REST_BETWEEN_BATTLES;
        if summary.player_won() {
            wins += 1;
        }

        let names: Vec<String> = enemies
            .iter()
            .map(|(_, archetype)| format!("{archetype:?}"))
            .collect();
        println!(
            "#{number:>3} {:<10} vs {:<28} {:<7} {:>6.1}s  dealt {:>6.1}  taken {:>6.1}",
            level.to_string(),
            names.join(", "),
            match summary.winner {
                Some(team) => team.to_string(),
                None => "draw".to_owned(),
            },
            summary.duration,
            summary.damage_dealt,
            summary.damage_received,
        );
        for line in &summary.log {
            tracing::debug!(battle = number, "{line}");
        }

        if let Some(adjustment) = orchestrator
            .scaler_mut()
            .record_battle_result(summary.to_result())
        {
            println!(
                "     difficulty {}: {} -> {}",
                adjustment.kind, adjustment.from, adjustment.to
            );
            trajectory.push(adjustment.to);
        }
    }

    print_summary(&orchestrator, wins, config.battles, &trajectory);
    Ok(())
}

fn load_content(
    config: &ArenaConfig,
    effects: &EffectRegistry,
) -> Result<(BalanceConfig, AbilityCatalog)> {
    let factory = ContentFactory::new(&config.data_dir);

    let balance = match &config.balance {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("loading balance from {}", path.display()))?,
        None => factory.load_balance()?,
    };
    let catalog = match &config.abilities {
        Some(path) => AbilityLoader::load(path, effects)
            .with_context(|| format!("loading abilities from {}", path.display()))?,
        None => factory.load_abilities(effects)?,
    };
    Ok((balance, catalog))
}

fn print_summary<A>(
    orchestrator: &AiOrchestrator<A>,
    wins: u32,
    battles: u32,
    trajectory: &[DifficultyLevel],
) where
    A: combat_core::Combatant,
{
    let metrics = orchestrator.scaler().metrics();
    let path: Vec<String> = trajectory.iter().map(ToString::to_string).collect();

    println!();
    println!("battles    {battles}");
    println!(
        "wins       {wins} ({:.0}%)",
        f64::from(wins) / f64::from(battles) * 100.0
    );
    println!("avg time   {:.1}s", metrics.average_duration);
    println!("dealt      {:.0}", metrics.damage_dealt);
    println!("taken      {:.0}", metrics.damage_received);
    println!("difficulty {}", path.join(" -> "));
}
