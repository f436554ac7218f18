mod config;
mod error;

use std::path::Path;
use std::sync::{Arc, Mutex};

use scripting::ScriptEngine;
use spellbook::{Character, CharacterSheet};

use crate::config::{parse_cli_args, CliArgs, MacroConfig};
use crate::error::RunError;

fn main() {
    observability::init_logging("info");

    let (config, cli) = parse_cli_args();
    tracing::info!(realm = ?config.scripting.realm, turns = config.run.turns, "spell macro runner starting");

    if let Err(e) = run(&config, &cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn load_character(config: &MacroConfig) -> Result<Character, RunError> {
    let path = Path::new(&config.character.path);
    if path.exists() {
        Ok(Character::load(path, config.character.rng_seed)?)
    } else {
        tracing::warn!("character file {} not found, using a blank character", path.display());
        Ok(Character::new(CharacterSheet::default(), config.character.rng_seed))
    }
}

fn run(config: &MacroConfig, cli: &CliArgs) -> Result<(), RunError> {
    let host = Arc::new(Mutex::new(load_character(config)?));

    let mut engine = ScriptEngine::new(config.to_script_config(), config.scripting.realm)?;
    engine.attach_host(Arc::clone(&host));

    let scripts_dir = Path::new(&config.scripting.scripts_dir);
    if scripts_dir.is_dir() {
        engine.load_directory(scripts_dir)?;
    }
    if let Some(script) = &cli.script {
        let path = Path::new(script);
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("script");
        let source = std::fs::read_to_string(path)?;
        engine.load_script(name, &source)?;
    }
    if engine.script_count() == 0 {
        tracing::warn!("no scripts loaded");
    }

    engine.run_on_init()?.log();
    for turn in 1..=config.run.turns {
        engine.run_on_turn(turn)?.log();
    }

    // Drop the engine's handle before reading the final state.
    engine.detach_host();
    let character = host.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let alive = character.monsters().iter().filter(|m| m.alive()).count();
    tracing::info!(
        hp = character.hp(),
        monsters_alive = alive,
        seed = character.seed(),
        "run finished"
    );

    if cli.dump {
        println!("{}", serde_json::to_string_pretty(character.sheet())?);
    }
    Ok(())
}
