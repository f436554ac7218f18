use std::path::Path;

use serde::Deserialize;

use scripting::{ScriptConfig, ScriptRealm};

use crate::error::RunError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScriptSection {
    pub scripts_dir: String,
    pub realm: ScriptRealm,
    pub memory_limit_kb: usize,
    pub instruction_limit: u32,
}

impl Default for ScriptSection {
    fn default() -> Self {
        Self {
            scripts_dir: "scripts".to_string(),
            realm: ScriptRealm::Client,
            memory_limit_kb: 16384, // 16 MB
            instruction_limit: 1_000_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CharacterSection {
    pub path: String,
    pub rng_seed: u64,
}

impl Default for CharacterSection {
    fn default() -> Self {
        Self {
            path: "data/character.json".to_string(),
            rng_seed: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunSection {
    /// Number of on_turn passes after on_init.
    pub turns: u64,
}

impl Default for RunSection {
    fn default() -> Self {
        Self { turns: 1 }
    }
}

/// Top-level macro runner configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MacroConfig {
    pub scripting: ScriptSection,
    pub character: CharacterSection,
    pub run: RunSection,
}

impl MacroConfig {
    /// Load configuration from an optional TOML file path.
    /// Falls back to defaults if path is None or file doesn't exist.
    pub fn load(config_path: Option<&str>) -> Result<Self, RunError> {
        let config = match config_path {
            Some(path) if Path::new(path).exists() => {
                let content = std::fs::read_to_string(path)?;
                toml::from_str(&content)?
            }
            _ => Self::default(),
        };
        Ok(config)
    }

    /// Convert scripting section to scripting crate's ScriptConfig.
    pub fn to_script_config(&self) -> ScriptConfig {
        ScriptConfig {
            memory_limit: self.scripting.memory_limit_kb * 1024,
            instruction_limit: self.scripting.instruction_limit,
        }
    }
}

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: Option<String>,
    pub script: Option<String>,
    pub turns: Option<u64>,
    pub realm: Option<ScriptRealm>,
    pub dump: bool,
}

/// Supports: --config <path>, --script <path>, --turns <n>,
/// --realm <client|dungeon>, --dump
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || {
            args.get(i + 1)
                .cloned()
                .ok_or_else(|| format!("{} requires a value argument", flag))
        };
        match flag {
            "--config" => cli.config_path = Some(value()?),
            "--script" => cli.script = Some(value()?),
            "--turns" => {
                let raw = value()?;
                let turns = raw
                    .parse()
                    .map_err(|_| format!("--turns expects a number, got '{}'", raw))?;
                cli.turns = Some(turns);
            }
            "--realm" => {
                cli.realm = Some(match value()?.as_str() {
                    "client" => ScriptRealm::Client,
                    "dungeon" => ScriptRealm::Dungeon,
                    other => {
                        return Err(format!(
                            "Unknown realm '{}', expected 'client' or 'dungeon'",
                            other
                        ))
                    }
                })
            }
            "--dump" => {
                cli.dump = true;
                i += 1;
                continue;
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 2;
    }
    Ok(cli)
}

/// Parse process arguments and merge them over the config file.
pub fn parse_cli_args() -> (MacroConfig, CliArgs) {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(1);
        }
    };

    let mut config = match MacroConfig::load(cli.config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    // CLI flags override the config file
    if let Some(turns) = cli.turns {
        config.run.turns = turns;
    }
    if let Some(realm) = cli.realm {
        config.scripting.realm = realm;
    }

    (config, cli)
}
