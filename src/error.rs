use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("character error: {0}")]
    Character(#[from] spellbook::SpellbookError),

    #[error("script error: {0}")]
    Script(#[from] scripting::ScriptError),

    #[error("report error: {0}")]
    Report(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
