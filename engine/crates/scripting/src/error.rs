use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Lua error: {0}")]
    Lua(#[from] mlua::Error),

    #[error("script load error: {0}")]
    Load(String),

    #[error("hook registry not installed")]
    HooksMissing,

    #[error("instruction limit exceeded")]
    InstructionLimitExceeded,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
