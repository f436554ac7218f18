use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpellbookError {
    #[error("character parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
