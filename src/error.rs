use crate::diagnostics::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} warning(s) reported while warnings are denied")]
    DeniedWarnings(usize),
}

pub type Result<T = ()> = std::result::Result<T, Error>;
