use thiserror::Error;

pub mod types;
pub mod utils;
pub mod env;
pub mod search;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("missing API key")]
    MissingApiKey,
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
}
