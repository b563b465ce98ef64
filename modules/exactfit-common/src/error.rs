use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExactFitError {
    #[error("Search error: {0}")]
    Search(String),

    #[error("Enrichment error: {0}")]
    Enrichment(String),

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
