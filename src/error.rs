use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreqgenError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid codon: {0}")]
    InvalidCodon(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No target specified: request at least one k-mer length or codons")]
    NoTargetSpecified,

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FreqgenError>;
