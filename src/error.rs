use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherLabError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    #[error("Empty input: no text supplied")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, CipherLabError>;
