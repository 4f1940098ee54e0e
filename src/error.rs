use thiserror::Error;

/// Errors surfaced by the INPI client.
///
/// Extraction misses are deliberately NOT part of this taxonomy: a metric
/// that cannot be located in a filing is reported as `None` by the
/// financials module, never as an error.
#[derive(Debug, Error)]
pub enum InpiError {
    #[error("invalid SIREN (expected 9 digits): {0:?}")]
    InvalidSiren(String),

    #[error("invalid SIRET (expected 14 digits): {0:?}")]
    InvalidSiret(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
