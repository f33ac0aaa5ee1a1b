use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoftwareVersionError {
    #[error("stanza parse failed: {0}")]
    ParseFailed(String),

    #[error("not a software version request: {0}")]
    NotAVersionQuery(String),

    #[error("failed to serialize response: {0}")]
    SerializeFailed(String),
}
