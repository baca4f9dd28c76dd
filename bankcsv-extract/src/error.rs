//! Failure taxonomy for the model-backed extraction path.

use thiserror::Error;

/// What went wrong talking to, or decoding, the extraction endpoint.
///
/// Every variant is recoverable at the batch level: the document that hit
/// it contributes zero records and the remaining documents keep going.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Network-level failure before a usable response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status from the extraction endpoint.
    #[error("extraction endpoint returned {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body was not the expected generateContent envelope.
    #[error("failed to decode response envelope: {0}")]
    EnvelopeDecode(String),

    /// Envelope was well-formed but carried no candidate text.
    #[error("model returned no candidates")]
    EmptyResponse,

    /// The schema-constrained inner payload did not parse.
    #[error("failed to decode transaction payload: {0}")]
    PayloadDecode(#[from] serde_json::Error),
}
