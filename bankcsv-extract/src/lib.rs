//! bankcsv-extract: model-backed statement extraction and the conversion
//! pipeline that unifies it with the fixed-layout grammar path.

pub mod error;
pub mod gemini;
pub mod pipeline;

pub use error::ExtractError;
pub use gemini::{ExtractorConfig, GeminiExtractor};
pub use pipeline::{ConversionOutcome, Converter, DocumentFailure};

use anyhow::Result;
use bankcsv_core::TransactionRecord;

/// Extraction backend serving free-form statements.
///
/// The pipeline only sees this seam, so tests can drive it with a fake
/// instead of a live endpoint.
pub trait StatementExtractor {
    fn extract(&self, text: &str) -> Result<Vec<TransactionRecord>>;
}
