//! Gemini structured-extraction client.
//!
//! Builds the fixed instruction prompt plus a response schema, posts one
//! `generateContent` request per document, and decodes the two-layer
//! response: the API envelope first, then the schema-constrained JSON array
//! the model wrote into `candidates[0].content.parts[0].text`.

use anyhow::{Context, Result};
use bankcsv_core::TransactionRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::StatementExtractor;
use crate::error::ExtractError;

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Explicit configuration for the extraction endpoint. The caller supplies
/// everything the client needs; there is no ambient secrets lookup.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl ExtractorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

const EXTRACTION_PROMPT: &str = "\
You are a bank statement transaction parser. Your task is to extract transactions \
from the following bank statement text. The bank can be FNB, Nedbank, Standard Bank, \
ABSA, or HBZ.

For each transaction, extract the date, description, and amount.
Format the output as a JSON array of objects.
The amount must be a number: positive for credits (CR/deposit) and negative for debits (DR/withdrawal).
The output should only be the JSON, with no other text or explanation.

Fields to extract for each transaction object:
- 'date': The transaction date in 'YYYY-MM-DD' format.
- 'description': A concise description of the transaction.
- 'amount': The transaction amount as a number (e.g., 100.50 or -50.00).

If a transaction does not have a clear date, description, and amount, you must ignore it.";

/// Schema the endpoint is asked to constrain its output to: an array of
/// objects with required date/description/amount fields.
fn response_schema() -> serde_json::Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "date": {"type": "string"},
                "description": {"type": "string"},
                "amount": {"type": "number"}
            },
            "required": ["date", "description", "amount"]
        }
    })
}

/// One entry of the model's inner payload, before validation.
#[derive(Debug, Deserialize)]
struct RawTransaction {
    date: String,
    description: String,
    amount: f64,
}

/// First decode step: the generateContent envelope down to the candidate
/// text that holds the schema-constrained payload.
fn decode_envelope(body: &str) -> Result<String, ExtractError> {
    #[derive(Deserialize)]
    struct Envelope {
        #[serde(default)]
        candidates: Vec<Candidate>,
    }

    #[derive(Deserialize)]
    struct Candidate {
        content: Option<CandidateContent>,
    }

    #[derive(Deserialize)]
    struct CandidateContent {
        #[serde(default)]
        parts: Vec<Part>,
    }

    #[derive(Deserialize)]
    struct Part {
        text: Option<String>,
    }

    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| ExtractError::EnvelopeDecode(e.to_string()))?;

    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(ExtractError::EmptyResponse)
}

/// Second decode step: the inner JSON array of raw transaction entries.
fn decode_payload(text: &str) -> Result<Vec<RawTransaction>, ExtractError> {
    Ok(serde_json::from_str(text)?)
}

/// Validate one raw entry into a record. Bad date, empty description, or
/// non-finite amount drops the entry, same as the grammar path.
fn validate_entry(raw: &RawTransaction) -> Option<TransactionRecord> {
    let date = NaiveDate::parse_from_str(raw.date.trim(), "%Y-%m-%d").ok()?;
    TransactionRecord::new(date, &raw.description, raw.amount)
}

/// Client for the Gemini structured-extraction endpoint. One request per
/// document, single attempt, no retry or caching.
pub struct GeminiExtractor {
    config: ExtractorConfig,
}

impl GeminiExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub async fn extract_async(&self, text: &str) -> Result<Vec<TransactionRecord>, ExtractError> {
        #[derive(Serialize)]
        struct Part {
            text: String,
        }

        #[derive(Serialize)]
        struct Content {
            role: String,
            parts: Vec<Part>,
        }

        #[derive(Serialize)]
        struct GenerationConfig {
            #[serde(rename = "responseMimeType")]
            response_mime_type: String,
            #[serde(rename = "responseSchema")]
            response_schema: serde_json::Value,
        }

        #[derive(Serialize)]
        struct Req {
            contents: Vec<Content>,
            #[serde(rename = "generationConfig")]
            generation_config: GenerationConfig,
        }

        let body = Req {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: format!("{EXTRACTION_PROMPT}\n\nBank Statement Text:\n{text}"),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        );

        let client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()?;
        let resp = client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let body_text = resp.text().await?;
        if !status.is_success() {
            return Err(ExtractError::Http {
                status,
                body: body_text,
            });
        }

        let inner = decode_envelope(&body_text)?;
        let raw = decode_payload(&inner)?;
        Ok(raw.iter().filter_map(validate_entry).collect())
    }
}

impl StatementExtractor for GeminiExtractor {
    /// Blocking front over the async client.
    ///
    /// The CLI runs under #[tokio::main], so we're often already inside a
    /// runtime; creating a nested runtime and calling block_on would panic.
    /// Inside a runtime: block_in_place + Handle::block_on. Outside: make a
    /// runtime and block_on.
    fn extract(&self, text: &str) -> Result<Vec<TransactionRecord>> {
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            tokio::task::block_in_place(|| {
                handle.block_on(async { Ok(self.extract_async(text).await?) })
            })
        } else {
            let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
            rt.block_on(async { Ok(self.extract_async(text).await?) })
        }
    }
}
