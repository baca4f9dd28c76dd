use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Layout family of a statement document.
///
/// Closed set: exactly one fixed-column grammar is supported today, and
/// every other statement goes through the model-backed extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// ABSA cheque-account statements (table rows with PDF-mangled spacing).
    FixedColumnAbsa,
    /// Any statement without a dedicated grammar.
    FreeForm,
}

/// Normalized output of both extraction paths (bank-agnostic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub description: String,
    /// Positive = credit/deposit; negative = debit/withdrawal.
    pub amount: f64,
    /// Identifier of the originating document, stamped during aggregation.
    pub source_document: Option<String>,
}

impl TransactionRecord {
    /// Build a record, enforcing the all-or-nothing invariant: a record
    /// either has a valid date, a non-empty description, and a finite
    /// amount, or it does not exist.
    pub fn new(date: NaiveDate, description: &str, amount: f64) -> Option<Self> {
        let description = description.trim();
        if description.is_empty() || !amount.is_finite() {
            return None;
        }
        Some(Self {
            date,
            description: description.to_string(),
            amount,
            source_document: None,
        })
    }
}

/// One document's already-extracted page text, as handed to the pipeline.
/// PDF-to-text extraction happens upstream; this core only sees strings.
#[derive(Debug, Clone)]
pub struct DocumentText {
    pub id: String,
    pub text: String,
}

impl DocumentText {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_trims_description() {
        let rec = TransactionRecord::new(date(2021, 4, 29), "  Ibank Payment  ", -150.0).unwrap();
        assert_eq!(rec.description, "Ibank Payment");
        assert_eq!(rec.source_document, None);
    }

    #[test]
    fn test_new_rejects_empty_description() {
        assert!(TransactionRecord::new(date(2021, 4, 29), "   ", -150.0).is_none());
    }

    #[test]
    fn test_new_rejects_non_finite_amount() {
        assert!(TransactionRecord::new(date(2021, 4, 29), "Fee", f64::NAN).is_none());
        assert!(TransactionRecord::new(date(2021, 4, 29), "Fee", f64::INFINITY).is_none());
    }
}
