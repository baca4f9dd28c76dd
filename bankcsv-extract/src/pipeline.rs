//! Conversion pipeline: route each document, run the matching extraction
//! path, and merge everything into one ordered record list.

use anyhow::Result;
use bankcsv_core::{DocumentText, LayoutKind, TransactionRecord, aggregate};
use bankcsv_ingest::{LayoutClassifier, normalize, parse_fixed_layout};

use crate::StatementExtractor;

/// Per-document failure notice, surfaced alongside whatever records the
/// rest of the batch produced.
#[derive(Debug)]
pub struct DocumentFailure {
    pub document: String,
    pub reason: String,
}

/// Outcome of one conversion request. Records live only for the duration
/// of the request; nothing is kept across calls.
#[derive(Debug, Default)]
pub struct ConversionOutcome {
    pub records: Vec<TransactionRecord>,
    pub failures: Vec<DocumentFailure>,
}

impl ConversionOutcome {
    /// The distinct "nothing extracted" outcome: zero records across the
    /// whole batch, whatever the per-document failures were.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Unified front over both extraction paths. Callers hand in documents and
/// get records back; which path served a given document stays internal.
pub struct Converter<E> {
    extractor: E,
    classifier: LayoutClassifier,
}

impl<E: StatementExtractor> Converter<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            classifier: bankcsv_ingest::classify,
        }
    }

    /// Swap the layout classifier (tests, forced layouts, other naming
    /// schemes) without touching the conversion call sites.
    pub fn with_classifier(mut self, classifier: LayoutClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Convert documents sequentially, one model call at a time. A failed
    /// document contributes zero records and is reported in the outcome;
    /// the remaining documents keep going.
    pub fn convert(&self, documents: &[DocumentText]) -> ConversionOutcome {
        let mut per_document = Vec::new();
        let mut failures = Vec::new();

        for doc in documents {
            match self.convert_one(doc) {
                Ok(records) => per_document.push((doc.id.clone(), records)),
                Err(err) => failures.push(DocumentFailure {
                    document: doc.id.clone(),
                    reason: format!("{err:#}"),
                }),
            }
        }

        ConversionOutcome {
            records: aggregate(per_document),
            failures,
        }
    }

    fn convert_one(&self, doc: &DocumentText) -> Result<Vec<TransactionRecord>> {
        match (self.classifier)(&doc.id) {
            LayoutKind::FixedColumnAbsa => {
                let cleaned = normalize(&doc.text, LayoutKind::FixedColumnAbsa);
                parse_fixed_layout(&cleaned)
            }
            LayoutKind::FreeForm => self.extractor.extract(&doc.text),
        }
    }
}
