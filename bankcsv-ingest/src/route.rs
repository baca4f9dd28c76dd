//! Per-document routing between the fixed grammar and the model extractor.

use bankcsv_core::LayoutKind;

/// Classifier resolving a document identifier to a layout.
///
/// Injectable so the mapping can be swapped or tested in isolation without
/// touching pipeline call sites.
pub type LayoutClassifier = fn(&str) -> LayoutKind;

/// Default classifier: filenames mentioning ABSA get the fixed-column
/// grammar; everything else goes to the model-backed path.
///
/// Deterministic and heuristic. A misnamed file silently gets the wrong
/// parser and degrades to zero or filtered records rather than failing.
pub fn classify(document_id: &str) -> LayoutKind {
    if document_id.to_ascii_lowercase().contains("absa") {
        LayoutKind::FixedColumnAbsa
    } else {
        LayoutKind::FreeForm
    }
}
