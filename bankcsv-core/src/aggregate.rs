//! Order-preserving merge of per-document record lists.

use crate::types::TransactionRecord;

/// Concatenate per-document results in submission order, stamping each
/// record with its source identifier. No sorting, no deduplication, no
/// cross-document validation.
pub fn aggregate(per_document: Vec<(String, Vec<TransactionRecord>)>) -> Vec<TransactionRecord> {
    let mut out = Vec::new();
    for (doc_id, records) in per_document {
        for mut rec in records {
            rec.source_document = Some(doc_id.clone());
            out.push(rec);
        }
    }
    out
}
