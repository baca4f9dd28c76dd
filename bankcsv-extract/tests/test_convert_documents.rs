use anyhow::{Result, bail};
use bankcsv_core::{DocumentText, TransactionRecord, write_csv};
use bankcsv_extract::{Converter, StatementExtractor};
use chrono::NaiveDate;

/// Stand-in for the network-backed extractor: canned records, or a canned
/// failure when `fail` is set.
struct FakeExtractor {
    records: Vec<TransactionRecord>,
    fail: bool,
}

impl FakeExtractor {
    fn returning(records: Vec<TransactionRecord>) -> Self {
        Self {
            records,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
        }
    }
}

impl StatementExtractor for FakeExtractor {
    fn extract(&self, _text: &str) -> Result<Vec<TransactionRecord>> {
        if self.fail {
            bail!("transport error: connection refused");
        }
        Ok(self.records.clone())
    }
}

fn rec(day: u32, desc: &str, amount: f64) -> TransactionRecord {
    TransactionRecord::new(
        NaiveDate::from_ymd_opt(2021, 4, day).unwrap(),
        desc,
        amount,
    )
    .unwrap()
}

#[test]
fn test_grammar_and_model_paths_merge_in_order() {
    // Doc 1 hits the ABSA grammar but matches nothing; doc 2 goes to the
    // model path and yields three records, tagged with doc 2's identifier.
    let converter = Converter::new(FakeExtractor::returning(vec![
        rec(1, "Salary", 30000.0),
        rec(2, "Groceries", -842.5),
        rec(3, "Fuel", -600.0),
    ]));

    let docs = vec![
        DocumentText::new("absa_march.pdf", "Nothing that looks like a transaction row"),
        DocumentText::new("fnb_march.pdf", "free-form statement text"),
    ];
    let outcome = converter.convert(&docs);

    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.records.len(), 3);
    assert!(
        outcome
            .records
            .iter()
            .all(|r| r.source_document.as_deref() == Some("fnb_march.pdf"))
    );
    assert_eq!(outcome.records[0].description, "Salary");
    assert_eq!(outcome.records[2].description, "Fuel");
}

#[test]
fn test_absa_document_never_touches_the_extractor() {
    // A failing extractor proves the grammar path handled the document.
    let converter = Converter::new(FakeExtractor::failing());
    let docs = vec![DocumentText::new(
        "absa_april.pdf",
        "29/04/2021  Ibank Payment To Settlement   150.00",
    )];
    let outcome = converter.convert(&docs);

    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].amount, -150.0);
    assert_eq!(
        outcome.records[0].source_document.as_deref(),
        Some("absa_april.pdf")
    );
}

#[test]
fn test_failed_document_contributes_zero_records_and_batch_continues() {
    let converter = Converter::new(FakeExtractor::failing());
    let docs = vec![
        DocumentText::new("fnb_march.pdf", "free-form text"),
        DocumentText::new("absa_april.pdf", "29/04/2021  Monthly Fee   55.00"),
    ];
    let outcome = converter.convert(&docs);

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].document, "fnb_march.pdf");
    assert!(outcome.failures[0].reason.contains("transport error"));

    // The grammar document still went through.
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].amount, -55.0);
}

#[test]
fn test_nothing_extracted_outcome() {
    let converter = Converter::new(FakeExtractor::failing());
    let docs = vec![DocumentText::new("fnb.pdf", "text")];
    let outcome = converter.convert(&docs);

    assert!(outcome.is_empty());
    assert_eq!(outcome.failures.len(), 1);
}

#[test]
fn test_classifier_override_forces_grammar_path() {
    use bankcsv_core::LayoutKind;

    fn always_absa(_id: &str) -> LayoutKind {
        LayoutKind::FixedColumnAbsa
    }

    let converter = Converter::new(FakeExtractor::failing()).with_classifier(always_absa);
    let docs = vec![DocumentText::new(
        "misnamed_statement.pdf",
        "29/04/2021  Cash Withdrawal   200.00",
    )];
    let outcome = converter.convert(&docs);

    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.records.len(), 1);
}

#[test]
fn test_end_to_end_csv_shape() {
    let converter = Converter::new(FakeExtractor::returning(vec![rec(29, "Acb Credit Yoco", 2500.0)]));
    let docs = vec![DocumentText::new("yoco_april.pdf", "free-form text")];
    let outcome = converter.convert(&docs);

    let mut buf = Vec::new();
    write_csv(&outcome.records, &mut buf).unwrap();
    let csv = String::from_utf8(buf).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "source_file,date,description,amount");
    assert_eq!(lines[1], "yoco_april.pdf,2021-04-29,Acb Credit Yoco,2500.00");
}
