//! ABSA cheque-account statement parser (fixed-column text).
//!
//! Expected rows after normalization (tab = rebuilt column gap):
//!   29/04/2021  Ibank Payment To Settlement   150.00
//!   29/04/2021  Acb Credit Yoco               150.00   2 500.00
//!
//! Row grammar: DATE DESC AMOUNT [CREDIT]? [EXTRA-NUMERIC]*. ABSA prints
//! debits with a trailing minus (`150.00-`); that marker always means debit
//! and forces the amount negative. Otherwise a populated credit column wins
//! and the amount is that value, positive; a lone unmarked amount is still
//! treated as a debit.
//!
//! Anything that does not match is dropped silently: missed transactions
//! are preferred over garbage rows.

use anyhow::Result;
use bankcsv_core::TransactionRecord;
use chrono::NaiveDate;
use regex::Regex;

/// Labels marking non-transaction rows (headers, metadata, page furniture).
/// Case-insensitive substring match.
const EXCLUDED_MARKERS: &[&str] = &[
    "transaction description",
    "balance brought forward",
    "balance carried forward",
    "cheque account",
    "statement no",
    "vat reg",
    "page",
];

fn is_excluded(line: &str) -> bool {
    let lower = line.to_lowercase();
    EXCLUDED_MARKERS.iter().any(|m| lower.contains(m))
}

fn parse_money(token: &str) -> Option<f64> {
    // Sign is resolved by column position, not by the token itself.
    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse normalized fixed-column text into transactions, one pass.
///
/// Per-line failures (bad date, bad numbers, no grammar match) drop the
/// line and keep going; this function itself only fails if a grammar regex
/// will not compile.
pub fn parse_fixed_layout(text: &str) -> Result<Vec<TransactionRecord>> {
    let gap = Regex::new(r"\s+")?;
    // Monetary token: thousands groups split by space or comma, two decimals.
    let row = Regex::new(concat!(
        r"^(?P<date>\d{1,2}/\d{1,2}/\d{4})\s+",
        // Shortest non-numeric-led run separating the date from the first
        // monetary token; a digit-led "description" is not a transaction.
        r"(?P<desc>[^\d\s]\S*(?:\s+\S+)*?)\s+",
        r"(?P<amount>-?\d{1,3}(?:[ ,]?\d{3})*\.\d{2}-?)",
        r"(?:\s+(?P<credit>\d{1,3}(?:[ ,]?\d{3})*\.\d{2}(?: ?Cr)?))?",
        r"(?:\s+-?\d{1,3}(?:[ ,]?\d{3})*\.\d{2}-?(?: ?Cr)?)*",
        r"\s*$",
    ))?;

    let mut out = Vec::new();
    for line in text.lines() {
        let flat = gap.replace_all(line.trim(), " ");
        if flat.is_empty() || is_excluded(&flat) {
            continue;
        }
        let Some(caps) = row.captures(&flat) else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(&caps["date"], "%d/%m/%Y") else {
            continue;
        };
        let primary = &caps["amount"];
        // ABSA's trailing minus is an explicit debit marker; when present,
        // whatever follows is the running balance, not a credit column.
        let resolved = if primary.ends_with('-') {
            parse_money(primary).map(|v| -v)
        } else if let Some(credit) = caps.name("credit") {
            parse_money(credit.as_str())
        } else {
            parse_money(primary).map(|v| -v)
        };
        let Some(amount) = resolved else {
            continue;
        };
        if let Some(rec) = TransactionRecord::new(date, &caps["desc"], amount) {
            out.push(rec);
        }
    }
    Ok(out)
}
