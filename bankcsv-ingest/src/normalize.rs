//! Layout-specific text cleanup applied before grammar parsing.
//!
//! PDF-to-text output does not preserve table structure: rows wrap, and
//! column gaps arrive as arbitrary whitespace runs. For the fixed-column
//! ABSA layout we rebuild row boundaries well enough for the grammar to
//! tokenize. Heuristic and layout-specific; a statement-format change will
//! break it before it breaks the parser.

use anyhow::Result;
use bankcsv_core::LayoutKind;
use regex::Regex;

/// Normalize raw extracted text for the given layout.
///
/// FixedColumnAbsa: merge line breaks into single spaces (rejoining wrapped
/// rows), collapse runs of 2+ whitespace into a single tab (column
/// delimiter), then restore a row boundary after each trailing-balance
/// token that is immediately followed by a date token.
///
/// Never fails; worst case the input comes back unchanged. FreeForm text is
/// always returned unchanged.
pub fn normalize(raw: &str, layout: LayoutKind) -> String {
    match layout {
        LayoutKind::FixedColumnAbsa => {
            normalize_fixed_column(raw).unwrap_or_else(|_| raw.to_string())
        }
        LayoutKind::FreeForm => raw.to_string(),
    }
}

fn normalize_fixed_column(raw: &str) -> Result<String> {
    let line_breaks = Regex::new(r"[ \t]*[\r\n]+[ \t]*")?;
    let column_gap = Regex::new(r"[ \t]{2,}")?;
    // Balance column: decimal amount, ABSA trailing-minus and Cr suffixes
    // allowed. A date right after it means a new row started there.
    let row_boundary = Regex::new(concat!(
        r"(?P<bal>\d[\d ,]*\.\d{2}-?(?: ?Cr)?)",
        r"[\t ]+",
        r"(?P<date>\d{1,2}/\d{1,2}/\d{4})",
    ))?;

    let merged = line_breaks.replace_all(raw.trim(), " ");
    let columns = column_gap.replace_all(&merged, "\t");
    Ok(row_boundary
        .replace_all(&columns, "${bal}\n${date}")
        .into_owned())
}
