//! Turn input files into per-document text. `.txt` files are read as-is;
//! PDFs are handed to `pdftotext -layout` (poppler-utils), keeping actual
//! PDF parsing outside this tool.

use anyhow::{Context, Result, bail};
use bankcsv_core::DocumentText;
use std::fs;
use std::path::Path;
use std::process::Command;

pub fn read_document(path: &Path) -> Result<DocumentText> {
    let id = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let is_pdf = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    let text = if is_pdf {
        run_pdftotext(path)?
    } else {
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
    };

    Ok(DocumentText::new(id, text))
}

/// Run `pdftotext -layout <file> -` and capture stdout.
fn run_pdftotext(file: &Path) -> Result<String> {
    which::which("pdftotext")
        .context("pdftotext not installed (poppler-utils); pass extracted .txt files instead")?;

    let file_str = file
        .to_str()
        .with_context(|| format!("invalid file path: {}", file.display()))?;

    let output = Command::new("pdftotext")
        .args(["-layout", file_str, "-"])
        .output()
        .context("run pdftotext")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext failed (exit {}): {}",
            output.status.code().unwrap_or(-1),
            stderr.trim()
        );
    }

    let text = String::from_utf8_lossy(&output.stdout).to_string();
    if text.trim().is_empty() {
        bail!("no text in {} (scanned/image-only PDF?)", file.display());
    }

    Ok(text)
}
