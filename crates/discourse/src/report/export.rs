//! High-intensity tweet export for qualitative follow-up.

use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;
use std::path::Path;

use crate::analysis::ScoredTweet;
use crate::error::Result;

use super::writer::{create, ensure_parent, INTENSITY_COLUMN};

/// Frames exported next to the score, in column order.
pub const EXPORT_FRAMES: [&str; 4] = ["la_casta", "kirchnerismo", "fiscal_terrorism", "war_language"];

/// Tweets with intensity of at least `threshold`, highest first.
///
/// Ties keep corpus order.
#[must_use]
pub fn high_intensity(scored: &[ScoredTweet], threshold: u32) -> Vec<&ScoredTweet> {
    let mut selected: Vec<&ScoredTweet> = scored
        .iter()
        .filter(|s| s.security_intensity() >= threshold)
        .collect();
    selected.sort_by(|a, b| b.security_intensity().cmp(&a.security_intensity()));
    selected
}

fn export_header() -> Vec<&'static str> {
    let mut header = vec!["date", "text", INTENSITY_COLUMN, "total_engagement"];
    header.extend(EXPORT_FRAMES);
    header
}

fn export_record(s: &ScoredTweet) -> Vec<String> {
    let tweet = s.tweet();
    let mut record = vec![
        tweet
            .posted_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        tweet.text.clone().unwrap_or_default(),
        s.security_intensity().to_string(),
        tweet
            .engagement
            .total()
            .map(|e| e.to_string())
            .unwrap_or_default(),
    ];
    record.extend(EXPORT_FRAMES.iter().map(|f| s.counts().get(f).to_string()));
    record
}

/// Write the high-intensity selection as CSV.
///
/// Frames absent from the active lexicon are written as zero.
pub fn write_high_intensity<W: Write>(writer: W, selected: &[&ScoredTweet]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(export_header())?;
    for s in selected {
        csv_writer.write_record(export_record(s))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Save the high-intensity selection as an Excel workbook.
///
/// Date and text stay strings; the score, engagement and frame columns
/// are written as numbers.
pub fn save_high_intensity_xlsx(path: &Path, selected: &[&ScoredTweet]) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("high_intensity")?;

    for (col, name) in export_header().into_iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &bold)?;
    }
    for (row, s) in selected.iter().enumerate() {
        let row = row as u32 + 1;
        for (col, value) in export_record(s).into_iter().enumerate() {
            let col = col as u16;
            if col < 2 {
                sheet.write_string(row, col, value)?;
            } else if let Ok(number) = value.parse::<f64>() {
                sheet.write_number(row, col, number)?;
            }
        }
    }

    ensure_parent(path)?;
    workbook.save(path)?;
    Ok(())
}

/// Select and save high-intensity tweets. Returns how many were exported.
///
/// A `.xlsx` path writes a workbook, anything else writes CSV.
pub fn export_high_intensity(path: &Path, scored: &[ScoredTweet], threshold: u32) -> Result<usize> {
    let selected = high_intensity(scored, threshold);
    let is_workbook = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    if is_workbook {
        save_high_intensity_xlsx(path, &selected)?;
    } else {
        write_high_intensity(create(path)?, &selected)?;
    }
    tracing::info!(
        path = %path.display(),
        threshold,
        exported = selected.len(),
        "Exported high-intensity tweets"
    );
    Ok(selected.len())
}
