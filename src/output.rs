// src/output.rs
// =============================================================================
// This module writes scraped pages somewhere a human (or a script) can use
// them.
//
// Formats:
// - JSON: every field of every record, pretty-printed
// - CSV: one row per page with a shortened content column
// - Table: printed to the terminal with a short summary
// =============================================================================

use crate::error::OutputError;
use crate::record::PageRecord;
use clap::ValueEnum;
use std::fs::File;
use std::io::Write;
use std::path::Path;

// Content longer than this is cut in CSV output
const CSV_CONTENT_LIMIT: usize = 500;

/// File format for saved results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

// Saves records to `path` in the given format
pub fn save(records: &[PageRecord], path: &Path, format: OutputFormat) -> Result<(), OutputError> {
    let file = File::create(path)?;
    match format {
        OutputFormat::Json => write_json(records, file),
        OutputFormat::Csv => write_csv(records, file),
    }
}

pub fn write_json<W: Write>(records: &[PageRecord], mut writer: W) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_csv<W: Write>(records: &[PageRecord], writer: W) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["url", "title", "content", "scraped_at", "status_code"])?;

    for record in records {
        writer.write_record([
            record.address.as_str(),
            record.title.as_str(),
            truncate(&record.body, CSV_CONTENT_LIMIT).as_str(),
            record.fetched_at.to_rfc3339().as_str(),
            record.status_code.to_string().as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

// Cuts text to `limit` characters, adding "..." when something was removed
//
// Counts characters, not bytes, so we never split a UTF-8 sequence.
fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

// Prints results as a human-readable table in the terminal
pub fn print_table(records: &[PageRecord]) {
    println!("{:<60} {:<8} {:<40}", "URL", "STATUS", "TITLE");
    println!("{}", "=".repeat(110));

    for record in records {
        println!(
            "{:<60} {:<8} {:<40}",
            shorten(&record.address, 57),
            record.status_code,
            shorten(&record.title, 37)
        );
    }

    println!();
    print_summary(records);
}

pub fn print_summary(records: &[PageRecord]) {
    let total_chars: usize = records.iter().map(PageRecord::content_chars).sum();
    let total_images: usize = records.iter().map(|r| r.attributes.images.len()).sum();

    println!("📊 Summary:");
    println!("   📄 Pages: {}", records.len());
    println!("   📝 Content characters: {}", total_chars);
    println!("   🖼️  Images found: {}", total_images);
}

// Truncate long values so the table columns line up
fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PageAttributes, ProductDetails};
    use chrono::{TimeZone, Utc};

    fn record(address: &str, body: &str) -> PageRecord {
        PageRecord {
            address: address.to_string(),
            title: "Title, with comma".to_string(),
            body: body.to_string(),
            attributes: PageAttributes::default(),
            fetched_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            status_code: 200,
        }
    }

    #[test]
    fn test_truncate_by_characters() {
        assert_eq!(truncate("héllo", 10), "héllo");
        assert_eq!(truncate("héllo", 2), "hé...");
    }

    #[test]
    fn test_json_round_trips_fields() {
        let mut buffer = Vec::new();
        write_json(&[record("https://example.com/", "text")], &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[0]["address"], "https://example.com/");
        assert_eq!(value[0]["status_code"], 200);
        assert_eq!(value[0]["fetched_at"], "2024-01-02T03:04:05Z");
        assert!(value[0]["attributes"].get("product").is_none());
    }

    #[test]
    fn test_json_includes_product_details() {
        let mut page = record("https://shop.test/p/1", "");
        page.attributes.product = Some(ProductDetails {
            name: "Kettle".to_string(),
            availability: "Unknown".to_string(),
            ..ProductDetails::default()
        });

        let mut buffer = Vec::new();
        write_json(&[page], &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[0]["attributes"]["product"]["name"], "Kettle");
        assert_eq!(value[0]["attributes"]["product"]["availability"], "Unknown");
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let mut buffer = Vec::new();
        write_csv(&[record("https://example.com/", "text")], &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("url,title,content,scraped_at,status_code"));
        assert_eq!(
            lines.next(),
            Some(r#"https://example.com/,"Title, with comma",text,2024-01-02T03:04:05+00:00,200"#)
        );
    }

    #[test]
    fn test_csv_content_is_shortened() {
        let long_body = "x".repeat(600);
        let mut buffer = Vec::new();
        write_csv(&[record("https://example.com/", &long_body)], &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let expected = format!("{}...", "x".repeat(500));
        assert!(text.contains(&expected));
        assert!(!text.contains(&"x".repeat(501)));
    }
}
