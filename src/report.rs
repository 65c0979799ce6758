//! Report composition: header band, search metadata, the per-kind body and
//! the page footers.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, warn};

use crate::canvas::Canvas;
use crate::error::ReportError;
use crate::layout::LayoutCursor;
use crate::model::{SearchKind, SearchPayload, SearchResult};
use crate::sections;
use crate::style::{Alignment, Rgb, TextStyle};

/// Title drawn in the header band and stored in the PDF metadata.
pub const REPORT_TITLE: &str = "Digital Footprint Report";

/// Product name carried by every footer.
pub const BRAND: &str = "Digital Footprint Collector";

const BANNER_HEIGHT: f32 = 40.0;
const BODY_START_Y: f32 = 50.0;
const FOOTER_OFFSET: f32 = 10.0;

/// A composed report, ready to be rendered or saved.
pub struct Report {
    filename: String,
    canvas: Canvas,
}

impl Report {
    pub(crate) fn new(filename: String, canvas: Canvas) -> Self {
        Self { filename, canvas }
    }

    /// File name the report is saved under.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The composed pages, for inspection.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Renders the PDF without writing it anywhere.
    pub fn to_pdf_bytes(&self) -> Result<Vec<u8>, ReportError> {
        self.canvas.to_pdf_bytes()
    }

    /// Writes the PDF into `dir` under [`Report::filename`] and returns the full path.
    pub fn save(self, dir: impl AsRef<Path>) -> Result<PathBuf, ReportError> {
        let path = dir.as_ref().join(&self.filename);
        self.canvas.finalize(&path)?;
        Ok(path)
    }
}

pub(crate) fn draw_header(canvas: &mut Canvas, timestamp: &str) {
    debug!("drawing report header");
    let width = canvas.page_width();
    let center = width / 2.0;

    canvas.fill_rect(0.0, 0.0, width, BANNER_HEIGHT, Rgb::INDIGO);
    canvas.write_text(
        REPORT_TITLE,
        center,
        20.0,
        &TextStyle::new(24.0).bold().colored(Rgb::WHITE),
        Alignment::Center,
    );
    canvas.write_text(
        format!("Generated on {}", format_generated_on(timestamp)),
        center,
        30.0,
        &TextStyle::new(10.0).colored(Rgb::WHITE),
        Alignment::Center,
    );
}

pub(crate) fn draw_body(canvas: &mut Canvas, result: &SearchResult) -> Result<(), ReportError> {
    debug!("drawing {} report body", result.kind());
    let mut cursor = LayoutCursor::new(BODY_START_Y);

    sections::heading(canvas, &cursor, "Search Information", 16.0);
    cursor.advance(10.0);
    sections::body_line(canvas, &cursor, format!("Query: {}", result.query));
    cursor.advance(7.0);
    sections::body_line(canvas, &cursor, format!("Type: {}", result.kind().label()));
    cursor.advance(15.0);

    match &result.payload {
        SearchPayload::Username(payload) => sections::username::render(canvas, &mut cursor, payload),
        SearchPayload::Email(payload) => sections::email::render(canvas, &mut cursor, payload),
        SearchPayload::Name(payload) => sections::name::render(canvas, &mut cursor, payload),
    }
}

/// Stamps "Page i of N" on every page.  Runs once, after all content is placed.
pub(crate) fn draw_footers(canvas: &mut Canvas) -> Result<(), ReportError> {
    let count = canvas.page_count();
    debug!("stamping footers on {count} pages");
    let style = TextStyle::new(8.0).colored(Rgb::GREY);
    let center = canvas.page_width() / 2.0;
    let baseline = canvas.page_height() - FOOTER_OFFSET;

    for page in 1..=count {
        canvas.set_page(page)?;
        canvas.write_text(
            footer_text(page, count),
            center,
            baseline,
            &style,
            Alignment::Center,
        );
    }
    Ok(())
}

/// Footer line for page `page` of `count`.
pub fn footer_text(page: usize, count: usize) -> String {
    format!("Page {page} of {count} | {BRAND}")
}

/// `DFC_{type}_{query}_{YYYY-MM-DD}.pdf`, with the query reduced to ASCII alphanumerics.
pub fn report_filename(kind: SearchKind, query: &str, date: NaiveDate) -> String {
    format!(
        "DFC_{}_{}_{}.pdf",
        kind.as_str(),
        sanitize_query(query),
        date.format("%Y-%m-%d")
    )
}

/// Replaces every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize_query(query: &str) -> String {
    query
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}

/// Formats a backend timestamp as `M/D/YYYY, h:mm:ss AM`.
///
/// Accepts RFC 3339 as well as the offset-less `YYYY-MM-DDTHH:MM:SS[.f]` the
/// backend emits.  Anything else is returned unchanged.
pub fn format_generated_on(timestamp: &str) -> String {
    const DISPLAY: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return parsed.naive_local().format(DISPLAY).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(DISPLAY).to_string();
    }

    warn!("unrecognised timestamp `{timestamp}`, printing it verbatim");
    timestamp.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_everything_but_ascii_alphanumerics() {
        assert_eq!(sanitize_query("john doe?"), "john_doe_");
        assert_eq!(sanitize_query("jane.doe@example.com"), "jane_doe_example_com");
        assert_eq!(sanitize_query("Zoë"), "Zo_");
    }

    #[test]
    fn filename_uses_kind_query_and_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        assert_eq!(
            report_filename(SearchKind::Name, "John Doe", date),
            "DFC_name_John_Doe_2024-01-15.pdf"
        );
        assert_eq!(
            report_filename(SearchKind::Username, "octocat", date),
            "DFC_username_octocat_2024-01-15.pdf"
        );
    }

    #[test]
    fn formats_backend_timestamps() {
        assert_eq!(
            format_generated_on("2024-01-15T10:30:45.123456"),
            "1/15/2024, 10:30:45 AM"
        );
        assert_eq!(
            format_generated_on("2024-11-03T21:05:09Z"),
            "11/3/2024, 9:05:09 PM"
        );
        assert_eq!(format_generated_on("yesterday"), "yesterday");
    }

    #[test]
    fn footer_names_page_and_brand() {
        assert_eq!(footer_text(2, 3), "Page 2 of 3 | Digital Footprint Collector");
    }
}
