//! Report construction with the crate defaults.

use chrono::{NaiveDate, Utc};
use log::debug;

use crate::canvas::{Canvas, PaperSize};
use crate::error::ReportError;
use crate::model::SearchResult;
use crate::report::{self, Report, REPORT_TITLE};

#[cfg(feature = "hyphenation")]
use hyphenation::Standard;

/// Builder for [`Report`] instances.
///
/// Every setting is optional: without configuration reports are A4, dated
/// with today's UTC date and carry no outline.
#[derive(Default)]
pub struct ReportBuilder {
    paper_size: Option<PaperSize>,
    export_date: Option<NaiveDate>,
    bookmarks: bool,
    #[cfg(feature = "hyphenation")]
    hyphenator: Option<Standard>,
}

impl ReportBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper size of every page.
    pub fn with_paper_size(mut self, paper_size: PaperSize) -> Self {
        self.paper_size = Some(paper_size);
        self
    }

    /// Fixes the date used in the file name, making output reproducible.
    pub fn with_export_date(mut self, date: NaiveDate) -> Self {
        self.export_date = Some(date);
        self
    }

    /// Requests one PDF outline entry per section heading.
    ///
    /// Only takes effect when the crate is built with the `bookmarks` feature.
    pub fn with_bookmarks(mut self, enabled: bool) -> Self {
        self.bookmarks = enabled;
        self
    }

    /// Enables hyphenation of over-long words using the provided dictionary.
    #[cfg(feature = "hyphenation")]
    pub fn with_hyphenator(mut self, hyphenator: Standard) -> Self {
        self.hyphenator = Some(hyphenator);
        self
    }

    /// Composes the report for `result`.
    ///
    /// The header, body and footer phases each run exactly once and in that
    /// order, so the footer sees the final page count.
    pub fn build(self, result: &SearchResult) -> Result<Report, ReportError> {
        let paper = self.paper_size.unwrap_or_default();
        let date = self
            .export_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let mut canvas = Canvas::new(REPORT_TITLE, paper);
        canvas.set_bookmarks(self.bookmarks);
        #[cfg(feature = "hyphenation")]
        if let Some(hyphenator) = self.hyphenator {
            canvas.set_hyphenator(hyphenator);
        }

        report::draw_header(&mut canvas, &result.timestamp);
        report::draw_body(&mut canvas, result)?;
        report::draw_footers(&mut canvas)?;

        let filename = report::report_filename(result.kind(), &result.query, date);
        debug!("composed {filename} with {} pages", canvas.page_count());
        Ok(Report::new(filename, canvas))
    }
}

/// Parses a `YYYY-MM-DD` export date.
pub fn parse_export_date(value: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ReportError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;

    #[test]
    fn defaults_to_a4() {
        let report = ReportBuilder::new()
            .build(&samples::username_result())
            .expect("build");
        assert_eq!(report.canvas().paper(), PaperSize::A4);
    }

    #[test]
    fn paper_and_date_are_applied() {
        let date = parse_export_date("2024-02-29").expect("leap day");
        let report = ReportBuilder::new()
            .with_paper_size(PaperSize::Letter)
            .with_export_date(date)
            .build(&samples::email_result())
            .expect("build");

        assert_eq!(report.canvas().paper(), PaperSize::Letter);
        assert_eq!(
            report.filename(),
            "DFC_email_jane_doe_example_com_2024-02-29.pdf"
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(matches!(
            parse_export_date("15/01/2024"),
            Err(ReportError::InvalidDate(value)) if value == "15/01/2024"
        ));
        assert!(parse_export_date("2023-02-29").is_err());
    }
}
