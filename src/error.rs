//! Error type shared by every stage of report generation.

use thiserror::Error;

use crate::model::SearchKind;

/// Errors produced while decoding a search result or rendering its report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The input was not valid JSON, or the envelope fields were missing.
    #[error("invalid search result JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The `type` tag named a search kind the engine does not know.
    #[error("unknown search type `{0}` (expected username, email or name)")]
    UnknownSearchType(String),

    /// The `results` payload could not be read as the variant named by `type`.
    #[error("results payload does not match search type `{kind}`: {source}")]
    PayloadMismatch {
        /// Kind declared by the envelope.
        kind: SearchKind,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// A table body row had a different number of cells than the header.
    #[error("table row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Column count taken from the header.
        expected: usize,
        /// Cell count found in the row.
        found: usize,
    },

    /// A page number outside `1..=page_count` was selected.
    #[error("page {page} is out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Requested 1-based page number.
        page: usize,
        /// Pages currently in the document.
        count: usize,
    },

    /// An export date could not be parsed.
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The PDF backend rejected the document.
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    /// Writing the finished document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Section bookmarks could not be embedded.
    #[cfg(feature = "bookmarks")]
    #[error("bookmark embedding failed: {0}")]
    Bookmark(#[from] crate::bookmarks::BookmarkError),
}
