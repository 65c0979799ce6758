//! PDF report engine for the Digital Footprint Collector.
//!
//! A [`SearchResult`] decoded from the backend's JSON is composed onto an
//! in-memory [`Canvas`] by [`ReportBuilder::build`] and rendered with
//! `printpdf` when the [`Report`] is saved.
//!
//! ```no_run
//! use dfc_report::{ReportBuilder, SearchResult};
//!
//! # fn main() -> Result<(), dfc_report::ReportError> {
//! let json = std::fs::read_to_string("result.json")?;
//! let result = SearchResult::from_json(&json)?;
//! let path = ReportBuilder::new().build(&result)?.save(".")?;
//! println!("{}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod canvas;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod render;
pub mod report;
pub mod samples;
pub mod sections;
pub mod style;
pub mod table;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use builder::{parse_export_date, ReportBuilder};
pub use canvas::{Canvas, PaperSize};
pub use error::ReportError;
pub use model::{SearchKind, SearchPayload, SearchResult};
pub use report::{report_filename, Report};
