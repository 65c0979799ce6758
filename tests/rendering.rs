use chrono::NaiveDate;
use dfc_report::{samples, Report, ReportBuilder, SearchResult};
use lopdf::Document;
use sha2::{Digest, Sha256};

fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date")
}

fn build(result: &SearchResult) -> Report {
    ReportBuilder::new()
        .with_export_date(export_date())
        .build(result)
        .expect("build report")
}

/// Hashes the page content streams in page order.
///
/// Document metadata carries creation dates and random identifiers, so only
/// what is actually drawn takes part in the comparison.
fn content_hash(bytes: &[u8]) -> [u8; 32] {
    let document = Document::load_mem(bytes).expect("parse rendered PDF");
    let mut hasher = Sha256::new();
    for (number, page_id) in document.get_pages() {
        let content = document
            .get_page_content(page_id)
            .expect("page content stream");
        hasher.update(number.to_be_bytes());
        hasher.update(&content);
    }
    hasher.finalize().into()
}

#[test]
fn renders_non_empty_output() {
    for sample in samples::all() {
        let bytes = build(&sample).to_pdf_bytes().expect("render");
        assert!(bytes.starts_with(b"%PDF-"), "{} report is not a PDF", sample.kind());
        assert!(bytes.len() > 1_000, "{} report is suspiciously small", sample.kind());
    }
}

#[test]
fn pdf_page_count_matches_canvas() {
    for sample in samples::all() {
        let report = build(&sample);
        let bytes = report.to_pdf_bytes().expect("render");
        let document = Document::load_mem(&bytes).expect("parse rendered PDF");
        assert_eq!(document.get_pages().len(), report.canvas().page_count());
    }
}

#[test]
fn rendering_is_deterministic() {
    let result = samples::name_result();
    let first = build(&result).to_pdf_bytes().expect("first render");
    let second = build(&result).to_pdf_bytes().expect("second render");
    assert_eq!(content_hash(&first), content_hash(&second));
}

#[test]
fn different_inputs_render_differently() {
    let username = build(&samples::username_result())
        .to_pdf_bytes()
        .expect("render");
    let email = build(&samples::email_result()).to_pdf_bytes().expect("render");
    assert_ne!(content_hash(&username), content_hash(&email));
}

#[test]
fn save_writes_under_derived_filename() {
    let dir = std::env::temp_dir().join(format!("dfc_report_save_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");

    let path = build(&samples::username_result())
        .save(&dir)
        .expect("save report");

    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("DFC_username_octocat_2024-01-15.pdf")
    );
    let bytes = std::fs::read(&path).expect("read back");
    assert!(bytes.starts_with(b"%PDF-"));

    std::fs::remove_dir_all(&dir).expect("clean up");
}

#[cfg(feature = "bookmarks")]
#[test]
fn bookmarks_feature_adds_outline() {
    let report = ReportBuilder::new()
        .with_export_date(export_date())
        .with_bookmarks(true)
        .build(&samples::name_result())
        .expect("build");
    let bytes = report.to_pdf_bytes().expect("render");

    let document = Document::load_mem(&bytes).expect("parse");
    let catalog = document.catalog().expect("catalog");
    assert!(catalog.has(b"Outlines"));
}
