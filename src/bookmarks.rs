//! PDF outline entries for report sections, embedded with `lopdf` after rendering.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId};
use thiserror::Error;

use crate::canvas::SectionMark;

/// Errors raised while embedding the section outline into rendered bytes.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// The rendered bytes could not be parsed back.
    #[error("failed to parse rendered PDF: {0}")]
    Parse(#[from] lopdf::Error),
    /// Re-serialising the document failed.
    #[error("failed to write outlined PDF: {0}")]
    Write(#[from] std::io::Error),
    /// The trailer has no `/Root` catalog reference.
    #[error("PDF catalog entry is missing")]
    MissingCatalog,
    /// The catalog object is not a dictionary.
    #[error("PDF catalog entry is not a dictionary")]
    InvalidCatalog,
    /// A section points at a page the document does not contain.
    #[error("section `{title}` refers to missing page {page}")]
    MissingPage {
        /// Heading text of the section.
        title: String,
        /// 1-based page the heading was drawn on.
        page: usize,
    },
}

/// Adds a flat `/Outlines` tree with one entry per section heading.
///
/// Each entry jumps to the page its heading was drawn on.  Bytes are returned
/// unchanged when there are no sections.
pub fn apply_section_bookmarks(
    pdf_bytes: &[u8],
    sections: &[SectionMark],
) -> Result<Vec<u8>, BookmarkError> {
    if sections.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let mut document = Document::load_mem(pdf_bytes)?;
    let pages = document.get_pages();
    let entries = allocate_entries(&mut document, sections, &pages)?;

    let outlines_id = document.new_object_id();
    write_entries(&mut document, outlines_id, &entries);
    attach_outlines(&mut document, outlines_id, &entries)?;

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

struct Entry<'a> {
    id: ObjectId,
    page: ObjectId,
    title: &'a str,
}

fn allocate_entries<'a>(
    document: &mut Document,
    sections: &'a [SectionMark],
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<Entry<'a>>, BookmarkError> {
    sections
        .iter()
        .map(|mark| {
            let page = u32::try_from(mark.page)
                .ok()
                .and_then(|number| pages.get(&number).copied())
                .ok_or_else(|| BookmarkError::MissingPage {
                    title: mark.title.clone(),
                    page: mark.page,
                })?;
            Ok(Entry {
                id: document.new_object_id(),
                page,
                title: mark.title.as_str(),
            })
        })
        .collect()
}

fn write_entries(document: &mut Document, outlines_id: ObjectId, entries: &[Entry<'_>]) {
    for (index, entry) in entries.iter().enumerate() {
        let mut dictionary = Dictionary::new();
        dictionary.set("Title", Object::string_literal(entry.title));
        dictionary.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(entry.page),
                Object::Name(b"Fit".to_vec()),
            ]),
        );
        dictionary.set("Parent", Object::Reference(outlines_id));
        if let Some(previous) = index.checked_sub(1).map(|i| &entries[i]) {
            dictionary.set("Prev", Object::Reference(previous.id));
        }
        if let Some(next) = entries.get(index + 1) {
            dictionary.set("Next", Object::Reference(next.id));
        }
        document
            .objects
            .insert(entry.id, Object::Dictionary(dictionary));
    }
}

fn attach_outlines(
    document: &mut Document,
    outlines_id: ObjectId,
    entries: &[Entry<'_>],
) -> Result<(), BookmarkError> {
    let mut outlines = Dictionary::new();
    outlines.set("Type", Object::Name(b"Outlines".to_vec()));
    outlines.set("Count", Object::Integer(entries.len() as i64));
    if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
        outlines.set("First", Object::Reference(first.id));
        outlines.set("Last", Object::Reference(last.id));
    }
    document
        .objects
        .insert(outlines_id, Object::Dictionary(outlines));

    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;
    let catalog = document
        .objects
        .get_mut(&catalog_id)
        .ok_or(BookmarkError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::InvalidCatalog)?;
    catalog.set("Outlines", Object::Reference(outlines_id));
    catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, PaperSize};
    use crate::style::{Alignment, TextStyle};

    fn two_page_canvas() -> Canvas {
        let mut canvas = Canvas::new("Outline", PaperSize::A4);
        canvas.mark_section("First");
        canvas.write_text("First", 14.0, 30.0, &TextStyle::new(14.0), Alignment::Left);
        canvas.new_page();
        canvas.mark_section("Second");
        canvas.write_text("Second", 14.0, 30.0, &TextStyle::new(14.0), Alignment::Left);
        canvas
    }

    #[test]
    fn outline_lists_every_section() {
        let canvas = two_page_canvas();
        let plain = crate::render::render_pdf(&canvas).expect("render");
        let outlined = apply_section_bookmarks(&plain, canvas.sections()).expect("bookmarks");

        let document = Document::load_mem(&outlined).expect("reload");
        let catalog = document.catalog().expect("catalog");
        let outlines_id = catalog
            .get(b"Outlines")
            .and_then(Object::as_reference)
            .expect("outlines reference");
        let outlines = document.get_dictionary(outlines_id).expect("outlines");
        assert_eq!(outlines.get(b"Count").and_then(Object::as_i64).expect("count"), 2);
    }

    #[test]
    fn missing_page_is_reported() {
        let canvas = Canvas::new("Outline", PaperSize::A4);
        let plain = crate::render::render_pdf(&canvas).expect("render");
        let marks = vec![SectionMark {
            title: "Ghost".into(),
            page: 4,
        }];

        let err = apply_section_bookmarks(&plain, &marks).expect_err("page 4 does not exist");
        assert!(matches!(err, BookmarkError::MissingPage { page: 4, .. }));
    }

    #[test]
    fn no_sections_leaves_bytes_untouched() {
        let canvas = Canvas::new("Outline", PaperSize::A4);
        let plain = crate::render::render_pdf(&canvas).expect("render");
        assert_eq!(apply_section_bookmarks(&plain, &[]).expect("noop"), plain);
    }
}
