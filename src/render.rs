//! `printpdf` backend: replays a canvas display list into PDF bytes.
//!
//! The canvas measures from the top-left corner with y growing downwards,
//! PDF user space from the bottom-left corner with y growing upwards, so every
//! y is flipped against the page height on the way out.

use std::io::BufWriter;

use log::{debug, warn};
use printpdf::{
    Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Rect,
};

use crate::canvas::{Canvas, DrawOp, RectOp, TextRun};
use crate::error::ReportError;
use crate::fonts::{self, PT_PER_MM};
use crate::style::{FontFace, Rgb};

const LAYER_NAME: &str = "Layer 1";

/// The four Helvetica faces, registered once per document.
struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl FontSet {
    fn register(doc: &PdfDocumentReference) -> Result<Self, ReportError> {
        let add = |face| {
            doc.add_builtin_font(fonts::builtin_font(face))
                .map_err(|err| ReportError::Pdf(format!("font registration failed: {err}")))
        };
        Ok(Self {
            regular: add(FontFace::Regular)?,
            bold: add(FontFace::Bold)?,
            italic: add(FontFace::Italic)?,
            bold_italic: add(FontFace::BoldItalic)?,
        })
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Italic => &self.italic,
            FontFace::BoldItalic => &self.bold_italic,
        }
    }
}

fn pdf_color(color: Rgb) -> Color {
    let (r, g, b) = color.to_unit();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

/// Renders every page of `canvas` in order and returns the serialised document.
pub fn render_pdf(canvas: &Canvas) -> Result<Vec<u8>, ReportError> {
    let width = canvas.page_width();
    let height = canvas.page_height();

    let (doc, first_page, first_layer) =
        PdfDocument::new(canvas.title(), Mm(width), Mm(height), LAYER_NAME);
    let fonts = FontSet::register(&doc)?;

    for (index, page) in canvas.pages().iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) = doc.add_page(Mm(width), Mm(height), LAYER_NAME);
            doc.get_page(page_ref).get_layer(layer_ref)
        };

        for op in page.ops() {
            match op {
                DrawOp::Text(run) => draw_text(&layer, &fonts, run, height),
                DrawOp::Rect(rect) => draw_rect(&layer, rect, height),
            }
        }
        debug!("rendered page {} ({} ops)", index + 1, page.ops().len());
    }

    let mut buffer = BufWriter::new(Vec::new());
    doc.save(&mut buffer)
        .map_err(|err| ReportError::Pdf(format!("save failed: {err}")))?;
    buffer
        .into_inner()
        .map_err(|err| ReportError::Pdf(format!("flush failed: {err}")))
}

fn draw_text(layer: &PdfLayerReference, fonts: &FontSet, run: &TextRun, page_height: f32) {
    let dropped = fonts::unencodable_count(&run.text);
    if dropped > 0 {
        warn!(
            "{dropped} character(s) outside WinAnsiEncoding will not be drawn in {:?}",
            run.text
        );
    }
    layer.set_fill_color(pdf_color(run.style.color()));
    layer.use_text(
        run.text.as_str(),
        run.style.size(),
        Mm(run.x),
        Mm(page_height - run.y),
        fonts.get(run.style.face()),
    );
}

fn draw_rect(layer: &PdfLayerReference, rect: &RectOp, page_height: f32) {
    let left = rect.x;
    let right = rect.x + rect.width;
    let top = page_height - rect.y;
    let bottom = page_height - (rect.y + rect.height);

    if let Some(fill) = rect.fill {
        layer.set_fill_color(pdf_color(fill));
        layer.add_rect(Rect::new(Mm(left), Mm(bottom), Mm(right), Mm(top)));
    }

    if let Some(stroke) = rect.stroke {
        layer.set_outline_color(pdf_color(stroke.color));
        layer.set_outline_thickness(stroke.width * PT_PER_MM);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(left), Mm(bottom)), false),
                (Point::new(Mm(right), Mm(bottom)), false),
                (Point::new(Mm(right), Mm(top)), false),
                (Point::new(Mm(left), Mm(top)), false),
            ],
            is_closed: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PaperSize;
    use crate::style::{Alignment, TextStyle};

    #[test]
    fn renders_one_pdf_page_per_canvas_page() {
        let mut canvas = Canvas::new("Render", PaperSize::Letter);
        canvas.fill_rect(0.0, 0.0, canvas.page_width(), 40.0, Rgb::INDIGO);
        canvas.write_text(
            "Hello",
            20.0,
            20.0,
            &TextStyle::new(24.0).bold().colored(Rgb::WHITE),
            Alignment::Left,
        );
        canvas.new_page();
        canvas.draw_rect(RectOp::new(14.0, 30.0, 50.0, 8.0).with_stroke(Rgb::GRID_LINE, 0.1));

        let bytes = render_pdf(&canvas).expect("render");
        assert!(bytes.starts_with(b"%PDF-"));

        let document = lopdf::Document::load_mem(&bytes).expect("parse");
        assert_eq!(document.get_pages().len(), 2);
    }

    #[test]
    fn text_outside_win_ansi_still_renders() {
        let mut canvas = Canvas::new("Render", PaperSize::A4);
        canvas.write_text(
            "Full Name: 山田 太郎",
            14.0,
            40.0,
            &TextStyle::new(11.0),
            Alignment::Left,
        );

        let bytes = render_pdf(&canvas).expect("render");
        let document = lopdf::Document::load_mem(&bytes).expect("parse");
        assert_eq!(document.get_pages().len(), 1);
    }
}
