//! In-memory drawing surface that reports are composed on.
//!
//! The canvas keeps one display list per page.  Drawing calls append
//! operations to the active page at absolute coordinates (millimetres, origin at
//! the top-left corner, y growing downwards); nothing touches the file system
//! until [`Canvas::finalize`] hands the display list to the PDF backend.
//! Because the whole document stays inspectable until then, tests can assert
//! on exactly what would be printed without parsing PDF output.

use std::fs;
use std::mem;
use std::path::Path;

use log::{debug, info};

use crate::error::ReportError;
use crate::fonts;
use crate::render;
use crate::style::{Alignment, Rgb, TextStyle};

#[cfg(feature = "hyphenation")]
use hyphenation::{Hyphenator, Standard};

/// Supported paper sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaperSize {
    /// ISO A4, 210 × 297 mm.
    #[default]
    A4,
    /// US Letter, 215.9 × 279.4 mm.
    Letter,
}

impl PaperSize {
    /// Page width in millimetres.
    pub fn width(self) -> f32 {
        match self {
            PaperSize::A4 => 210.0,
            PaperSize::Letter => 215.9,
        }
    }

    /// Page height in millimetres.
    pub fn height(self) -> f32 {
        match self {
            PaperSize::A4 => 297.0,
            PaperSize::Letter => 279.4,
        }
    }
}

/// A single line of text placed with its left edge at `x` and baseline at `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
}

/// Outline of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    /// Line width in millimetres.
    pub width: f32,
}

/// A rectangle whose top-left corner is at (`x`, `y`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectOp {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<Rgb>,
    pub stroke: Option<Stroke>,
}

impl RectOp {
    /// Creates an unpainted rectangle; set `fill` and/or `stroke` to make it visible.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: None,
        }
    }

    /// Sets the fill colour and returns the updated rectangle.
    pub fn with_fill(mut self, color: Rgb) -> Self {
        self.fill = Some(color);
        self
    }

    /// Sets the outline and returns the updated rectangle.
    pub fn with_stroke(mut self, color: Rgb, width: f32) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }
}

/// One entry of a page display list.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text(TextRun),
    Rect(RectOp),
}

/// Display list of one page, in drawing order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    ops: Vec<DrawOp>,
}

impl Page {
    /// Returns every operation on the page.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Iterates over the text runs on the page.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            DrawOp::Rect(_) => None,
        })
    }

    /// Iterates over the rectangles on the page.
    pub fn rects(&self) -> impl Iterator<Item = &RectOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect(rect) => Some(rect),
            DrawOp::Text(_) => None,
        })
    }
}

/// A report section heading and the 1-based page it starts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionMark {
    pub title: String,
    pub page: usize,
}

/// Summary of a table drawn on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRecord {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub header_fill: Rgb,
    /// 1-based page holding the first header band.
    pub first_page: usize,
    /// 1-based page holding the last row.
    pub last_page: usize,
    /// y immediately below the last row.
    pub end_y: f32,
}

/// Stateful drawing surface backing one report.
pub struct Canvas {
    title: String,
    paper: PaperSize,
    pages: Vec<Page>,
    active: usize,
    sections: Vec<SectionMark>,
    tables: Vec<TableRecord>,
    bookmarks: bool,
    #[cfg(feature = "hyphenation")]
    hyphenator: Option<Standard>,
}

impl Canvas {
    /// Creates a document with a single empty page.
    pub fn new(title: impl Into<String>, paper: PaperSize) -> Self {
        Self {
            title: title.into(),
            paper,
            pages: vec![Page::default()],
            active: 0,
            sections: Vec::new(),
            tables: Vec::new(),
            bookmarks: false,
            #[cfg(feature = "hyphenation")]
            hyphenator: None,
        }
    }

    /// Installs a hyphenation dictionary used when a single word is wider than a line.
    #[cfg(feature = "hyphenation")]
    pub fn set_hyphenator(&mut self, hyphenator: Standard) {
        self.hyphenator = Some(hyphenator);
    }

    /// Requests an outline entry per section when the document is rendered.
    pub fn set_bookmarks(&mut self, enabled: bool) {
        self.bookmarks = enabled;
    }

    /// Whether an outline is requested for the rendered document.
    pub fn bookmarks_enabled(&self) -> bool {
        self.bookmarks
    }

    /// Document title stored in the PDF metadata.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Paper size of every page.
    pub fn paper(&self) -> PaperSize {
        self.paper
    }

    /// Page width in millimetres.
    pub fn page_width(&self) -> f32 {
        self.paper.width()
    }

    /// Page height in millimetres.
    pub fn page_height(&self) -> f32 {
        self.paper.height()
    }

    /// Pages emitted so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 1-based number of the page receiving drawing operations.
    pub fn current_page(&self) -> usize {
        self.active + 1
    }

    /// All pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Section headings recorded with [`Canvas::mark_section`].
    pub fn sections(&self) -> &[SectionMark] {
        &self.sections
    }

    /// Tables drawn so far.
    pub fn tables(&self) -> &[TableRecord] {
        &self.tables
    }

    /// Appends a page and makes it the active one.
    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.active = self.pages.len() - 1;
        debug!("started page {}", self.current_page());
    }

    /// Re-activates the page with the given 1-based number.
    pub fn set_page(&mut self, page: usize) -> Result<(), ReportError> {
        if page == 0 || page > self.pages.len() {
            return Err(ReportError::PageOutOfRange {
                page,
                count: self.pages.len(),
            });
        }
        self.active = page - 1;
        Ok(())
    }

    /// Records a section heading on the active page.
    pub fn mark_section(&mut self, title: impl Into<String>) {
        let page = self.current_page();
        self.sections.push(SectionMark {
            title: title.into(),
            page,
        });
    }

    pub(crate) fn record_table(&mut self, record: TableRecord) {
        self.tables.push(record);
    }

    fn push(&mut self, op: DrawOp) {
        self.pages[self.active].ops.push(op);
    }

    /// Width of `text` in millimetres when set in `style`.
    pub fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        fonts::text_width(text, style)
    }

    /// Draws one line of text; `y` is the baseline and `x` the anchor for `alignment`.
    pub fn write_text(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        style: &TextStyle,
        alignment: Alignment,
    ) {
        let text = text.into();
        let left = match alignment {
            Alignment::Left => x,
            Alignment::Center => x - self.text_width(&text, style) / 2.0,
            Alignment::Right => x - self.text_width(&text, style),
        };
        self.push(DrawOp::Text(TextRun {
            text,
            x: left,
            y,
            style: *style,
        }));
    }

    /// Draws pre-wrapped lines starting at baseline `y` and returns the block height.
    pub fn write_lines(&mut self, lines: &[String], x: f32, y: f32, style: &TextStyle) -> f32 {
        let pitch = fonts::line_height(style);
        for (index, line) in lines.iter().enumerate() {
            self.write_text(line.as_str(), x, y + pitch * index as f32, style, Alignment::Left);
        }
        pitch * lines.len() as f32
    }

    /// Fills a rectangle whose top-left corner is at (`x`, `y`).
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.draw_rect(RectOp::new(x, y, width, height).with_fill(color));
    }

    /// Draws an arbitrary rectangle.
    pub fn draw_rect(&mut self, rect: RectOp) {
        self.push(DrawOp::Rect(rect));
    }

    /// Reflows `text` into lines no wider than `max_width` millimetres.
    ///
    /// Explicit newlines always start a new line, runs of whitespace collapse to
    /// a single space, and a word that does not fit on a line of its own is
    /// broken (at hyphenation points when a dictionary is installed, otherwise
    /// between characters).  An empty input yields a single empty line.
    pub fn measure_wrap(&self, text: &str, max_width: f32, style: &TextStyle) -> Vec<String> {
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();

            for word in paragraph.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_owned()
                } else {
                    format!("{current} {word}")
                };

                if self.text_width(&candidate, style) <= max_width {
                    current = candidate;
                    continue;
                }

                if !current.is_empty() {
                    lines.push(mem::take(&mut current));
                }

                if self.text_width(word, style) <= max_width {
                    current.push_str(word);
                } else {
                    let mut pieces = self.break_word(word, max_width, style);
                    current = pieces.pop().unwrap_or_default();
                    lines.extend(pieces);
                }
            }

            lines.push(current);
        }

        lines
    }

    fn break_word(&self, word: &str, max_width: f32, style: &TextStyle) -> Vec<String> {
        #[cfg(feature = "hyphenation")]
        if let Some(pieces) = self.hyphenate_word(word, max_width, style) {
            return pieces;
        }

        split_by_chars(word, max_width, style)
    }

    #[cfg(feature = "hyphenation")]
    fn hyphenate_word(&self, word: &str, max_width: f32, style: &TextStyle) -> Option<Vec<String>> {
        let hyphenator = self.hyphenator.as_ref()?;
        let breaks = hyphenator.hyphenate(word).breaks;
        if breaks.is_empty() {
            return None;
        }

        let mut pieces = Vec::new();
        let mut start = 0;
        loop {
            let rest = &word[start..];
            if fonts::text_width(rest, style) <= max_width {
                pieces.push(rest.to_owned());
                break;
            }

            let cut = breaks
                .iter()
                .copied()
                .filter(|&index| index > start)
                .take_while(|&index| {
                    fonts::text_width(&format!("{}-", &word[start..index]), style) <= max_width
                })
                .last();

            match cut {
                Some(index) => {
                    pieces.push(format!("{}-", &word[start..index]));
                    start = index;
                }
                None => {
                    pieces.extend(split_by_chars(rest, max_width, style));
                    break;
                }
            }
        }

        Some(pieces)
    }

    /// Renders the display list to PDF bytes without touching the file system.
    pub fn to_pdf_bytes(&self) -> Result<Vec<u8>, ReportError> {
        let bytes = render::render_pdf(self)?;

        #[cfg(feature = "bookmarks")]
        if self.bookmarks {
            return Ok(crate::bookmarks::apply_section_bookmarks(
                &bytes,
                &self.sections,
            )?);
        }

        Ok(bytes)
    }

    /// Renders the document and writes it to `path`.
    ///
    /// Consumes the canvas: a document is finalized exactly once, after every
    /// page has received its content and footer.
    pub fn finalize(self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let bytes = self.to_pdf_bytes()?;
        fs::write(path, &bytes)?;
        info!(
            "wrote {} ({} pages, {} bytes)",
            path.display(),
            self.pages.len(),
            bytes.len()
        );
        Ok(())
    }
}

/// Greedily splits a word between characters; every piece holds at least one character.
fn split_by_chars(word: &str, max_width: f32, style: &TextStyle) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();

    for ch in word.chars() {
        current.push(ch);
        if current.chars().count() > 1 && fonts::text_width(&current, style) > max_width {
            current.pop();
            pieces.push(mem::take(&mut current));
            current.push(ch);
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> TextStyle {
        TextStyle::new(10.0)
    }

    #[test]
    fn wrap_respects_width() {
        let canvas = Canvas::new("t", PaperSize::A4);
        let text = "Data breach checking requires an API key. Use https://haveibeenpwned.com to check manually.";
        let lines = canvas.measure_wrap(text, 60.0, &body());

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(canvas.text_width(line, &body()) <= 60.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_keeps_explicit_newlines_and_empty_input() {
        let canvas = Canvas::new("t", PaperSize::A4);
        assert_eq!(canvas.measure_wrap("", 50.0, &body()), vec![String::new()]);
        assert_eq!(
            canvas.measure_wrap("first\nsecond", 180.0, &body()),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn wrap_breaks_overlong_words() {
        let canvas = Canvas::new("t", PaperSize::A4);
        let url = "https://www.google.com/search?q=site:twitter.com+OR+site:facebook.com+%22Ada+Lovelace%22";
        let lines = canvas.measure_wrap(url, 30.0, &body());

        assert!(lines.len() > 2);
        assert_eq!(lines.concat(), url);
        for line in &lines {
            assert!(canvas.text_width(line, &body()) <= 30.0);
        }
    }

    #[test]
    fn wrap_is_deterministic() {
        let canvas = Canvas::new("t", PaperSize::A4);
        let text = "johndoe, john.doe, john_doe, john-doe, jdoe, johnd, doejohn, doe.john";
        assert_eq!(
            canvas.measure_wrap(text, 40.0, &body()),
            canvas.measure_wrap(text, 40.0, &body())
        );
    }

    #[test]
    fn centered_text_is_anchored_on_its_midpoint() {
        let mut canvas = Canvas::new("t", PaperSize::A4);
        let style = TextStyle::new(24.0).bold();
        canvas.write_text("Digital Footprint Report", 105.0, 20.0, &style, Alignment::Center);

        let run = canvas.pages()[0].texts().next().expect("text run");
        let width = canvas.text_width(&run.text, &style);
        assert!((run.x + width / 2.0 - 105.0).abs() < 1e-3);
        assert_eq!(run.y, 20.0);
    }

    #[test]
    fn pages_are_selectable() {
        let mut canvas = Canvas::new("t", PaperSize::A4);
        canvas.new_page();
        canvas.new_page();
        assert_eq!(canvas.page_count(), 3);
        assert_eq!(canvas.current_page(), 3);

        canvas.set_page(1).expect("page 1 exists");
        canvas.write_text("first", 14.0, 30.0, &body(), Alignment::Left);
        assert_eq!(canvas.pages()[0].texts().count(), 1);
        assert_eq!(canvas.pages()[2].texts().count(), 0);

        assert!(matches!(
            canvas.set_page(4),
            Err(ReportError::PageOutOfRange { page: 4, count: 3 })
        ));
        assert!(canvas.set_page(0).is_err());
    }

    #[test]
    fn write_lines_reports_block_height() {
        let mut canvas = Canvas::new("t", PaperSize::A4);
        let lines = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        let height = canvas.write_lines(&lines, 14.0, 100.0, &body());

        assert!((height - 3.0 * fonts::line_height(&body())).abs() < 1e-4);
        let ys: Vec<f32> = canvas.pages()[0].texts().map(|run| run.y).collect();
        assert_eq!(ys.len(), 3);
        assert!(ys[0] < ys[1] && ys[1] < ys[2]);
    }
}
