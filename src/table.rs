//! Grid tables with a coloured header band.
//!
//! Tables follow the look of the classic "grid" theme: a filled header row
//! with bold white labels, white body cells with grey text, and thin grey rules
//! around every cell.  Cell text is reflowed to its column, rows keep their
//! input order, and a row that would cross the bottom margin moves to a new
//! page where the header band is repeated.

use log::debug;

use crate::canvas::{Canvas, RectOp, TableRecord};
use crate::error::ReportError;
use crate::fonts::{self, PT_PER_MM};
use crate::style::{Alignment, Rgb, TextStyle};

/// Left and right margin of every table.
pub const TABLE_MARGIN_X: f32 = 14.0;

/// Top and bottom page margin used when a table runs onto a new page.
pub const TABLE_PAGE_MARGIN: f32 = 40.0 / PT_PER_MM;

/// Padding on every side of a cell (5pt).
pub const CELL_PADDING: f32 = 5.0 / PT_PER_MM;

/// Width of the grid rules.
pub const GRID_LINE_WIDTH: f32 = 0.1;

/// Font size of table text.
pub const DEFAULT_FONT_SIZE: f32 = 9.0;

// Baseline of the first line, as a fraction of the line pitch below the top padding.
const BASELINE_RATIO: f32 = 0.8;

/// Headers, rows and presentation hints for one table.
///
/// Cells are pre-formatted strings.  Every row must have as many cells as
/// there are headers; [`render_table`] rejects ragged input before drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSpec {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<Option<f32>>,
    header_fill: Rgb,
}

impl TableSpec {
    /// Creates a table with the given column headers and no rows.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let column_widths = vec![None; headers.len()];
        Self {
            headers,
            rows: Vec::new(),
            column_widths,
            header_fill: Rgb::INDIGO,
        }
    }

    /// Appends a body row and returns the updated table.
    pub fn push_row(mut self, row: Vec<String>) -> Self {
        self.rows.push(row);
        self
    }

    /// Appends several body rows and returns the updated table.
    pub fn with_rows<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        self.rows.extend(rows);
        self
    }

    /// Fixes the width (mm) of a column; other columns share the remaining width.
    ///
    /// Indices outside the header are ignored.
    pub fn with_column_width(mut self, column: usize, width: f32) -> Self {
        if let Some(slot) = self.column_widths.get_mut(column) {
            *slot = Some(width);
        }
        self
    }

    /// Sets the header band colour and returns the updated table.
    pub fn with_header_fill(mut self, color: Rgb) -> Self {
        self.header_fill = color;
        self
    }

    fn validate(&self) -> Result<(), ReportError> {
        let expected = self.headers.len();
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            Some((row, cells)) => Err(ReportError::RaggedRow {
                row,
                expected,
                found: cells.len(),
            }),
            None => Ok(()),
        }
    }
}

/// Height of a header or body row whose cells all fit on one line.
pub fn single_line_row_height() -> f32 {
    fonts::line_height(&TextStyle::new(DEFAULT_FONT_SIZE)) + 2.0 * CELL_PADDING
}

struct LaidOutRow {
    cells: Vec<Vec<String>>,
    height: f32,
}

/// Draws `spec` starting at `start_y` and returns the y just below the last row.
///
/// The caller decides whether a table is worth drawing at all; an empty body
/// still produces a header band.
pub fn render_table(
    canvas: &mut Canvas,
    start_y: f32,
    spec: &TableSpec,
) -> Result<f32, ReportError> {
    spec.validate()?;

    let head_style = TextStyle::new(DEFAULT_FONT_SIZE).bold().colored(Rgb::WHITE);
    let body_style = TextStyle::new(DEFAULT_FONT_SIZE).colored(Rgb::TABLE_TEXT);
    let available = canvas.page_width() - 2.0 * TABLE_MARGIN_X;
    let widths = column_widths(spec, available, &head_style, &body_style);
    let bottom = canvas.page_height() - TABLE_PAGE_MARGIN;

    let header = lay_out_row(canvas, &spec.headers, &widths, &head_style);
    let body: Vec<LaidOutRow> = spec
        .rows
        .iter()
        .map(|row| lay_out_row(canvas, row, &widths, &body_style))
        .collect();

    let mut y = start_y;
    let first_row_height = body.first().map_or(0.0, |row| row.height);
    if y + header.height + first_row_height > bottom {
        canvas.new_page();
        y = TABLE_PAGE_MARGIN;
    }
    let first_page = canvas.current_page();

    draw_row(canvas, y, &header, &widths, Some(spec.header_fill), &head_style);
    y += header.height;

    for row in &body {
        if y + row.height > bottom {
            canvas.new_page();
            y = TABLE_PAGE_MARGIN;
            draw_row(canvas, y, &header, &widths, Some(spec.header_fill), &head_style);
            y += header.height;
        }
        draw_row(canvas, y, row, &widths, None, &body_style);
        y += row.height;
    }

    debug!(
        "table [{}] with {} rows on pages {}..={}, ends at y={:.1}",
        spec.headers.join(", "),
        spec.rows.len(),
        first_page,
        canvas.current_page(),
        y
    );

    let last_page = canvas.current_page();
    canvas.record_table(TableRecord {
        headers: spec.headers.clone(),
        rows: spec.rows.clone(),
        header_fill: spec.header_fill,
        first_page,
        last_page,
        end_y: y,
    });

    Ok(y)
}

/// Resolves every column width: fixed columns keep their width, the others
/// share what is left in proportion to their natural content width.
fn column_widths(
    spec: &TableSpec,
    available: f32,
    head_style: &TextStyle,
    body_style: &TextStyle,
) -> Vec<f32> {
    let fixed: f32 = spec.column_widths.iter().flatten().sum();
    let remaining = (available - fixed).max(0.0);

    let natural: Vec<f32> = (0..spec.headers.len())
        .map(|column| {
            let header = fonts::text_width(&spec.headers[column], head_style);
            let widest_cell = spec
                .rows
                .iter()
                .map(|row| fonts::text_width(&row[column], body_style))
                .fold(0.0, f32::max);
            header.max(widest_cell) + 2.0 * CELL_PADDING
        })
        .collect();

    let auto_columns = spec.column_widths.iter().filter(|w| w.is_none()).count();
    let auto_natural: f32 = spec
        .column_widths
        .iter()
        .zip(&natural)
        .filter(|(fixed, _)| fixed.is_none())
        .map(|(_, natural)| natural)
        .sum();

    spec.column_widths
        .iter()
        .zip(&natural)
        .map(|(fixed, natural)| match fixed {
            Some(width) => *width,
            None if auto_natural > 0.0 => remaining * natural / auto_natural,
            None => remaining / auto_columns as f32,
        })
        .collect()
}

fn lay_out_row(
    canvas: &Canvas,
    cells: &[String],
    widths: &[f32],
    style: &TextStyle,
) -> LaidOutRow {
    let cells: Vec<Vec<String>> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let wrap_width = (width - 2.0 * CELL_PADDING).max(1.0);
            canvas.measure_wrap(cell, wrap_width, style)
        })
        .collect();

    let max_lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    let height = max_lines as f32 * fonts::line_height(style) + 2.0 * CELL_PADDING;
    LaidOutRow { cells, height }
}

fn draw_row(
    canvas: &mut Canvas,
    top: f32,
    row: &LaidOutRow,
    widths: &[f32],
    fill: Option<Rgb>,
    style: &TextStyle,
) {
    let pitch = fonts::line_height(style);
    let mut x = TABLE_MARGIN_X;

    for (lines, width) in row.cells.iter().zip(widths) {
        let mut cell = RectOp::new(x, top, *width, row.height)
            .with_stroke(Rgb::GRID_LINE, GRID_LINE_WIDTH);
        if let Some(color) = fill {
            cell = cell.with_fill(color);
        }
        canvas.draw_rect(cell);

        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = top + CELL_PADDING + pitch * (index as f32 + BASELINE_RATIO);
            canvas.write_text(line.as_str(), x + CELL_PADDING, baseline, style, Alignment::Left);
        }

        x += width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PaperSize;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let mut canvas = Canvas::new("t", PaperSize::A4);
        let spec = TableSpec::new(["Platform", "Status"])
            .push_row(cells(&["Github", "Found"]))
            .push_row(cells(&["Reddit"]));

        let err = render_table(&mut canvas, 50.0, &spec).unwrap_err();
        assert!(matches!(
            err,
            ReportError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
        assert!(canvas.pages()[0].ops().is_empty());
    }

    #[test]
    fn rows_keep_input_order_and_end_below_last_row() {
        let mut canvas = Canvas::new("t", PaperSize::A4);
        let spec = TableSpec::new(["Platform", "Status"])
            .push_row(cells(&["Zeta", "Not Found"]))
            .push_row(cells(&["Alpha", "Not Found"]))
            .with_header_fill(Rgb::RED);

        let end = render_table(&mut canvas, 60.0, &spec).expect("render table");

        let texts: Vec<&str> = canvas.pages()[0]
            .texts()
            .map(|run| run.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec!["Platform", "Status", "Zeta", "Not Found", "Alpha", "Not Found"]
        );

        let row_height = single_line_row_height();
        assert!((end - (60.0 + 3.0 * row_height)).abs() < 1e-3);

        let header_fills: Vec<Rgb> = canvas.pages()[0]
            .rects()
            .filter_map(|rect| rect.fill)
            .collect();
        assert_eq!(header_fills, vec![Rgb::RED, Rgb::RED]);

        let record = &canvas.tables()[0];
        assert_eq!(record.rows.len(), 2);
        assert_eq!(record.end_y, end);
    }

    #[test]
    fn fixed_column_widths_are_honoured() {
        let mut canvas = Canvas::new("t", PaperSize::A4);
        let spec = TableSpec::new(["Platform", "Status", "URL"])
            .push_row(cells(&["Github", "Found", "https://github.com/octocat"]))
            .with_column_width(2, 80.0);

        render_table(&mut canvas, 60.0, &spec).expect("render table");

        let header_cells: Vec<&RectOp> = canvas.pages()[0].rects().take(3).collect();
        assert!((header_cells[2].width - 80.0).abs() < 1e-4);
        let total: f32 = header_cells.iter().map(|rect| rect.width).sum();
        assert!((total - (210.0 - 2.0 * TABLE_MARGIN_X)).abs() < 1e-3);
        assert!((header_cells[2].x + 80.0 - (210.0 - TABLE_MARGIN_X)).abs() < 1e-3);
    }

    #[test]
    fn long_tables_continue_on_new_pages_with_repeated_header() {
        let mut canvas = Canvas::new("t", PaperSize::A4);
        let spec = TableSpec::new(["Type", "Description"]).with_rows(
            (0..60).map(|index| vec![format!("Query {index}"), "Search for mentions".to_string()]),
        );

        let end = render_table(&mut canvas, 200.0, &spec).expect("render table");

        assert!(canvas.page_count() >= 2);
        let record = &canvas.tables()[0];
        assert_eq!(record.first_page, 1);
        assert_eq!(record.last_page, canvas.page_count());
        assert!(end <= canvas.page_height() - TABLE_PAGE_MARGIN + 1e-3);

        let second_page_first = canvas.pages()[1].texts().next().expect("continued header");
        assert_eq!(second_page_first.text, "Type");
    }

    #[test]
    fn table_that_cannot_start_moves_to_next_page() {
        let mut canvas = Canvas::new("t", PaperSize::A4);
        let spec = TableSpec::new(["Type", "Description"])
            .push_row(cells(&["General Search", "General web search for the name"]));

        let end = render_table(&mut canvas, 280.0, &spec).expect("render table");

        assert_eq!(canvas.page_count(), 2);
        assert!(canvas.pages()[0].ops().is_empty());
        assert!(end < 40.0);
        assert_eq!(canvas.tables()[0].first_page, 2);
    }

    #[test]
    fn long_cells_wrap_and_grow_the_row() {
        let mut canvas = Canvas::new("t", PaperSize::A4);
        let long = "https://www.google.com/search?q=site:twitter.com+OR+site:facebook.com+%22Ada+Lovelace%22";
        let spec = TableSpec::new(["Platform", "URL"])
            .push_row(cells(&["Twitter", long]))
            .with_column_width(1, 40.0);

        let end = render_table(&mut canvas, 50.0, &spec).expect("render table");

        let single_row = single_line_row_height();
        assert!(end - 50.0 > 2.0 * single_row);
    }
}
