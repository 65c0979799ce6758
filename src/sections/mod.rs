//! Section renderers, one per search kind.
//!
//! Each renderer receives the canvas, the layout cursor positioned below the
//! common metadata block, and its typed payload.  It emits its sections in a
//! fixed order, leaves the cursor below the last thing it drew, and skips any
//! section whose data is empty.

pub mod email;
pub mod name;
pub mod username;

use crate::canvas::Canvas;
use crate::layout::LayoutCursor;
use crate::style::{Alignment, TextStyle};
use crate::table;

/// Left edge of all free-flowing text.
pub(crate) const MARGIN_X: f32 = 14.0;

/// Width paragraphs are reflowed to.
pub(crate) const WRAP_WIDTH: f32 = 180.0;

/// Space left below a table before the next block.
pub(crate) const TABLE_GAP: f32 = 15.0;

pub(crate) const SECTION_TITLE_SIZE: f32 = 14.0;
pub(crate) const BODY_SIZE: f32 = 11.0;

/// Draws a bold heading at the cursor and records it for the outline.
pub(crate) fn heading(canvas: &mut Canvas, cursor: &LayoutCursor, title: &str, size: f32) {
    canvas.mark_section(title);
    canvas.write_text(
        title,
        MARGIN_X,
        cursor.y(),
        &TextStyle::new(size).bold(),
        Alignment::Left,
    );
}

/// Draws a heading followed by `gap` millimetres of space before a table.
///
/// The heading starts a new page when the block down to the table's first
/// body row would cross the break threshold.
pub(crate) fn table_heading(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    title: &str,
    size: f32,
    gap: f32,
) {
    cursor.reserve(canvas, gap + 2.0 * table::single_line_row_height());
    heading(canvas, cursor, title, size);
    cursor.advance(gap);
}

/// Draws one regular body line at the cursor.
pub(crate) fn body_line(canvas: &mut Canvas, cursor: &LayoutCursor, text: impl Into<String>) {
    canvas.write_text(
        text,
        MARGIN_X,
        cursor.y(),
        &TextStyle::new(BODY_SIZE),
        Alignment::Left,
    );
}

/// Upper-cases the first character for display, leaving the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn capitalizes_first_character_only() {
        assert_eq!(capitalize("github"), "Github");
        assert_eq!(capitalize("dev.to"), "Dev.to");
        assert_eq!(capitalize("stackOverflow"), "StackOverflow");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }
}
