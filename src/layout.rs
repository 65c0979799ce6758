//! Vertical layout cursor and the page-break policy.

use log::debug;

use crate::canvas::Canvas;

/// Baseline of the first block on a page started by the cursor.
pub const TOP_MARGIN: f32 = 20.0;

/// A block starting below this y would not leave room for its content.
pub const BREAK_THRESHOLD: f32 = 240.0;

/// Tracks the y position of the next block on the active page.
///
/// The cursor never inspects what was drawn; it only moves when told to and
/// starts a new page when [`LayoutCursor::reserve`] finds the remaining space
/// insufficient.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutCursor {
    y: f32,
    top_margin: f32,
    threshold: f32,
    breaks: usize,
}

impl LayoutCursor {
    /// Creates a cursor positioned at `start_y` with the default margins.
    pub fn new(start_y: f32) -> Self {
        Self {
            y: start_y,
            top_margin: TOP_MARGIN,
            threshold: BREAK_THRESHOLD,
            breaks: 0,
        }
    }

    /// Current y position.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Page breaks this cursor has triggered.
    pub fn page_breaks(&self) -> usize {
        self.breaks
    }

    /// Moves down by `dy` and returns the new position.
    pub fn advance(&mut self, dy: f32) -> f32 {
        self.y += dy;
        self.y
    }

    /// Jumps to an absolute position, e.g. below a table that may have spanned pages.
    pub fn move_to(&mut self, y: f32) -> f32 {
        self.y = y;
        self.y
    }

    /// Ensures a block of `block_height` can start at the current position.
    ///
    /// When `y + block_height` exceeds the break threshold a new page is started
    /// and the cursor resets to the top margin.  Returns the y the block should
    /// start at.
    pub fn reserve(&mut self, canvas: &mut Canvas, block_height: f32) -> f32 {
        if self.y + block_height > self.threshold {
            debug!(
                "page break before block of {:.1}mm at y={:.1} (page {})",
                block_height,
                self.y,
                canvas.current_page()
            );
            canvas.new_page();
            self.y = self.top_margin;
            self.breaks += 1;
        }
        self.y
    }
}
