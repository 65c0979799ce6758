//! Text and colour styling primitives used by the canvas.
//!
//! A [`TextStyle`] carries the three attributes the reports vary: font size,
//! font face (one of the four built-in Helvetica faces) and fill colour.  Like
//! the rest of the crate it is a plain value built with chaining methods, so a
//! section renderer can derive a heading style from a body style without
//! touching any shared drawing state.

/// An RGB colour with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Banner and primary table header colour.
    pub const INDIGO: Rgb = Rgb(99, 102, 241);
    /// Header colour of "not found" tables.
    pub const RED: Rgb = Rgb(239, 68, 68);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// Footer and note text.
    pub const GREY: Rgb = Rgb(128, 128, 128);
    /// Table body text.
    pub const TABLE_TEXT: Rgb = Rgb(80, 80, 80);
    /// Table grid lines.
    pub const GRID_LINE: Rgb = Rgb(200, 200, 200);

    /// Returns the channels scaled to `0.0..=1.0`, as PDF colour operators expect.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

/// The four faces of the built-in Helvetica family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFace {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontFace {
    /// Whether the face uses the bold glyph widths.
    pub fn is_bold(self) -> bool {
        matches!(self, FontFace::Bold | FontFace::BoldItalic)
    }

    /// Whether the face is slanted.
    pub fn is_italic(self) -> bool {
        matches!(self, FontFace::Italic | FontFace::BoldItalic)
    }

    fn with_bold(self, bold: bool) -> Self {
        match (bold, self.is_italic()) {
            (true, true) => FontFace::BoldItalic,
            (true, false) => FontFace::Bold,
            (false, true) => FontFace::Italic,
            (false, false) => FontFace::Regular,
        }
    }

    fn with_italic(self, italic: bool) -> Self {
        match (self.is_bold(), italic) {
            (true, true) => FontFace::BoldItalic,
            (true, false) => FontFace::Bold,
            (false, true) => FontFace::Italic,
            (false, false) => FontFace::Regular,
        }
    }
}

/// Alignment of a text run relative to its anchor x coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// The anchor is the left edge of the run.
    #[default]
    Left,
    /// The anchor is the horizontal centre of the run.
    Center,
    /// The anchor is the right edge of the run.
    Right,
}

/// Font size, face and colour of a text run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    size: f32,
    face: FontFace,
    color: Rgb,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(11.0)
    }
}

impl TextStyle {
    /// Creates a regular black style of the given point size.
    pub fn new(size: f32) -> Self {
        Self {
            size,
            face: FontFace::Regular,
            color: Rgb::BLACK,
        }
    }

    /// Font size in points.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Font face.
    pub fn face(&self) -> FontFace {
        self.face
    }

    /// Fill colour.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Sets the bold flag and returns the updated style.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.face = self.face.with_bold(bold);
        self
    }

    /// Sets the italic flag and returns the updated style.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.face = self.face.with_italic(italic);
        self
    }

    /// Sets the colour and returns the updated style.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Shorthand for `with_bold(true)`.
    pub fn bold(self) -> Self {
        self.with_bold(true)
    }

    /// Shorthand for `with_italic(true)`.
    pub fn italic(self) -> Self {
        self.with_italic(true)
    }

    /// Shorthand for `with_color`.
    pub fn colored(self, color: Rgb) -> Self {
        self.with_color(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_flags_compose() {
        let style = TextStyle::new(10.0).bold().italic().colored(Rgb::GREY);
        assert_eq!(style.face(), FontFace::BoldItalic);
        assert_eq!(style.color(), Rgb::GREY);
        assert_eq!(style.size(), 10.0);

        let upright = style.with_italic(false);
        assert_eq!(upright.face(), FontFace::Bold);
    }

    #[test]
    fn unit_channels() {
        let (r, g, b) = Rgb::WHITE.to_unit();
        assert_eq!((r, g, b), (1.0, 1.0, 1.0));
        let (r, _, _) = Rgb::BLACK.to_unit();
        assert_eq!(r, 0.0);
    }
}
