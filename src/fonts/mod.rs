//! Built-in font selection and glyph metrics.
//!
//! Reports are set in the standard Helvetica family that every PDF viewer
//! ships, so no font files have to be bundled or located at runtime.  Layout
//! still needs to know how wide a string is before it is drawn (centring,
//! column sizing, reflow), which is what the width tables below provide: the
//! Adobe core-font advance widths for printable ASCII in 1/1000 em.
//!
//! The standard fonts are written with WinAnsiEncoding, so only characters of
//! that code page can appear on the page.  Anything else (CJK, emoji, most
//! symbols) is dropped by the writer; [`char_width`] gives such characters no
//! width so measured text matches what is drawn.

use printpdf::BuiltinFont;

use crate::style::{FontFace, TextStyle};

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Default line pitch as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Name of the font family used for every face.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Helvetica";

const FIRST_MAPPED: u32 = 32;

// Width of `n`, used for anything outside printable ASCII.
const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

// Code points of the 0x80..0x9F block of Windows-1252.
const CP1252_EXTRAS: [char; 27] = [
    '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}',
    '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}',
    '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{017E}', '\u{0178}',
];

/// Whether `ch` has a code in WinAnsiEncoding and can be set in a standard font.
pub fn is_win_ansi(ch: char) -> bool {
    matches!(ch as u32, 0..=0x7F | 0xA0..=0xFF) || CP1252_EXTRAS.contains(&ch)
}

/// Number of characters in `text` the standard fonts cannot draw.
pub fn unencodable_count(text: &str) -> usize {
    text.chars().filter(|&ch| !is_win_ansi(ch)).count()
}

/// Maps a face onto the PDF standard font that renders it.
pub fn builtin_font(face: FontFace) -> BuiltinFont {
    match face {
        FontFace::Regular => BuiltinFont::Helvetica,
        FontFace::Bold => BuiltinFont::HelveticaBold,
        FontFace::Italic => BuiltinFont::HelveticaOblique,
        FontFace::BoldItalic => BuiltinFont::HelveticaBoldOblique,
    }
}

/// Advance width of `ch` in 1/1000 em. Oblique faces share the upright widths.
///
/// Characters outside WinAnsiEncoding are not drawn and measure zero.
pub fn char_width(ch: char, face: FontFace) -> u16 {
    if !is_win_ansi(ch) {
        return 0;
    }
    let table = if face.is_bold() {
        &HELVETICA_BOLD_WIDTHS
    } else {
        &HELVETICA_WIDTHS
    };

    (ch as u32)
        .checked_sub(FIRST_MAPPED)
        .and_then(|index| table.get(index as usize))
        .copied()
        .unwrap_or(FALLBACK_WIDTH)
}

/// Width of `text` in millimetres when set in `style`.
pub fn text_width(text: &str, style: &TextStyle) -> f32 {
    let units: u32 = text
        .chars()
        .map(|ch| u32::from(char_width(ch, style.face())))
        .sum();
    units as f32 / 1000.0 * style.size() / PT_PER_MM
}

/// Converts a size in points to millimetres.
pub fn pt_to_mm(points: f32) -> f32 {
    points / PT_PER_MM
}

/// Distance between consecutive baselines for `style`, in millimetres.
pub fn line_height(style: &TextStyle) -> f32 {
    pt_to_mm(style.size() * LINE_HEIGHT_FACTOR)
}
