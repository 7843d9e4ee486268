//! 5x7 bitmap font
//!
//! Each glyph is five column bytes, left to right. Bit `r` of a column byte
//! lights the pixel in row `r` (row 0 at the top), so only the low seven bits
//! are meaningful. Lowercase letters share the uppercase glyphs.

/// Glyph width in source pixels.
pub const GLYPH_COLUMNS: usize = 5;
/// Glyph height in source pixels.
pub const GLYPH_ROWS: usize = 7;
/// Horizontal advance in source pixels: five glyph columns plus one gap.
pub const GLYPH_ADVANCE: i32 = 6;

pub type Glyph = [u8; GLYPH_COLUMNS];

/// Look up the glyph for `ch`, folding lowercase to uppercase.
///
/// Returns `None` for characters outside the table; callers advance the
/// cursor without drawing.
pub fn glyph(ch: char) -> Option<&'static Glyph> {
    let glyph: &'static Glyph = match ch.to_ascii_uppercase() {
        ' ' => &[0x00, 0x00, 0x00, 0x00, 0x00],
        '-' => &[0x00, 0x08, 0x08, 0x08, 0x00],
        ':' => &[0x00, 0x14, 0x00, 0x14, 0x00],
        '0' => &[0x1E, 0x11, 0x13, 0x15, 0x1E],
        '1' => &[0x00, 0x12, 0x1F, 0x10, 0x00],
        '2' => &[0x12, 0x19, 0x15, 0x13, 0x00],
        '3' => &[0x11, 0x15, 0x15, 0x0A, 0x00],
        '4' => &[0x07, 0x04, 0x04, 0x1F, 0x00],
        '5' => &[0x17, 0x15, 0x15, 0x09, 0x00],
        '6' => &[0x0E, 0x15, 0x15, 0x08, 0x00],
        '7' => &[0x01, 0x01, 0x1D, 0x03, 0x00],
        '8' => &[0x0A, 0x15, 0x15, 0x0A, 0x00],
        '9' => &[0x02, 0x15, 0x15, 0x0E, 0x00],
        'A' => &[0x1E, 0x05, 0x05, 0x1E, 0x00],
        'B' => &[0x1F, 0x15, 0x15, 0x0A, 0x00],
        'C' => &[0x0E, 0x11, 0x11, 0x11, 0x00],
        'D' => &[0x1F, 0x11, 0x11, 0x0E, 0x00],
        'E' => &[0x1F, 0x15, 0x15, 0x11, 0x00],
        'F' => &[0x1F, 0x05, 0x05, 0x01, 0x00],
        'G' => &[0x0E, 0x11, 0x15, 0x1D, 0x00],
        'H' => &[0x1F, 0x04, 0x04, 0x1F, 0x00],
        'I' => &[0x11, 0x1F, 0x11, 0x00, 0x00],
        'J' => &[0x08, 0x10, 0x10, 0x0F, 0x00],
        'K' => &[0x1F, 0x04, 0x0A, 0x11, 0x00],
        'L' => &[0x1F, 0x10, 0x10, 0x10, 0x00],
        'M' => &[0x1F, 0x02, 0x04, 0x02, 0x1F],
        'N' => &[0x1F, 0x02, 0x04, 0x1F, 0x00],
        'O' => &[0x0E, 0x11, 0x11, 0x0E, 0x00],
        'P' => &[0x1F, 0x05, 0x05, 0x02, 0x00],
        'Q' => &[0x0E, 0x11, 0x19, 0x1E, 0x00],
        'R' => &[0x1F, 0x05, 0x0D, 0x12, 0x00],
        'S' => &[0x12, 0x15, 0x15, 0x09, 0x00],
        'T' => &[0x01, 0x1F, 0x01, 0x01, 0x00],
        'U' => &[0x0F, 0x10, 0x10, 0x0F, 0x00],
        'V' => &[0x07, 0x08, 0x10, 0x08, 0x07],
        'W' => &[0x1F, 0x08, 0x04, 0x08, 0x1F],
        'X' => &[0x1B, 0x04, 0x04, 0x1B, 0x00],
        'Y' => &[0x03, 0x04, 0x18, 0x04, 0x03],
        'Z' => &[0x19, 0x15, 0x13, 0x11, 0x00],
        _ => return None,
    };
    Some(glyph)
}

/// Whether the glyph lights source pixel (`col`, `row`).
pub fn is_lit(glyph: &Glyph, col: usize, row: usize) -> bool {
    col < GLYPH_COLUMNS && row < GLYPH_ROWS && glyph[col] & (1 << row) != 0
}
