use crate::backend::FontWeight;

/// Helvetica advance widths for ASCII 32..=126, 1/1000 em (Adobe AFM).
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 32..=126, 1/1000 em (Adobe AFM).
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for WinAnsi characters above ASCII.
const HIGH_CHAR_WIDTH: u16 = 556;

/// Resource names of the two standard fonts on every page.
pub const REGULAR_RESOURCE: &str = "F1";
pub const BOLD_RESOURCE: &str = "F2";

pub fn resource_name(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => REGULAR_RESOURCE,
        FontWeight::Bold => BOLD_RESOURCE,
    }
}

pub fn base_font_name(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "Helvetica",
        FontWeight::Bold => "Helvetica-Bold",
    }
}

/// Map a character to its WinAnsiEncoding byte. Characters the encoding
/// cannot represent become `?`.
pub fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        '\u{a0}'..='\u{ff}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => b'?',
    }
}

pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

/// Advance width of an encoded byte in 1/1000 em.
fn byte_width(byte: u8, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Normal => &HELVETICA_WIDTHS,
        FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match byte {
        32..=126 => table[(byte - 32) as usize],
        0x95 => 350,
        _ => HIGH_CHAR_WIDTH,
    }
}

/// Width of `text` in points when set in Helvetica at `size`.
pub fn measure_builtin(text: &str, weight: FontWeight, size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|ch| byte_width(win_ansi_byte(ch), weight) as u32)
        .sum();
    units as f64 * size / 1000.0
}
