use crate::foundation::core::Rgb8;

/// Recognized background color names. Lookup is case-insensitive; `-` and spaces read as `_`.
const NAMED_COLORS: &[(&str, Rgb8)] = &[
    ("black", Rgb8::new(0, 0, 0)),
    ("blue", Rgb8::new(0, 0, 255)),
    ("cyan", Rgb8::new(0, 255, 255)),
    ("dark_gray", Rgb8::new(64, 64, 64)),
    ("dark_grey", Rgb8::new(64, 64, 64)),
    ("darkgray", Rgb8::new(64, 64, 64)),
    ("gray", Rgb8::new(128, 128, 128)),
    ("grey", Rgb8::new(128, 128, 128)),
    ("green", Rgb8::new(0, 255, 0)),
    ("light_gray", Rgb8::new(192, 192, 192)),
    ("light_grey", Rgb8::new(192, 192, 192)),
    ("lightgray", Rgb8::new(192, 192, 192)),
    ("magenta", Rgb8::new(255, 0, 255)),
    ("orange", Rgb8::new(255, 200, 0)),
    ("pink", Rgb8::new(255, 175, 175)),
    ("red", Rgb8::new(255, 0, 0)),
    ("white", Rgb8::new(255, 255, 255)),
    ("yellow", Rgb8::new(255, 255, 0)),
];

/// Look up a color by name.
pub fn named_color(name: &str) -> Option<Rgb8> {
    let key = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, c)| *c)
}

/// Parse a color name or a `#RRGGBB` hex literal.
pub fn parse_color(s: &str) -> Option<Rgb8> {
    let s = s.trim();
    match s.strip_prefix('#') {
        Some(hex) => parse_hex(hex),
        None => named_color(s),
    }
}

/// Resolve a background color, falling back to black for anything unrecognized.
pub fn background_color(s: &str) -> Rgb8 {
    parse_color(s).unwrap_or_else(|| {
        tracing::warn!(color = s, "color not found, falling back to black");
        Rgb8::BLACK
    })
}

fn parse_hex(s: &str) -> Option<Rgb8> {
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
    Some(Rgb8::new(byte(0)?, byte(2)?, byte(4)?))
}
