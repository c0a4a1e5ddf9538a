//! Colour names accepted for `plot_color`.
//!
//! Supports single-letter shorthands (`r`, `b`), the `tab:` palette names,
//! common CSS names, and `#rgb` / `#rrggbb` hex strings.

use plotters::style::RGBColor;

const NAMED: [(&str, (u8, u8, u8)); 38] = [
    // single-letter shorthands
    ("b", (0, 0, 255)),
    ("g", (0, 128, 0)),
    ("r", (255, 0, 0)),
    ("c", (0, 191, 191)),
    ("m", (191, 0, 191)),
    ("y", (191, 191, 0)),
    ("k", (0, 0, 0)),
    ("w", (255, 255, 255)),
    // tableau palette
    ("tab:blue", (0x1f, 0x77, 0xb4)),
    ("tab:orange", (0xff, 0x7f, 0x0e)),
    ("tab:green", (0x2c, 0xa0, 0x2c)),
    ("tab:red", (0xd6, 0x27, 0x28)),
    ("tab:purple", (0x94, 0x67, 0xbd)),
    ("tab:brown", (0x8c, 0x56, 0x4b)),
    ("tab:pink", (0xe3, 0x77, 0xc2)),
    ("tab:gray", (0x7f, 0x7f, 0x7f)),
    ("tab:olive", (0xbc, 0xbd, 0x22)),
    ("tab:cyan", (0x17, 0xbe, 0xcf)),
    // css
    ("blue", (0, 0, 255)),
    ("green", (0, 128, 0)),
    ("red", (255, 0, 0)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("brown", (165, 42, 42)),
    ("pink", (255, 192, 203)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("olive", (128, 128, 0)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
    ("darkred", (139, 0, 0)),
    ("skyblue", (135, 206, 235)),
    ("steelblue", (70, 130, 180)),
];

/// Parse a colour name or hex string. Names are case-insensitive.
pub fn parse_color(s: &str) -> Option<RGBColor> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|&(_, (r, g, b))| RGBColor(r, g, b))
}

fn parse_hex(hex: &str) -> Option<RGBColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(RGBColor(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        // #abc -> #aabbcc
        3 => {
            let expand = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Some(RGBColor(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(c: RGBColor) -> (u8, u8, u8) {
        (c.0, c.1, c.2)
    }

    #[test]
    fn names_and_shorthands() {
        assert_eq!(parse_color("blue").map(rgb), Some((0, 0, 255)));
        assert_eq!(parse_color(" Tab:Orange ").map(rgb), Some((255, 127, 14)));
        assert_eq!(parse_color("k").map(rgb), Some((0, 0, 0)));
    }

    #[test]
    fn hex_forms() {
        assert_eq!(parse_color("#1f77b4").map(rgb), Some((31, 119, 180)));
        assert_eq!(parse_color("#F0a").map(rgb), Some((255, 0, 170)));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(parse_color("chartreuse-ish"), None);
    }
}
