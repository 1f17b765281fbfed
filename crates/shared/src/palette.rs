//! Named theme colors and the lenient parsing used for custom RGB input.

/// RGB triple. Components are nominally 0-255 but never clamped.
pub type Rgb = [i32; 3];

/// Theme color of a page that has not picked one yet.
pub const UNSET: Rgb = [255, 255, 255];

pub const DEFAULT_COLOR_NAME: &str = "Sky Blue";

pub const PALETTE: &[(&str, Rgb)] = &[
    ("Sky Blue", [135, 206, 235]),
    ("Crimson", [220, 20, 60]),
    ("Forest Green", [34, 139, 34]),
    ("Goldenrod", [218, 165, 32]),
    ("Orchid", [218, 112, 214]),
    ("Slate Gray", [112, 128, 144]),
    ("Tomato", [255, 99, 71]),
    ("Teal", [0, 128, 128]),
    ("Indigo", [75, 0, 130]),
    ("Coral", [255, 127, 80]),
];

pub fn rgb_of(name: &str) -> Option<Rgb> {
    PALETTE
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, rgb)| *rgb)
}

pub fn name_of(rgb: Rgb) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|(_, candidate)| *candidate == rgb)
        .map(|(name, _)| *name)
}

/// Parses one color component the way a number field is read: leading
/// whitespace is skipped, an optional sign and the leading run of digits are
/// used, and anything unparsable (or too large for `i32`) becomes 0.
///
/// `"42"` is 42, `" 7px"` is 7, `"-3"` is -3, `"abc"` and `""` are 0.
pub fn parse_color_component(input: &str) -> i32 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let Ok(value) = digits[..end].parse::<i32>() else {
        return 0;
    };
    if negative { -value } else { value }
}
