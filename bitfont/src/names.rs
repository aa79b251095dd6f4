//! Glyph names for the `post` table

/// Production names for U+0020..=U+007E, from the Adobe Glyph List.
#[rustfmt::skip]
static ASCII_NAMES: [&str; 95] = [
    "space", "exclam", "quotedbl", "numbersign", "dollar", "percent", "ampersand", "quotesingle",
    "parenleft", "parenright", "asterisk", "plus", "comma", "hyphen", "period", "slash",
    "zero", "one", "two", "three", "four", "five", "six", "seven",
    "eight", "nine", "colon", "semicolon", "less", "equal", "greater", "question",
    "at", "A", "B", "C", "D", "E", "F", "G",
    "H", "I", "J", "K", "L", "M", "N", "O",
    "P", "Q", "R", "S", "T", "U", "V", "W",
    "X", "Y", "Z", "bracketleft", "backslash", "bracketright", "asciicircum", "underscore",
    "grave", "a", "b", "c", "d", "e", "f", "g",
    "h", "i", "j", "k", "l", "m", "n", "o",
    "p", "q", "r", "s", "t", "u", "v", "w",
    "x", "y", "z", "braceleft", "bar", "braceright", "asciitilde",
];

/// The name of the glyph for `codepoint`.
pub(crate) fn glyph_name(codepoint: u32) -> String {
    match codepoint {
        0x20..=0x7E => ASCII_NAMES[(codepoint - 0x20) as usize].to_string(),
        _ => format!("uni{codepoint:04X}"),
    }
}
