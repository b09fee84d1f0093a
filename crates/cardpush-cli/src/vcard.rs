//! vCard record extraction
//!
//! The importer does not parse vCards. It cuts the input at every
//! `END:VCARD` marker and hands the raw text of each record to the rest of
//! the pipeline, byte for byte.

/// Literal that terminates every vCard record
pub const END_MARKER: &str = "END:VCARD";

/// Literal that opens every well-formed vCard record
pub const BEGIN_MARKER: &str = "BEGIN:VCARD";

/// Split raw file text into record blocks
///
/// Every returned block ends with [`END_MARKER`]. Text after the last marker
/// (often just a trailing newline) becomes one extra partial block with the
/// marker appended. Empty input yields no blocks. Source order is preserved.
pub fn split_records(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut blocks: Vec<String> = text
        .split(END_MARKER)
        .map(|piece| format!("{}{}", piece, END_MARKER))
        .collect();

    // `split` yields an empty last piece when the text ends exactly on a
    // marker; that piece is not a record.
    if text.ends_with(END_MARKER) {
        blocks.pop();
    }

    blocks
}

/// Whether the block opens with a vCard header somewhere
pub fn is_complete(block: &str) -> bool {
    block.contains(BEGIN_MARKER)
}

/// Whether the block carries at least one `EMAIL` property
///
/// Matches `EMAIL:...`, `EMAIL;TYPE=work:...` and grouped forms such as
/// `item1.EMAIL:...`, case-insensitively.
pub fn has_email(block: &str) -> bool {
    block.lines().any(|line| property_name(line).eq_ignore_ascii_case("EMAIL"))
}

fn property_name(line: &str) -> &str {
    let name_end = line.find([':', ';']).unwrap_or(line.len());
    let name = &line[..name_end];
    match name.rfind('.') {
        Some(dot) => &name[dot + 1..],
        None => name,
    }
}
