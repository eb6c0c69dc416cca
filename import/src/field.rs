//! Derive field identifiers from column headers.

/// Derive the default field identifier of a column header.
///
/// The header is trimmed and lowercased, every run of characters outside
/// `[a-z0-9]` that is followed by a letter or digit is dropped and that letter
/// is uppercased. A trailing run keeps only its underscores.
///
/// ```
/// use nsfetch_import::resolve;
///
/// assert_eq!(resolve("Customer Name"), "customerName");
/// assert_eq!(resolve("ship-to-city"), "shipToCity");
/// ```
///
/// The result only ever contains `[A-Za-z0-9_]` and may be empty.
pub fn resolve(header: &str) -> String {
    let lowered = header
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut pending = String::new();
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending.is_empty() {
                out.push(c);
            } else {
                out.push(c.to_ascii_uppercase());
                pending.clear();
            }
        } else {
            pending.push(c);
        }
    }
    out.extend(pending.chars().filter(|c| *c == '_'));

    out
}

/// Derive a dotted field path from a header, resolving each `.` separated segment on its own.
///
/// Empty segments are dropped, so `"Ship To . City"` becomes `"shipTo.city"`.
pub fn resolve_path(header: &str) -> String {
    header
        .split('.')
        .map(resolve)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}
