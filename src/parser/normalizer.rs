// file: src/parser/normalizer.rs
// description: accent and case folding for locale-independent term matching
// reference: https://unicode.org/reports/tr15/

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lower-cases `text`, decomposes it (NFD) and drops every combining mark.
///
/// Lower-casing runs first so that marks introduced by case mapping
/// (`İ` lower-cases to `i` + U+0307) are stripped too, which keeps the
/// function idempotent.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Missing text normalizes to the empty string, which never matches a term.
pub fn normalize_optional(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
