use lazy_static::lazy_static;
use regex::Regex;

const COUNTY_SUFFIX: &str = " county";

/// "Nairobi County" -> "Nairobi". Listing rows never carry the suffix.
pub fn strip_county_suffix(name: &str) -> &str {
    let trimmed = name.trim();
    let cut = trimmed.len().saturating_sub(COUNTY_SUFFIX.len());

    match trimmed.get(cut..) {
        Some(tail) if cut > 0 && tail.eq_ignore_ascii_case(COUNTY_SUFFIX) => trimmed[..cut].trim_end(),
        _ => trimmed,
    }
}

/// Case-insensitive containment, the in-memory twin of `ILIKE '%needle%'`.
///
/// Folds with Unicode lowercase, which is what `ILIKE` does on a UTF-8 database. A database
/// created with the `C` ctype only folds ASCII and would disagree on non-ASCII names.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Wraps `term` as `%term%` with LIKE metacharacters escaped.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Reads a bedroom count out of text like "3 Bedrooms House", "2 beds" or "2br Apartment".
pub fn bedrooms_from_text(text: &str) -> Option<i32> {
    lazy_static! {
        static ref BEDROOM_REGEX: Regex =
            Regex::new(r"(?i)\b(\d{1,2})\s*-?\s*(?:bedrooms?|beds?|brs?)\b").unwrap();
    }

    BEDROOM_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
