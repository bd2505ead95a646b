//! Per-class canonicalization of raw PII cells.
//!
//! Each normalizer maps an optional raw string to an optional canonical
//! string. An absent input always yields an absent output. Normalizers never
//! fail: values that cannot be canonicalized resolve to `None` for that cell.

/// Digits a phone number must have (after dropping a trunk `0`) to be usable.
pub const MIN_PHONE_DIGITS: usize = 11;

/// Country calling code added to phone numbers that lack it (Brazil).
pub const COUNTRY_CODE: &str = "55";

/// Unicode whitespace plus the ASCII information separators (U+001C..U+001F),
/// which spreadsheet exports sometimes leave at cell edges.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\x1c'..='\x1f')
}

/// Trim and lowercase. No format validation: a value without `@` still
/// comes back, trimmed and lowercased.
pub fn normalize_email(raw: Option<&str>) -> Option<String> {
    raw.map(|email| email.trim_matches(is_separator).to_lowercase())
}

/// Canonicalize a Brazilian phone number to `+55…` form.
///
/// Non-digits are dropped, one leading trunk `0` is removed, numbers shorter
/// than [`MIN_PHONE_DIGITS`] are rejected, and [`COUNTRY_CODE`] is prepended
/// unless already present.
pub fn normalize_phone(raw: Option<&str>) -> Option<String> {
    let digits: String = raw?.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    let digits = digits.strip_prefix('0').unwrap_or(&digits);
    if digits.len() < MIN_PHONE_DIGITS {
        return None;
    }

    if digits.starts_with(COUNTRY_CODE) {
        Some(format!("+{digits}"))
    } else {
        Some(format!("+{COUNTRY_CODE}{digits}"))
    }
}

/// A person's name split for Google customer match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub first: String,
    /// Every token after the first, space-joined. Empty for single-word names.
    pub last: String,
}

/// Transliterate letters and digits to ASCII. Other non-ASCII characters
/// (emoji, symbols, combining marks, private-use code points) fold to nothing.
fn fold_to_ascii(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii() {
            folded.push(c);
        } else if c.is_whitespace() {
            folded.push(' ');
        } else if c.is_alphanumeric()
            && let Some(ascii) = deunicode::deunicode_char(c).filter(|s| *s != "[?]")
        {
            folded.push_str(ascii);
        }
    }
    folded
}

/// Fold to ASCII, lowercase, and split into first name and the rest.
///
/// Returns `None` when the input is absent or contains no word at all.
pub fn normalize_name(raw: Option<&str>) -> Option<NameParts> {
    let folded = fold_to_ascii(raw?).to_lowercase();
    let mut tokens = folded.split(is_separator).filter(|t| !t.is_empty());
    let first = tokens.next()?.to_owned();
    let last = tokens.collect::<Vec<_>>().join(" ");
    Some(NameParts { first, last })
}
