use std::sync::LazyLock;

use regex::Regex;

static UNIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+\s*(yrs?|mos?|years?|months?)\b").unwrap());
static PRESENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(present|·)\s*\d").unwrap());
static RANGE_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\d\s*-\s*present").unwrap());
static RANGE_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\s*\d{4}\s*-").unwrap()
});
static BARE_DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\d{1,2}\s*(yrs?|mos?)\s*$").unwrap());

/// The platform's own name; a header carrying only this is never a profile field.
pub const BRAND_NAME: &str = "LinkedIn";

const MAX_DURATION_LEN: usize = 80;
const MAX_ENTRY_TEXT_LEN: usize = 200;

/// Employment-type separator, e.g. "Acme Corp · Full-time".
const ANNOTATION_SEPARATOR: &str = " · ";

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub fn is_brand_name(text: &str) -> bool {
    text.eq_ignore_ascii_case(BRAND_NAME)
}

/// Top-card fields: more than one character and not the brand name.
pub fn is_label(text: &str) -> bool {
    char_len(text) > 1 && !is_brand_name(text)
}

/// Experience-entry fields additionally stay under 200 characters.
pub fn is_entry_label(text: &str) -> bool {
    is_label(text) && char_len(text) < MAX_ENTRY_TEXT_LEN
}

pub fn is_company_candidate(text: &str) -> bool {
    is_entry_label(text) && !looks_like_duration(text)
}

/// Keep only the company name: "Acme Corp · Full-time" -> "Acme Corp".
pub fn clean_company_text(text: &str) -> String {
    let t = text.trim();
    match t.find(ANNOTATION_SEPARATOR) {
        Some(idx) => t[..idx].trim().to_string(),
        None => t.to_string(),
    }
}

/// Tenure or date strings such as "Sep 2012 - Present · 13 yrs 6 mos".
///
/// Empty and overlong text count as durations too, so callers can use this as
/// a single rejection test.
pub fn looks_like_duration(text: &str) -> bool {
    if text.is_empty() || char_len(text) > MAX_DURATION_LEN {
        return true;
    }
    UNIT_RE.is_match(text)
        || PRESENT_RE.is_match(text)
        || RANGE_END_RE.is_match(text)
        || RANGE_START_RE.is_match(text)
        || BARE_DURATION_RE.is_match(text)
}

/// Split a headline on the first " at " into (title, raw company).
pub fn split_headline(headline: &str) -> (String, Option<&str>) {
    match headline.find(" at ") {
        Some(idx) => (headline[..idx].trim().to_string(), Some(&headline[idx + 4..])),
        None => (headline.to_string(), None),
    }
}

/// Truncate to at most `max` characters.
pub fn take_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

// ── Tests ──
