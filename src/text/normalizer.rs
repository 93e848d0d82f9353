/*!
 * Normalization of transcribed exam text.
 *
 * Transcriptions arrive with decoration the renderers add back on their own:
 * question labels (`Q.3`, `سوال ۳`), option labels (`(a)`, `b.`), and mark
 * annotations that leaked into the body (`... (5)`). Every function here is
 * pure and total: empty input gives empty output and nothing panics.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: Leading question label, possibly repeated ("سوال نمبر 3")
static QUESTION_LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*(?:(?:question|quest|q|سوال|نمبر|السؤال|س)\s*[-.:۔]?\s*)+([^\p{L}].*)?$").unwrap()
});

// @const: Trailing separators left behind on a bare number ("3.", "1-")
static TRAILING_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\s\-.:۔]+$").unwrap()
});

// @const: Whole value wrapped in one pair of brackets ("(3)", "[10]")
static WRAPPING_BRACKETS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\(\[\{]\s*([^\(\)\[\]\{\}]*?)\s*[\)\]\}]$").unwrap()
});

// @const: Option label: bracketed short token, or a single letter/number with a separator
static OPTION_LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:[\(\[\{][\p{L}\p{N}]{1,4}[\)\]\}]\s*[-.:۔]?\s*|(?:\p{L}|\p{N}{1,2})[\)\]\}\-.:۔](?:\s+|$))",
    )
    .unwrap()
});

// @const: One or more bracketed numerals ending an option ("Force (2) (3)")
static TRAILING_OPTION_MARKS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\s*[\(\[\{]\s*\p{Nd}+\s*[\)\]\}])+\s*$").unwrap()
});

// @const: Numeric label in front of a question body ("(1)", "1)", "2.")
static QUESTION_NUMBER_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[\(\[\{]\p{Nd}+[\)\]\}]\s*[-.:۔]?\s*|\p{Nd}+\s*[-.:۔)](?:\s+|$))").unwrap()
});

// @const: Bracketed numeral at the very end of a string ("(10)", "[٥]")
static TRAILING_MARKS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*[\(\[\{]\s*(\p{Nd}+)\s*[\)\]\}]\s*$").unwrap()
});

/// Remove a leading question label (`Q`, `Q.`, `Question`, `سوال`, `س`, `السؤال`, ...)
/// and trailing separators from a question number.
///
/// A bare numeral comes back unchanged; `"Q.3"` becomes `"3"`.
pub fn strip_question_prefix(number: &str) -> String {
    let trimmed = number.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let without_label = match QUESTION_LABEL_REGEX.captures(trimmed) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()).to_string(),
        None => trimmed.to_string(),
    };

    let without_separator = TRAILING_SEPARATOR_REGEX.replace(&without_label, "");
    unwrap_brackets(without_separator.trim())
}

/// Remove a leading option label (`(a)`, `a.`, `1-`, `(١)`) and any stray
/// bracketed numerals at the end of an option.
///
/// Stacked labels (`"(a) (b) Paris"`) are left alone: stripping only the
/// first would expose the second to the next call.
pub fn strip_option_label(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let without_marks = TRAILING_OPTION_MARKS_REGEX.replace(text, "");
    let without_label = match OPTION_LABEL_REGEX.find(&without_marks) {
        Some(label) if !OPTION_LABEL_REGEX.is_match(&without_marks[label.end()..]) => {
            &without_marks[label.end()..]
        }
        _ => &without_marks[..],
    };
    without_label.trim().to_string()
}

/// Remove a leading numeric label and a trailing bracketed mark annotation
/// from a question body. Only the outermost match on each side is removed.
pub fn clean_question_text(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let without_prefix = QUESTION_NUMBER_PREFIX_REGEX.replace(text, "");
    TRAILING_MARKS_REGEX
        .replace(&without_prefix, "")
        .trim()
        .to_string()
}

/// Marks annotation trailing a question body, if any: `"What? (5)"` gives `Some("5")`.
pub fn trailing_marks(text: &str) -> Option<String> {
    TRAILING_MARKS_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Strip decoration from a marks value: `"(10)"` and `"[10]"` both become `"10"`.
pub fn normalize_marks(marks: &str) -> String {
    unwrap_brackets(marks.trim())
}

fn unwrap_brackets(value: &str) -> String {
    match WRAPPING_BRACKETS_REGEX.captures(value) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()).trim().to_string(),
        None => value.to_string(),
    }
}
