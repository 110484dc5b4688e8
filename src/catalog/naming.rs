//! Name and identifier parsing for course, week and file names.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// Maximum length of a fallback course identifier
const FALLBACK_ID_LEN: usize = 10;

static NUMBER_PREFIX: OnceLock<Regex> = OnceLock::new();
static HANDOUT_PREFIX: OnceLock<Regex> = OnceLock::new();

fn number_prefix() -> &'static Regex {
    // "01 ", "01. ", "01 - ", "01_"
    NUMBER_PREFIX.get_or_init(|| Regex::new(r"^\d+[\s.\-_]*").expect("valid number prefix regex"))
}

fn handout_prefix() -> &'static Regex {
    // "Handout", "Handout (Week1) ", "handout_[A]_"
    HANDOUT_PREFIX.get_or_init(|| {
        Regex::new(r"(?i)^Handout[_\s]*[\[(]?[^\])]*[\])]?[_\s]*").expect("valid handout regex")
    })
}

/// Extract the course identifier from a folder name like `DT101 - Introduction to debate`.
///
/// Takes the leading run of ASCII letters and digits. When the name does not
/// start with one, falls back to every ASCII alphanumeric character of the
/// name, truncated to 10 characters.
pub fn extract_course_id(folder_name: &str) -> String {
    let leading: String = folder_name
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect();

    if !leading.is_empty() {
        return leading;
    }

    folder_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(FALLBACK_ID_LEN)
        .collect()
}

/// One run of a name split on digit boundaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyToken {
    /// Non-digit run, lowercased
    Text(String),

    /// Digit run with leading zeros stripped
    Number(String),
}

impl Ord for KeyToken {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyToken::Text(a), KeyToken::Text(b)) => a.cmp(b),
            // Equal-length digit strings without leading zeros order like their values
            (KeyToken::Number(a), KeyToken::Number(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (KeyToken::Number(_), KeyToken::Text(_)) => Ordering::Less,
            (KeyToken::Text(_), KeyToken::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for KeyToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key comparing embedded numbers by value, so `Week 2` < `Week 10`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<KeyToken>);

impl NaturalKey {
    pub fn tokens(&self) -> &[KeyToken] {
        &self.0
    }
}

/// Build the natural sort key for a name.
///
/// The key always starts with a (possibly empty) text token and alternates
/// text and number tokens, so two keys compare token kinds pairwise.
/// Only ASCII digits form number runs; other Unicode digits stay in text.
pub fn natural_sort_key(name: &str) -> NaturalKey {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_ascii_digit() {
            text.push(c);
            continue;
        }

        tokens.push(KeyToken::Text(std::mem::take(&mut text).to_lowercase()));

        let mut digits = String::from(c);
        while let Some(&next) = chars.peek() {
            if !next.is_ascii_digit() {
                break;
            }
            digits.push(next);
            chars.next();
        }

        let trimmed = digits.trim_start_matches('0');
        tokens.push(KeyToken::Number(trimmed.to_string()));
    }

    tokens.push(KeyToken::Text(text.to_lowercase()));
    NaturalKey(tokens)
}

/// Compare two names naturally, falling back to the raw names on ties
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_sort_key(a)
        .cmp(&natural_sort_key(b))
        .then_with(|| a.cmp(b))
}

/// Sort items in place by [`natural_cmp`] on their names
pub fn natural_sort<T, F>(items: &mut [T], name: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| natural_cmp(name(a), name(b)));
}

/// Turn a filename into a display name.
///
/// Drops the extension and any leading number prefix, and rewrites a leading
/// `Handout` (with an optional bracketed qualifier) to `Handout: `. Falls back
/// to the original filename when nothing is left.
pub fn clean_file_name(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    let name = number_prefix().replace(stem, "");
    let name = handout_prefix().replace(&name, "Handout: ");

    let trimmed = name.trim();
    if trimmed.is_empty() {
        filename.to_string()
    } else {
        trimmed.to_string()
    }
}
