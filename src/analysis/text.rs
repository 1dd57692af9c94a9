//! Text cleaning and cheap derived fields

/// Collapses whitespace runs into single spaces and trims the ends
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-separated tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// True when the text carries an `http://`, `https://` or `www.` link
pub fn has_links(text: &str) -> bool {
    text.contains("http://") || text.contains("https://") || text.contains("www.")
}

/// True when an `@` is directly followed by a word character
pub fn has_mentions(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '@' {
            if let Some(next) = chars.peek() {
                if next.is_alphanumeric() || *next == '_' {
                    return true;
                }
            }
        }
    }
    false
}

/// Derived fields computed once per record from its cleaned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFeatures {
    pub word_count: usize,
    pub has_links: bool,
    pub has_mentions: bool,
}

impl TextFeatures {
    pub fn of(text: &str) -> Self {
        Self {
            word_count: word_count(text),
            has_links: has_links(text),
            has_mentions: has_mentions(text),
        }
    }
}
