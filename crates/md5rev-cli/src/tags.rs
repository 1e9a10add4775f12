//! Alphabet tags such as `<digits>`

/// Ordered mapping from tag names to the characters they stand for.
///
/// Built once at startup and handed to whatever expands user input;
/// expansion replaces tags in table order.
#[derive(Debug, Clone)]
pub struct TagTable {
    tags: Vec<(&'static str, String)>,
}

impl TagTable {
    /// The built-in tags
    pub fn standard() -> Self {
        let punctuation: String = (0x21u8..=0x7e)
            .map(char::from)
            .filter(char::is_ascii_punctuation)
            .collect();

        Self {
            tags: vec![
                ("<space>", " ".to_string()),
                ("<digits>", ('0'..='9').collect()),
                ("<symbols>", punctuation),
                ("<englishlower>", ('a'..='z').collect()),
                ("<englishupper>", ('A'..='Z').collect()),
            ],
        }
    }

    /// Replace every tag occurrence in `text`
    pub fn expand(&self, text: &str) -> String {
        self.tags
            .iter()
            .fold(text.to_string(), |acc, (tag, chars)| acc.replace(tag, chars))
    }

    /// Whether `text` mentions any tag
    pub fn contains_tag(&self, text: &str) -> bool {
        self.tags.iter().any(|(tag, _)| text.contains(tag))
    }

    /// Whether to suggest tags: raw digits or symbols typed without any tag
    pub fn suggest_tags(&self, text: &str) -> bool {
        let has_specials = text
            .chars()
            .any(|c| c.is_ascii_digit() || c.is_ascii_punctuation());
        has_specials && !self.contains_tag(text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.tags.iter().map(|(tag, chars)| (*tag, chars.as_str()))
    }

    /// Tag names joined for help output
    pub fn names(&self) -> String {
        self.tags
            .iter()
            .map(|(tag, _)| *tag)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_digits_and_lower() {
        let tags = TagTable::standard();
        assert_eq!(tags.expand("<digits>"), "0123456789");
        assert_eq!(tags.expand("x<space>y"), "x y");
        assert_eq!(tags.expand("<englishlower>").len(), 26);
    }

    #[test]
    fn test_symbols_are_ascii_punctuation() {
        let tags = TagTable::standard();
        let symbols = tags.expand("<symbols>");
        assert_eq!(symbols, "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~");
    }

    #[test]
    fn test_untagged_text_unchanged() {
        let tags = TagTable::standard();
        assert_eq!(tags.expand("abc<nope>"), "abc<nope>");
    }

    #[test]
    fn test_suggest_tags() {
        let tags = TagTable::standard();
        assert!(tags.suggest_tags("abc123"));
        assert!(tags.suggest_tags("abc!"));
        assert!(!tags.suggest_tags("abc"));
        assert!(!tags.suggest_tags("<digits>!"));
    }
}
