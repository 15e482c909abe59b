//! Whitespace tokenizer.
//!
//! A token starting with `#` is a hashtag; every other token is a word.
//! Documents and queries go through the same split.
//!
//! Matching happens on *terms*: the alphanumeric runs inside a token,
//! lowercased. `#World!` yields the term `world`.

use std::collections::BTreeSet;

/// A text split into its hashtag and word tokens, in original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    pub hashtags: Vec<String>,
    pub words: Vec<String>,
}

impl Tokens {
    pub fn split(text: &str) -> Self {
        let mut tokens = Self::default();
        for token in text.split_whitespace() {
            if token.starts_with('#') {
                tokens.hashtags.push(token.to_string());
            } else {
                tokens.words.push(token.to_string());
            }
        }
        tokens
    }

    /// Hashtag tokens joined by single spaces, duplicates kept.
    pub fn hashtag_field(&self) -> String {
        self.hashtags.join(" ")
    }

    pub fn word_field(&self) -> String {
        self.words.join(" ")
    }
}

/// Normalized terms of a field.
pub fn terms(field: &str) -> BTreeSet<String> {
    field
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_keeps_duplicates_and_order() {
        let tokens = Tokens::split("hello #world #world foo");
        assert_eq!(tokens.hashtag_field(), "#world #world");
        assert_eq!(tokens.word_field(), "hello foo");
    }

    #[test]
    fn test_split_collapses_whitespace() {
        let tokens = Tokens::split("  a\t\n#b   c ");
        assert_eq!(tokens.hashtags, vec!["#b"]);
        assert_eq!(tokens.words, vec!["a", "c"]);
        assert_eq!(Tokens::split(""), Tokens::default());
    }

    #[test]
    fn test_terms_are_normalized() {
        let t = terms("#World! #rust-lang");
        assert_eq!(
            t.into_iter().collect::<Vec<_>>(),
            vec!["lang", "rust", "world"]
        );
        assert!(terms("# ### !").is_empty());
    }

    proptest! {
        #[test]
        fn prop_every_token_lands_in_one_field(words in prop::collection::vec("#?[a-z]{1,6}", 0..12)) {
            let text = words.join(" ");
            let tokens = Tokens::split(&text);

            prop_assert_eq!(tokens.hashtags.len() + tokens.words.len(), words.len());
            prop_assert!(tokens.hashtags.iter().all(|h| h.starts_with('#')));
            prop_assert!(tokens.words.iter().all(|w| !w.starts_with('#')));
        }
    }
}
