//! Query parsing.
//!
//! | Hashtags | Words | Match |
//! |----------|-------|-------|
//! | yes | yes | every hashtag term AND at least one word term |
//! | yes | no | every hashtag term |
//! | no | yes | at least one word term, ranked by how many match |
//! | no | no | nothing |

use super::tokenizer::{terms, Tokens};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Empty,
    Hashtags,
    Words,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub mode: QueryMode,
    pub hashtag_terms: BTreeSet<String>,
    pub word_terms: BTreeSet<String>,
}

impl SearchQuery {
    pub fn parse(text: &str) -> Self {
        let tokens = Tokens::split(text);
        let mode = match (tokens.hashtags.is_empty(), tokens.words.is_empty()) {
            (false, false) => QueryMode::Both,
            (false, true) => QueryMode::Hashtags,
            (true, false) => QueryMode::Words,
            (true, true) => QueryMode::Empty,
        };
        Self {
            mode,
            hashtag_terms: terms(&tokens.hashtag_field()),
            word_terms: terms(&tokens.word_field()),
        }
    }

    /// A query whose constrained fields normalize to no terms matches nothing.
    #[must_use]
    pub fn is_unsatisfiable(&self) -> bool {
        match self.mode {
            QueryMode::Empty => true,
            QueryMode::Hashtags => self.hashtag_terms.is_empty(),
            QueryMode::Words => self.word_terms.is_empty(),
            QueryMode::Both => self.hashtag_terms.is_empty() || self.word_terms.is_empty(),
        }
    }

    #[must_use]
    pub fn requires_hashtags(&self) -> bool {
        matches!(self.mode, QueryMode::Hashtags | QueryMode::Both)
    }

    #[must_use]
    pub fn requires_words(&self) -> bool {
        matches!(self.mode, QueryMode::Words | QueryMode::Both)
    }
}
