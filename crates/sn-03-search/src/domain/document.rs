use super::tokenizer::Tokens;
use serde::{Deserialize, Serialize};
use shared_types::PostId;

/// One indexed post. Re-indexing the same id replaces the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocument {
    pub post_id: PostId,
    pub raw_text: String,
    pub words: String,
    pub hashtags: String,
}

impl SearchDocument {
    pub fn from_text(post_id: PostId, text: &str) -> Self {
        let tokens = Tokens::split(text);
        Self {
            post_id,
            raw_text: text.to_string(),
            words: tokens.word_field(),
            hashtags: tokens.hashtag_field(),
        }
    }
}
