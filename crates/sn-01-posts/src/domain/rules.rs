//! Content rules applied to every new post.

/// Default maximum text length, in characters.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRules {
    pub max_text_chars: usize,
    /// Upper bound on how many of {text, media, repost} one post may combine.
    pub max_content_kinds: usize,
}

impl Default for ContentRules {
    fn default() -> Self {
        Self {
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            max_content_kinds: 2,
        }
    }
}

impl ContentRules {
    pub fn with_max_text_chars(mut self, max: usize) -> Self {
        self.max_text_chars = max;
        self
    }
}
