//! # Domain Layer
//!
//! Tokenization, documents and queries. No I/O.

pub mod document;
pub mod query;
pub mod tokenizer;

pub use document::SearchDocument;
pub use query::{QueryMode, SearchQuery};
pub use tokenizer::{terms, Tokens};
