//! # Search Projector (sn-03)
//!
//! Keeps a full-text index of post text, fed by `post_events`.
//!
//! - CREATION: tokenize the text (empty when absent) and index it under the
//!   post id, replacing any earlier document
//! - DELETION: drop the document; unknown ids are ignored
//!
//! Query semantics are described in [`domain::query`].

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{InMemorySearchIndex, SearchEventHandler};
pub use domain::{QueryMode, SearchDocument, SearchQuery, Tokens};
pub use error::SearchError;
pub use ports::{IndexError, SearchApi, SearchIndex};
pub use service::SearchService;
