//! # Domain Layer
//!
//! Graph nodes and relations. No I/O.

pub mod graph;

pub use graph::{FollowEdge, LikeEdge, NodeKind, PostNode, UserRelation};
