//! Graph vocabulary.
//!
//! Nodes are keyed by the id the owning authority assigned. Edges are plain
//! directed relations without payload: `User -FOLLOW-> User`,
//! `User -BLOCK-> User`, `User -LIKE-> Post`.

use serde::{Deserialize, Serialize};
use shared_types::{PostId, UserId};
use std::fmt;

/// Node labels, used for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    User,
    Post,
}

impl NodeKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Post => "post",
        }
    }
}

/// A post node. The author is captured when the node is materialized so the
/// like path can run the block check without asking the post authority again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostNode {
    pub id: PostId,
    pub author_id: UserId,
}

/// Relations between two users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UserRelation {
    Follow,
    Block,
}

impl UserRelation {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Follow => "FOLLOW",
            Self::Block => "BLOCK",
        }
    }
}

impl fmt::Display for UserRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEdge {
    pub follower: UserId,
    pub followee: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeEdge {
    pub user_id: UserId,
    pub post_id: PostId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(UserRelation::Follow.to_string(), "FOLLOW");
        assert_eq!(UserRelation::Block.label(), "BLOCK");
        assert_eq!(NodeKind::Post.label(), "post");
    }
}
