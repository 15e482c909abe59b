//! # Social Graph Authority (sn-02)
//!
//! Owns follow, block and like edges. Follow and like changes are published
//! on `queue-follow-events` and `queue-likes-events`; blocks are not.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): nodes and relations
//! - **Ports Layer** (`ports/`): `SocialGraphApi` inbound; graph store,
//!   entity directory, guard, publisher outbound
//! - **Service Layer** (`service/`): `GraphService`, `Materializer`
//! - **Adapters Layer** (`adapters/`): in-memory graph, graph-backed guard
//!
//! ## Lazy Materialization
//!
//! The graph only holds users and posts that some edge operation touched.
//! Unknown ids are confirmed against the post authority before a node is
//! created; see [`service::Materializer`].
//!
//! ## Rules
//!
//! | Operation | Rejected when |
//! |-----------|---------------|
//! | follow | self, unknown user, block in either direction |
//! | unfollow | self, no follow edge |
//! | block | self, unknown user |
//! | unblock | self, no block edge |
//! | like | unknown user or post, block with the post's author |
//! | unlike | no like edge |

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{GraphBlockGuard, InMemoryGraphStore};
pub use domain::{FollowEdge, LikeEdge, NodeKind, PostNode, UserRelation};
pub use error::GraphError;
pub use ports::{EntityDirectory, GraphStore, SocialGraphApi, StoreError};
pub use service::{GraphService, Materializer};
