//! # Murmur Test Suite
//!
//! Cross-service flows run against a full in-process runtime: authorities
//! publish on the bus, projectors apply off-thread, and assertions wait for
//! the projections to catch up.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── harness.rs    # started runtime + pinned clock + polling helper
//!     ├── posts.rs      # content rules, block gate, search over the bus
//!     ├── graph.rs      # self-relations, lazy materialization, block fan-out
//!     ├── timelines.rs  # merge order, idempotence, convergence
//!     └── delivery.rs   # message loss, reconciliation, upstream outages
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sn-tests
//! cargo test -p sn-tests integration::delivery::
//! ```

pub mod integration;
