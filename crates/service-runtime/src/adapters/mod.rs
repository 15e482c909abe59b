//! # Cross-Service Adapters
//!
//! Implementations of each service's outbound ports in terms of another
//! service's inbound API. Every call goes through an [`Endpoint`], which
//! stands in for the network hop: it can be unbound (service not started)
//! or switched off (service unreachable), and either way the caller sees a
//! `RemoteError`.

pub mod clients;
pub mod endpoint;

pub use clients::{PostDirectoryClient, SocialGraphGuardClient, UserTimelineClient};
pub use endpoint::Endpoint;
