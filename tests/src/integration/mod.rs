//! Cross-service integration flows.

pub mod harness;

#[cfg(test)]
mod delivery;
#[cfg(test)]
mod graph;
#[cfg(test)]
mod posts;
#[cfg(test)]
mod timelines;
