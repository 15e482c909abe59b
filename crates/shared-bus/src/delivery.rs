//! # Delivery Policy
//!
//! Controls which published messages the in-memory bus actually hands to
//! subscribers. Anything other than `Reliable` exists to exercise projector
//! convergence under message loss.

use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DeliveryPolicy {
    /// Deliver every message to every live subscriber.
    #[default]
    Reliable,
    /// Drop every n-th published message (1-based sequence). `0` drops nothing.
    DropEveryNth(u64),
    /// Drop each message independently with the given probability.
    DropRandom(f64),
    /// Drop everything.
    Blackhole,
}

impl DeliveryPolicy {
    /// Whether the message with publish sequence number `seq` is lost.
    #[must_use]
    pub fn should_drop(&self, seq: u64) -> bool {
        match *self {
            Self::Reliable => false,
            Self::DropEveryNth(0) => false,
            Self::DropEveryNth(n) => seq % n == 0,
            Self::DropRandom(p) => rand::thread_rng().gen_bool(p.clamp(0.0, 1.0)),
            Self::Blackhole => true,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid delivery policy '{0}' (expected reliable, blackhole, drop-every:<n> or drop-random:<p>)")]
pub struct ParsePolicyError(String);

impl FromStr for DeliveryPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        let err = || ParsePolicyError(s.to_string());

        match raw.split_once(':') {
            None if raw == "reliable" => Ok(Self::Reliable),
            None if raw == "blackhole" => Ok(Self::Blackhole),
            Some(("drop-every", n)) => n.parse().map(Self::DropEveryNth).map_err(|_| err()),
            Some(("drop-random", p)) => match p.parse::<f64>() {
                Ok(p) if (0.0..=1.0).contains(&p) => Ok(Self::DropRandom(p)),
                _ => Err(err()),
            },
            _ => Err(err()),
        }
    }
}

impl fmt::Display for DeliveryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reliable => f.write_str("reliable"),
            Self::DropEveryNth(n) => write!(f, "drop-every:{}", n),
            Self::DropRandom(p) => write!(f, "drop-random:{}", p),
            Self::Blackhole => f.write_str("blackhole"),
        }
    }
}
