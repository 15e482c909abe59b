//! # Runtime Configuration
//!
//! Defaults suit a single-process deployment. Every value can be overridden
//! from the environment:
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `SN_BUS_CAPACITY` | messages buffered per subscriber | 1000 |
//! | `SN_DELIVERY_POLICY` | `reliable`, `blackhole`, `drop-every:<n>`, `drop-random:<p>` | `reliable` |
//! | `SN_DISPATCH_MODE` | `concurrent` or `sequential` | `concurrent` |
//! | `SN_MAX_TEXT_CHARS` | post text limit | 160 |
//! | `SN_RECONCILE_INTERVAL_SECS` | resync period, `0` disables | disabled |
//! | `SN_SHUTDOWN_GRACE_MS` | drain time on shutdown | 2000 |

use shared_bus::delivery::ParsePolicyError;
use shared_bus::{DeliveryPolicy, DispatchMode, DEFAULT_CHANNEL_CAPACITY};
use sn_01_posts::DEFAULT_MAX_TEXT_CHARS;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub bus: BusConfig,
    /// Maximum post text length, in characters.
    pub max_text_chars: usize,
    pub reconciliation: ReconciliationPolicy,
    /// How long shutdown waits for in-flight handlers.
    pub shutdown_grace: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bus: BusConfig::default(),
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            reconciliation: ReconciliationPolicy::Disabled,
            shutdown_grace: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BusConfig {
    pub capacity: usize,
    pub policy: DeliveryPolicy,
    pub dispatch: DispatchMode,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CHANNEL_CAPACITY,
            policy: DeliveryPolicy::Reliable,
            dispatch: DispatchMode::Concurrent,
        }
    }
}

/// What to do about events a projector never received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconciliationPolicy {
    /// Lost events stay lost.
    #[default]
    Disabled,
    /// Replay authority snapshots into every projector on a fixed period.
    Periodic { interval: Duration },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name}: '{value}' is not a valid number")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name}: {source}")]
    InvalidPolicy {
        name: &'static str,
        source: ParsePolicyError,
    },

    #[error("{name}: '{value}' is not a dispatch mode (expected concurrent or sequential)")]
    InvalidDispatchMode { name: &'static str, value: String },

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

impl RuntimeConfig {
    /// Defaults overridden by `SN_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(capacity) = number::<usize>(&lookup, "SN_BUS_CAPACITY")? {
            if capacity == 0 {
                return Err(ConfigError::Zero {
                    name: "SN_BUS_CAPACITY",
                });
            }
            config.bus.capacity = capacity;
        }
        if let Some(raw) = lookup("SN_DELIVERY_POLICY") {
            config.bus.policy = raw.parse().map_err(|source| ConfigError::InvalidPolicy {
                name: "SN_DELIVERY_POLICY",
                source,
            })?;
        }
        if let Some(raw) = lookup("SN_DISPATCH_MODE") {
            config.bus.dispatch = match raw.trim().to_ascii_lowercase().as_str() {
                "concurrent" => DispatchMode::Concurrent,
                "sequential" => DispatchMode::Sequential,
                _ => {
                    return Err(ConfigError::InvalidDispatchMode {
                        name: "SN_DISPATCH_MODE",
                        value: raw,
                    })
                }
            };
        }
        if let Some(max) = number::<usize>(&lookup, "SN_MAX_TEXT_CHARS")? {
            config.max_text_chars = max;
        }
        if let Some(secs) = number::<u64>(&lookup, "SN_RECONCILE_INTERVAL_SECS")? {
            config.reconciliation = match secs {
                0 => ReconciliationPolicy::Disabled,
                secs => ReconciliationPolicy::Periodic {
                    interval: Duration::from_secs(secs),
                },
            };
        }
        if let Some(ms) = number::<u64>(&lookup, "SN_SHUTDOWN_GRACE_MS")? {
            config.shutdown_grace = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

fn number<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert_eq!(config.bus.capacity, 1000);
        assert_eq!(config.bus.policy, DeliveryPolicy::Reliable);
        assert_eq!(config.max_text_chars, 160);
        assert_eq!(config.reconciliation, ReconciliationPolicy::Disabled);
    }

    #[test]
    fn test_overrides() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("SN_BUS_CAPACITY", "16"),
            ("SN_DELIVERY_POLICY", "drop-every:3"),
            ("SN_DISPATCH_MODE", "Sequential"),
            ("SN_RECONCILE_INTERVAL_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.bus.capacity, 16);
        assert_eq!(config.bus.policy, DeliveryPolicy::DropEveryNth(3));
        assert_eq!(config.bus.dispatch, DispatchMode::Sequential);
        assert_eq!(
            config.reconciliation,
            ReconciliationPolicy::Periodic {
                interval: Duration::from_secs(30)
            }
        );
    }

    #[test]
    fn test_zero_interval_disables_reconciliation() {
        let config =
            RuntimeConfig::from_lookup(lookup(&[("SN_RECONCILE_INTERVAL_SECS", "0")])).unwrap();
        assert_eq!(config.reconciliation, ReconciliationPolicy::Disabled);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            RuntimeConfig::from_lookup(lookup(&[("SN_BUS_CAPACITY", "lots")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            RuntimeConfig::from_lookup(lookup(&[("SN_BUS_CAPACITY", "0")])),
            Err(ConfigError::Zero { .. })
        ));
        assert!(matches!(
            RuntimeConfig::from_lookup(lookup(&[("SN_DELIVERY_POLICY", "sometimes")])),
            Err(ConfigError::InvalidPolicy { .. })
        ));
        assert!(matches!(
            RuntimeConfig::from_lookup(lookup(&[("SN_DISPATCH_MODE", "parallel")])),
            Err(ConfigError::InvalidDispatchMode { .. })
        ));
    }
}
