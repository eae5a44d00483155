//! Session manager tuning knobs, loaded from environment variables.

use std::time::Duration;

use crate::token::OpaqueTokenPolicy;

/// Periodic token re-validation interval, matching the source's five-minute
/// check.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Tuning knobs for the session manager.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    /// How often the expiry watchdog re-checks the stored token while the
    /// session is authenticated.
    pub check_interval: Duration,
    /// How undecodable tokens are treated by the validity rule.
    pub opaque_token_policy: OpaqueTokenPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            check_interval: DEFAULT_CHECK_INTERVAL,
            opaque_token_policy: OpaqueTokenPolicy::default(),
        }
    }
}

impl SessionConfig {
    /// Load overrides from `NEPTUNE_TOKEN_CHECK_SECS` and
    /// `NEPTUNE_REJECT_OPAQUE_TOKENS`.
    #[must_use]
    pub fn from_env() -> Self {
        let check_secs = env_parse("NEPTUNE_TOKEN_CHECK_SECS", DEFAULT_CHECK_INTERVAL.as_secs());
        let reject_opaque = env_bool("NEPTUNE_REJECT_OPAQUE_TOKENS").unwrap_or(false);
        Self {
            check_interval: Duration::from_secs(check_secs),
            opaque_token_policy: if reject_opaque {
                OpaqueTokenPolicy::Reject
            } else {
                OpaqueTokenPolicy::Trust
            },
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
