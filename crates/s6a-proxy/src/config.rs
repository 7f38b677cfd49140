//! Bridge configuration.

use bridge_telemetry::parse_flag;
use std::env;
use std::time::Duration;

/// Default deadline applied to each remote call.
pub const DEFAULT_RPC_DEADLINE: Duration = Duration::from_secs(10);

/// Runtime switches for the S6a bridge.
///
/// Passed to the dispatcher at construction; nothing reads it from global
/// state, so tests can run with different settings side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S6aProxyConfig {
    /// When false, purge requests are acknowledged locally and never sent.
    pub remote_integration_enabled: bool,

    /// Deadline for one remote call. `None` waits indefinitely.
    pub rpc_deadline: Option<Duration>,
}

impl Default for S6aProxyConfig {
    fn default() -> Self {
        Self {
            remote_integration_enabled: true,
            rpc_deadline: Some(DEFAULT_RPC_DEADLINE),
        }
    }
}

impl S6aProxyConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MME_BRIDGE_S6A_RELAY_ENABLED`: Forward purge requests (default: true)
    /// - `MME_BRIDGE_S6A_RPC_DEADLINE_MS`: Per-call deadline in ms, `0` for none (default: 10000)
    ///
    /// Unparseable deadlines fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            remote_integration_enabled: env::var("MME_BRIDGE_S6A_RELAY_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.remote_integration_enabled),

            rpc_deadline: env::var("MME_BRIDGE_S6A_RPC_DEADLINE_MS")
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map_or(defaults.rpc_deadline, deadline_from_millis),
        }
    }

    /// Configuration with the remote relay switched off.
    #[must_use]
    pub fn relay_disabled() -> Self {
        Self {
            remote_integration_enabled: false,
            ..Self::default()
        }
    }
}

fn deadline_from_millis(millis: u64) -> Option<Duration> {
    (millis > 0).then(|| Duration::from_millis(millis))
}
