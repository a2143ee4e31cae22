//! Route normalization.
//!
//! Turns a raw, possibly inconsistent route into its canonical form before it
//! is validated or stored:
//!
//! - `Host` is blanked when `UseHost` is off, `PathPrefix` when
//!   `UsePathPrefix` is off, so stale values never reach route matching
//! - `Name` is trimmed
//! - `SmartShield` always exists (`{}` when absent)
//! - the flattened `_SmartShield_Enabled` field of older clients is folded
//!   into `SmartShield.Enabled`
//!
//! Normalization is total and idempotent.

use crate::route::{RouteConfig, SmartShield};
use tracing::debug;

/// Fold fields written by older clients into their current location.
///
/// `_SmartShield_Enabled` becomes `SmartShield.Enabled` whenever the key is
/// present, including a `null` value, which clears `Enabled`. The flat field
/// is always removed.
pub fn migrate_legacy_fields(mut route: RouteConfig) -> RouteConfig {
    if let Some(enabled) = route.legacy_smart_shield_enabled.take() {
        debug!(route = %route.name, enabled = ?enabled, "migrating _SmartShield_Enabled");
        route
            .smart_shield
            .get_or_insert_with(SmartShield::default)
            .enabled = enabled;
    }
    route
}

/// Produce the canonical form of `raw`. The input is left untouched.
pub fn normalize(raw: &RouteConfig) -> RouteConfig {
    let mut route = migrate_legacy_fields(raw.clone());

    if !route.use_host {
        route.host.clear();
    }
    if !route.use_path_prefix {
        route.path_prefix.clear();
    }

    let trimmed = route.name.trim();
    if trimmed.len() != route.name.len() {
        route.name = trimmed.to_string();
    }

    if route.smart_shield.is_none() {
        route.smart_shield = Some(SmartShield::default());
    }

    route
}
