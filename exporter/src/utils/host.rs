//! Local host identification

use crate::core::constants::UNKNOWN_HOSTNAME;

/// Resolve the local hostname, falling back to a placeholder when the OS lookup fails
pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .map(|h| h.to_string_lossy().into_owned())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| {
            tracing::warn!(
                fallback = UNKNOWN_HOSTNAME,
                "Could not resolve local hostname"
            );
            UNKNOWN_HOSTNAME.to_string()
        })
}
