//! Event allow-list filtering.

use gitwebhooks_config::PlatformConfig;

/// Check an event against a platform allow-list.
///
/// An empty list allows everything, including requests without an event.
/// Matching is exact and case-sensitive.
pub fn is_event_allowed(event: Option<&str>, config: &PlatformConfig) -> bool {
    if config.handle_events.is_empty() {
        return true;
    }

    event.map_or(false, |event| {
        config.handle_events.iter().any(|allowed| allowed == event)
    })
}
