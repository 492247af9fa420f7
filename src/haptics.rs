//! Haptic feedback on capture
//!
//! The Vibration API is an optional nicety: a missing or rejected call is
//! ignored, never surfaced as an error.

/// Buzz for `ms` milliseconds if the device supports it
pub fn buzz(ms: u32) {
    if let Some(window) = web_sys::window() {
        // Returns false when vibration is unsupported or blocked; either
        // way the catch already counted
        let _ = window.navigator().vibrate_with_duration(ms);
    }
}
