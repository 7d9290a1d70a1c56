//! L4 Atomic Layer: Configuration types for anchor scrolling
//!
//! Re-exports the scroll section of the page configuration and adds the
//! derived values the animator works with.

use std::time::Duration;

pub use crate::config::ScrollSettings;

/// Extension trait for ScrollSettings with utility methods
pub trait ScrollSettingsExt {
    /// Get animation duration as Duration
    fn animation_duration(&self) -> Duration;

    /// Get frame pacing for hosts that drive frames themselves
    fn frame_interval(&self) -> Duration;

    /// Whether a scroll should jump, given the host's motion preference
    fn should_jump(&self, prefers_reduced_motion: bool) -> bool;
}

impl ScrollSettingsExt for ScrollSettings {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    #[inline]
    fn frame_interval(&self) -> Duration {
        if self.frame_interval_ms == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(self.frame_interval_ms)
        }
    }

    #[inline]
    fn should_jump(&self, prefers_reduced_motion: bool) -> bool {
        self.duration_ms == 0 || (self.respect_reduced_motion && prefers_reduced_motion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_duration() {
        let settings = ScrollSettings::default();
        assert_eq!(settings.animation_duration(), Duration::from_millis(700));
    }

    #[test]
    fn test_frame_interval_fallback() {
        let settings = ScrollSettings {
            frame_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(settings.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_should_jump() {
        let mut settings = ScrollSettings::default();
        assert!(!settings.should_jump(false));
        assert!(settings.should_jump(true));

        settings.respect_reduced_motion = false;
        assert!(!settings.should_jump(true));

        settings.duration_ms = 0;
        assert!(settings.should_jump(false));
    }
}
