//! L4 Atomic Layer: Time calculation utilities for scroll animations
//!
//! Timestamps are host milliseconds (the frame callback timeline), so the
//! functions here never read a clock themselves.

use std::time::Duration;

/// Calculate animation progress (0.0 to 1.0) from start time and duration
///
/// # Arguments
/// * `start_ms` - Host timestamp when the animation started
/// * `now_ms` - Host timestamp of the current frame
/// * `duration` - Total animation duration
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(start_ms: f64, now_ms: f64, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now_ms - start_ms;
    let ratio = elapsed / (duration.as_nanos() as f64 / 1_000_000.0);
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete
#[inline]
pub fn is_complete(start_ms: f64, now_ms: f64, duration: Duration) -> bool {
    progress(start_ms, now_ms, duration) >= 1.0
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
        assert!((lerp(400.0, 100.0, 0.5) - 250.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_clamps() {
        let duration = Duration::from_millis(700);
        assert!((progress(1000.0, 900.0, duration) - 0.0).abs() < 0.001);
        assert!((progress(1000.0, 1350.0, duration) - 0.5).abs() < 0.001);
        assert!((progress(1000.0, 5000.0, duration) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(0.0, 0.0, Duration::ZERO) - 1.0).abs() < 0.001);
        assert!(is_complete(0.0, 0.0, Duration::ZERO));
    }
}
