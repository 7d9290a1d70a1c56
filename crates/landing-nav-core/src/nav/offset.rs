use crate::config::NavigationHeights;
use crate::geometry::Rect;

use super::release::{active_sticky_bar, NavPhase};

/// Pixels to subtract from an anchor position so it lands below whatever bar
/// covers the viewport top.
#[derive(Debug, Clone, Copy)]
pub struct OffsetResolver {
    heights: NavigationHeights,
}

impl OffsetResolver {
    pub fn new(heights: NavigationHeights) -> Self {
        Self { heights }
    }

    /// Resolve against the current phase and freshly measured bar rects.
    ///
    /// The active bar is re-derived from `bars` rather than taken from the
    /// last tick, since geometry may have moved since then.
    pub fn resolve(&self, phase: NavPhase, bars: &[Rect]) -> u32 {
        match phase {
            NavPhase::Docked => self.heights.nav_height,
            NavPhase::Released if active_sticky_bar(bars).is_some() => self.heights.subnav_height,
            NavPhase::Released => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> OffsetResolver {
        OffsetResolver::new(NavigationHeights::new(72, 48))
    }

    #[test]
    fn test_docked_ignores_bars() {
        let bars = [Rect::new(-5.0, 55.0), Rect::new(0.0, 48.0)];
        assert_eq!(resolver().resolve(NavPhase::Docked, &bars), 72);
        assert_eq!(resolver().resolve(NavPhase::Docked, &[]), 72);
    }

    #[test]
    fn test_released_with_active_bar() {
        let bars = [Rect::new(200.0, 248.0), Rect::new(-5.0, 43.0)];
        assert_eq!(resolver().resolve(NavPhase::Released, &bars), 48);
    }

    #[test]
    fn test_released_without_active_bar() {
        let bars = [Rect::new(200.0, 248.0), Rect::new(-48.0, 0.0)];
        assert_eq!(resolver().resolve(NavPhase::Released, &bars), 0);
        assert_eq!(resolver().resolve(NavPhase::Released, &[]), 0);
    }
}
