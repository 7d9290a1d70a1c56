//! Release state machine for the main navigation bar
//!
//! The state is derived from geometry on every tick and never patched
//! incrementally. Effects are written unconditionally each tick, so applying
//! the same state twice is a no-op for the page.

use serde::Serialize;

use crate::config::NavigationHeights;
use crate::geometry::{GeometryProvider, PageSurface, Rect};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavPhase {
    /// Main nav visible at its normal position
    #[default]
    Docked,
    /// Main nav hidden after the hero or a sticky bar reached the top
    Released,
}

impl NavPhase {
    #[inline]
    pub fn is_released(&self) -> bool {
        matches!(self, NavPhase::Released)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseState {
    pub phase: NavPhase,
    /// Document index of the active sticky bar; always `None` while docked
    pub active_bar: Option<usize>,
}

impl ReleaseState {
    pub fn docked() -> Self {
        Self::default()
    }

    pub fn released(active_bar: Option<usize>) -> Self {
        Self {
            phase: NavPhase::Released,
            active_bar,
        }
    }
}

/// Index of the sticky bar straddling the viewport top.
///
/// When several qualify the last one in document order wins.
pub fn active_sticky_bar(bars: &[Rect]) -> Option<usize> {
    bars.iter().rposition(Rect::straddles_viewport_top)
}

/// Absolute document Y at which scrolling releases the nav.
///
/// That is the offset where the hero's last pixel row passes the viewport
/// top. No hero means the nav is never released by scrolling alone.
pub fn hero_release_threshold(scroll_y: f64, hero: Option<Rect>) -> f64 {
    match hero {
        Some(rect) => rect.document_top(scroll_y) + rect.height() - 1.0,
        None => f64::INFINITY,
    }
}

#[derive(Debug, Clone)]
pub struct ReleaseStateMachine {
    heights: NavigationHeights,
    hero_threshold: f64,
    state: ReleaseState,
}

impl ReleaseStateMachine {
    pub fn new(heights: NavigationHeights) -> Self {
        Self {
            heights,
            hero_threshold: f64::INFINITY,
            state: ReleaseState::docked(),
        }
    }

    pub fn state(&self) -> ReleaseState {
        self.state
    }

    pub fn hero_threshold(&self) -> f64 {
        self.hero_threshold
    }

    /// Recompute the hero threshold; call on load, hero image load and resize
    pub fn update_hero_threshold(&mut self, scroll_y: f64, hero: Option<Rect>) {
        let threshold = hero_release_threshold(scroll_y, hero);
        if threshold != self.hero_threshold {
            tracing::debug!(threshold, "Hero release threshold updated");
        }
        self.hero_threshold = threshold;
    }

    /// Released once the hero is scrolled past or any bar touches the docked nav
    pub fn should_release(&self, scroll_y: f64, bars: &[Rect]) -> bool {
        if scroll_y >= self.hero_threshold {
            return true;
        }
        let nav_height = f64::from(self.heights.nav_height);
        bars.iter().any(|r| r.top <= nav_height)
    }

    /// Derive the state for the given geometry without storing it
    pub fn evaluate(&self, scroll_y: f64, bars: &[Rect]) -> ReleaseState {
        if self.should_release(scroll_y, bars) {
            ReleaseState::released(active_sticky_bar(bars))
        } else {
            ReleaseState::docked()
        }
    }

    /// Derive and store the state for the given geometry
    pub fn recompute(&mut self, scroll_y: f64, bars: &[Rect]) -> ReleaseState {
        let next = self.evaluate(scroll_y, bars);
        if next.phase != self.state.phase {
            tracing::debug!(
                from = ?self.state.phase,
                to = ?next.phase,
                scroll_y,
                "Navigation release changed"
            );
        }
        if next.active_bar != self.state.active_bar {
            tracing::debug!(active_bar = ?next.active_bar, "Active sticky bar changed");
        }
        self.state = next;
        next
    }

    /// Write the current state to the page
    pub fn apply<S: PageSurface + ?Sized>(&self, surface: &mut S) {
        let released = self.state.phase.is_released();
        surface.set_released(released);
        surface.set_scroll_padding_top(if released {
            self.heights.subnav_height
        } else {
            self.heights.nav_height
        });
        surface.set_active_sticky_bar(self.state.active_bar);
    }

    /// One scroll tick: read geometry, recompute, apply
    pub fn tick<H>(&mut self, host: &mut H) -> ReleaseState
    where
        H: GeometryProvider + PageSurface + ?Sized,
    {
        let bars = host.sticky_bar_rects();
        let state = self.recompute(host.scroll_y(), &bars);
        self.apply(host);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_with_hero_bottom(bottom: f64) -> ReleaseStateMachine {
        let mut machine = ReleaseStateMachine::new(NavigationHeights::new(60, 60));
        machine.update_hero_threshold(0.0, Some(Rect::new(0.0, bottom)));
        machine
    }

    #[test]
    fn test_initial_state_is_docked() {
        let machine = ReleaseStateMachine::new(NavigationHeights::default());
        assert_eq!(machine.state(), ReleaseState::docked());
        assert!(machine.hero_threshold().is_infinite());
    }

    #[test]
    fn test_hero_threshold_uses_document_position() {
        let mut machine = ReleaseStateMachine::new(NavigationHeights::default());
        machine.update_hero_threshold(300.0, Some(Rect::new(-300.0, 500.0)));
        assert_eq!(machine.hero_threshold(), 799.0);
    }

    #[test]
    fn test_release_past_hero() {
        let mut machine = machine_with_hero_bottom(800.0);
        assert_eq!(machine.recompute(0.0, &[]).phase, NavPhase::Docked);
        assert_eq!(machine.recompute(850.0, &[]), ReleaseState::released(None));
    }

    #[test]
    fn test_release_is_not_hysteretic() {
        let mut machine = machine_with_hero_bottom(800.0);
        machine.recompute(900.0, &[]);
        assert_eq!(machine.state().phase, NavPhase::Released);
        machine.recompute(100.0, &[Rect::new(500.0, 560.0)]);
        assert_eq!(machine.state(), ReleaseState::docked());
    }

    #[test]
    fn test_sticky_bar_overlap_releases() {
        let mut machine = ReleaseStateMachine::new(NavigationHeights::new(60, 60));
        assert_eq!(machine.recompute(0.0, &[Rect::new(61.0, 121.0)]).phase, NavPhase::Docked);
        let state = machine.recompute(0.0, &[Rect::new(60.0, 120.0)]);
        assert_eq!(state, ReleaseState::released(None));
    }

    #[test]
    fn test_past_hero_releases_regardless_of_bars() {
        let mut machine = machine_with_hero_bottom(800.0);
        let state = machine.recompute(850.0, &[Rect::new(400.0, 460.0)]);
        assert_eq!(state.phase, NavPhase::Released);
    }

    #[test]
    fn test_last_straddling_bar_wins() {
        let bars = [
            Rect::new(-5.0, 55.0),
            Rect::new(300.0, 360.0),
            Rect::new(0.0, 60.0),
        ];
        assert_eq!(active_sticky_bar(&bars), Some(2));
        assert_eq!(active_sticky_bar(&bars[..2]), Some(0));
        assert_eq!(active_sticky_bar(&[]), None);
    }

    #[test]
    fn test_no_hero_no_bars_stays_docked() {
        let mut machine = ReleaseStateMachine::new(NavigationHeights::default());
        machine.update_hero_threshold(0.0, None);
        assert_eq!(machine.recompute(1_000_000.0, &[]), ReleaseState::docked());
    }
}
