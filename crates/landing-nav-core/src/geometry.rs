//! Host page boundary
//!
//! The controller never reads the page directly. Everything it needs about
//! layout and time comes through [`GeometryProvider`], and everything it
//! changes goes through [`PageSurface`]. Browser hosts, the simulator and
//! test fakes implement both.

use serde::{Deserialize, Serialize};

use crate::scroll::AnimationToken;

/// Vertical extent of an element relative to the viewport top, in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True when the element sits at or straddles the viewport top edge
    #[inline]
    pub fn straddles_viewport_top(&self) -> bool {
        self.top <= 0.0 && self.bottom > 0.0
    }

    /// Absolute document position of the top edge for the given scroll offset
    #[inline]
    pub fn document_top(&self, scroll_y: f64) -> f64 {
        scroll_y + self.top
    }
}

/// Read-only view of the host page
pub trait GeometryProvider {
    /// Current vertical scroll offset
    fn scroll_y(&self) -> f64;

    /// Monotonic clock in milliseconds, same timeline as frame callbacks
    fn now_ms(&self) -> f64;

    /// Whether the user asked for reduced motion
    fn prefers_reduced_motion(&self) -> bool;

    /// Viewport rect of the hero region, `None` when the page has none
    fn hero_rect(&self) -> Option<Rect>;

    /// Viewport rects of every sticky bar, in document order
    fn sticky_bar_rects(&self) -> Vec<Rect>;

    /// Viewport rect of the element with the given id
    fn element_rect(&self, id: &str) -> Option<Rect>;
}

/// Side effects the controller produces on the host page
pub trait PageSurface {
    /// Toggle the released flag on the document root and the off flag on the main nav
    fn set_released(&mut self, released: bool);

    /// Set the root scroll padding so native anchor jumps clear the bars
    fn set_scroll_padding_top(&mut self, px: u32);

    /// Mark exactly one sticky bar (by document index) as active, or none
    fn set_active_sticky_bar(&mut self, index: Option<usize>);

    /// Move the viewport to an absolute vertical offset
    fn scroll_to(&mut self, y: f64);

    /// Ask the host to call back with `token` on its next animation frame
    fn request_animation_frame(&mut self, token: AnimationToken);
}
