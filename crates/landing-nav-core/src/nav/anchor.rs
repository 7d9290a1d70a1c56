//! In-page anchor activation
//!
//! Replaces the browser's jump-to-fragment with an offset, animated scroll.
//! The host calls [`AnchorScrollController::activate`] from its click handler
//! and suppresses default navigation only when the outcome asks for it.

use crate::geometry::{GeometryProvider, PageSurface};
use crate::scroll::{AnimateOutcome, ScrollAnimator, ScrollSettings};

use super::offset::OffsetResolver;
use super::release::NavPhase;

#[derive(Debug, Clone, PartialEq)]
pub enum AnchorOutcome {
    /// The href is not an in-page fragment; leave the click alone
    Ignored,
    /// No element carries the fragment id; leave the click alone
    TargetMissing { id: String },
    /// Default navigation must be suppressed; the page is scrolling to `target_y`
    Scrolling {
        id: String,
        target_y: f64,
        animation: AnimateOutcome,
    },
}

impl AnchorOutcome {
    /// Whether the host should call `preventDefault` on the click
    pub fn prevents_default(&self) -> bool {
        matches!(self, AnchorOutcome::Scrolling { .. })
    }
}

/// Extract the element id from an in-page href such as `#pricing`
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll target for an element whose top sits at `element_top` in the document
#[inline]
pub fn anchor_target_y(element_top: f64, offset: u32, nudge: i32) -> f64 {
    element_top - f64::from(offset) + f64::from(nudge)
}

#[derive(Debug, Clone)]
pub struct AnchorScrollController {
    settings: ScrollSettings,
}

impl AnchorScrollController {
    pub fn new(settings: ScrollSettings) -> Self {
        Self { settings }
    }

    pub fn activate<H>(
        &self,
        href: &str,
        phase: NavPhase,
        offsets: &OffsetResolver,
        animator: &mut ScrollAnimator,
        host: &mut H,
    ) -> AnchorOutcome
    where
        H: GeometryProvider + PageSurface + ?Sized,
    {
        let Some(id) = fragment_id(href) else {
            return AnchorOutcome::Ignored;
        };
        let Some(rect) = host.element_rect(id) else {
            tracing::debug!(id, "Anchor target not found, leaving default navigation");
            return AnchorOutcome::TargetMissing { id: id.to_string() };
        };

        let element_top = rect.document_top(host.scroll_y());
        let offset = offsets.resolve(phase, &host.sticky_bar_rects());
        let target_y = anchor_target_y(element_top, offset, self.settings.anchor_nudge_px);
        tracing::debug!(id, element_top, offset, target_y, "Anchor activated");

        let animation = animator.animate_host(host, target_y, &self.settings);
        AnchorOutcome::Scrolling {
            id: id.to_string(),
            target_y,
            animation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_id() {
        assert_eq!(fragment_id("#pricing"), Some("pricing"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id(""), None);
        assert_eq!(fragment_id("/about#team"), None);
        assert_eq!(fragment_id("https://example.com"), None);
    }

    #[test]
    fn test_anchor_target_y() {
        assert_eq!(anchor_target_y(1000.0, 60, 1), 941.0);
        assert_eq!(anchor_target_y(1000.0, 0, 1), 1001.0);
        assert_eq!(anchor_target_y(500.0, 48, 0), 452.0);
    }

    #[test]
    fn test_prevents_default_only_when_scrolling() {
        assert!(!AnchorOutcome::Ignored.prevents_default());
        assert!(!AnchorOutcome::TargetMissing { id: "x".into() }.prevents_default());
        let scrolling = AnchorOutcome::Scrolling {
            id: "x".into(),
            target_y: 10.0,
            animation: AnimateOutcome::Jumped { y: 10.0 },
        };
        assert!(scrolling.prevents_default());
    }
}
