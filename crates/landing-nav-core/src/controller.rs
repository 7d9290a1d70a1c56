//! Page-level glue
//!
//! [`PageController`] owns everything the page needs for its session: the
//! configuration context, the release state machine and the scroll animator.
//! Hosts forward their events to it and implement the geometry traits.

use crate::config::{NavigationHeights, PageConfig};
use crate::geometry::{GeometryProvider, PageSurface};
use crate::nav::{
    AnchorOutcome, AnchorScrollController, OffsetResolver, ReleaseState, ReleaseStateMachine,
};
use crate::scroll::{AnimateOutcome, AnimationToken, FrameOutcome, ScrollAnimator};

/// Read-only context built once at page load
#[derive(Debug, Clone)]
pub struct PageContext {
    pub config: PageConfig,
    pub heights: NavigationHeights,
}

impl PageContext {
    pub fn new(config: PageConfig, heights: NavigationHeights) -> Self {
        Self { config, heights }
    }

    /// Resolve heights from the page's custom properties
    pub fn from_vars<F>(config: PageConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let heights = NavigationHeights::from_vars(&config.nav, lookup);
        Self { config, heights }
    }
}

#[derive(Debug, Clone)]
pub struct PageController {
    context: PageContext,
    release: ReleaseStateMachine,
    offsets: OffsetResolver,
    anchors: AnchorScrollController,
    animator: ScrollAnimator,
}

impl PageController {
    pub fn new(context: PageContext) -> Self {
        let anchors = AnchorScrollController::new(context.config.scroll.clone());
        Self {
            release: ReleaseStateMachine::new(context.heights),
            offsets: OffsetResolver::new(context.heights),
            anchors,
            animator: ScrollAnimator::new(),
            context,
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    pub fn state(&self) -> ReleaseState {
        self.release.state()
    }

    pub fn hero_threshold(&self) -> f64 {
        self.release.hero_threshold()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Page load: measure the hero, then run a first tick
    pub fn init<H>(&mut self, host: &mut H) -> ReleaseState
    where
        H: GeometryProvider + PageSurface + ?Sized,
    {
        tracing::debug!(
            nav_height = self.context.heights.nav_height,
            subnav_height = self.context.heights.subnav_height,
            "Initializing page controller"
        );
        self.refresh_layout(host)
    }

    pub fn on_scroll<H>(&mut self, host: &mut H) -> ReleaseState
    where
        H: GeometryProvider + PageSurface + ?Sized,
    {
        self.release.tick(host)
    }

    pub fn on_resize<H>(&mut self, host: &mut H) -> ReleaseState
    where
        H: GeometryProvider + PageSurface + ?Sized,
    {
        self.refresh_layout(host)
    }

    /// The hero image finished loading after init, so its height changed
    pub fn on_hero_loaded<H>(&mut self, host: &mut H) -> ReleaseState
    where
        H: GeometryProvider + PageSurface + ?Sized,
    {
        self.refresh_layout(host)
    }

    fn refresh_layout<H>(&mut self, host: &mut H) -> ReleaseState
    where
        H: GeometryProvider + PageSurface + ?Sized,
    {
        self.release.update_hero_threshold(host.scroll_y(), host.hero_rect());
        self.release.tick(host)
    }

    /// Offset an anchor scroll would use right now
    pub fn current_offset<H: GeometryProvider + ?Sized>(&self, host: &H) -> u32 {
        self.offsets
            .resolve(self.release.state().phase, &host.sticky_bar_rects())
    }

    pub fn on_anchor_activated<H>(&mut self, href: &str, host: &mut H) -> AnchorOutcome
    where
        H: GeometryProvider + PageSurface + ?Sized,
    {
        let phase = self.release.state().phase;
        self.anchors
            .activate(href, phase, &self.offsets, &mut self.animator, host)
    }

    /// Scroll to an absolute offset with the configured duration
    pub fn scroll_to<H>(&mut self, target_y: f64, host: &mut H) -> AnimateOutcome
    where
        H: GeometryProvider + PageSurface + ?Sized,
    {
        self.animator
            .animate_host(host, target_y, &self.context.config.scroll)
    }

    pub fn on_animation_frame<H>(&mut self, token: AnimationToken, host: &mut H) -> FrameOutcome
    where
        H: GeometryProvider + PageSurface + ?Sized,
    {
        self.animator.frame_host(host, token)
    }
}
