//! L3 Molecular Layer: Scroll animation controller
//!
//! Linear, time-based scrolling toward an absolute target. Each `animate`
//! call issues a fresh [`AnimationToken`]; frames carrying an older token are
//! dropped, so a new anchor click cleanly supersedes the one in flight.

use std::time::Duration;

use crate::geometry::{GeometryProvider, PageSurface};

use super::config::{ScrollSettings, ScrollSettingsExt};
use super::timing::{is_complete, lerp, progress};

/// Generation id of one animation; frames are scheduled with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationToken(u64);

impl AnimationToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    token: AnimationToken,
    /// Host timestamp when the animation started
    start_ms: f64,
    /// Scroll offset sampled when the animation started
    from: f64,
    /// Target scroll offset
    to: f64,
    duration: Duration,
}

/// What `animate` decided to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimateOutcome {
    /// Reduced motion or zero duration: moved straight to `y`, no frames
    Jumped { y: f64 },
    /// Frames should be scheduled with `token`
    Started { token: AnimationToken, from: f64, to: f64 },
}

/// Result of advancing one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Scroll to `y` and schedule another frame
    Continue { y: f64 },
    /// Scroll to `y`; the animation is over
    Finished { y: f64 },
    /// The frame belongs to an animation that was replaced or cancelled
    Superseded,
}

impl FrameOutcome {
    pub fn position(&self) -> Option<f64> {
        match self {
            FrameOutcome::Continue { y } | FrameOutcome::Finished { y } => Some(*y),
            FrameOutcome::Superseded => None,
        }
    }
}

/// Scroll animation controller
///
/// Call `animate()` to begin, then `frame()` with the token on every host
/// frame until it reports `Finished`.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    generation: u64,
}

impl ScrollAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Token of the animation that currently owns the scroll position
    pub fn current_token(&self) -> Option<AnimationToken> {
        self.animation.as_ref().map(|a| a.token)
    }

    /// Target of the active animation, if any
    pub fn target(&self) -> Option<f64> {
        self.animation.as_ref().map(|a| a.to)
    }

    fn next_token(&mut self) -> AnimationToken {
        self.generation += 1;
        AnimationToken(self.generation)
    }

    /// Start moving from `start_y` to `target_y`, or jump there when `jump` is set.
    ///
    /// Any animation in flight is superseded, including when this call jumps.
    pub fn animate(
        &mut self,
        start_y: f64,
        target_y: f64,
        duration: Duration,
        now_ms: f64,
        jump: bool,
    ) -> AnimateOutcome {
        let token = self.next_token();
        if let Some(previous) = self.animation.take() {
            tracing::debug!(
                previous = previous.token.generation(),
                next = token.generation(),
                "Superseding in-flight scroll animation"
            );
        }

        if jump {
            tracing::debug!(target_y, "Jumping to scroll target");
            return AnimateOutcome::Jumped { y: target_y };
        }

        tracing::debug!(
            token = token.generation(),
            from = start_y,
            to = target_y,
            duration_ms = duration.as_millis() as u64,
            "Starting scroll animation"
        );
        self.animation = Some(ActiveAnimation {
            token,
            start_ms: now_ms,
            from: start_y,
            to: target_y,
            duration,
        });
        AnimateOutcome::Started {
            token,
            from: start_y,
            to: target_y,
        }
    }

    /// Advance the animation owning `token` to `now_ms`
    pub fn frame(&mut self, token: AnimationToken, now_ms: f64) -> FrameOutcome {
        let Some(anim) = self.animation.as_ref().filter(|a| a.token == token) else {
            tracing::trace!(token = token.generation(), "Dropping stale animation frame");
            return FrameOutcome::Superseded;
        };

        let p = progress(anim.start_ms, now_ms, anim.duration);
        let y = lerp(anim.from, anim.to, p);
        if is_complete(anim.start_ms, now_ms, anim.duration) {
            tracing::debug!(token = token.generation(), y, "Scroll animation finished");
            self.animation = None;
            FrameOutcome::Finished { y }
        } else {
            tracing::trace!(token = token.generation(), progress = p, y, "Scroll animation frame");
            FrameOutcome::Continue { y }
        }
    }

    /// Start an animation against a live host.
    ///
    /// Samples the start offset, clock and motion preference from `host`, then
    /// either writes the final offset at once or schedules the first frame.
    pub fn animate_host<H>(
        &mut self,
        host: &mut H,
        target_y: f64,
        settings: &ScrollSettings,
    ) -> AnimateOutcome
    where
        H: GeometryProvider + PageSurface + ?Sized,
    {
        let jump = settings.should_jump(host.prefers_reduced_motion());
        let outcome = self.animate(
            host.scroll_y(),
            target_y,
            settings.animation_duration(),
            host.now_ms(),
            jump,
        );
        match outcome {
            AnimateOutcome::Jumped { y } => host.scroll_to(y),
            AnimateOutcome::Started { token, .. } => host.request_animation_frame(token),
        }
        outcome
    }

    /// Run one host frame: write the position and reschedule while unfinished
    pub fn frame_host<H>(&mut self, host: &mut H, token: AnimationToken) -> FrameOutcome
    where
        H: GeometryProvider + PageSurface + ?Sized,
    {
        let outcome = self.frame(token, host.now_ms());
        match outcome {
            FrameOutcome::Continue { y } => {
                host.scroll_to(y);
                host.request_animation_frame(token);
            }
            FrameOutcome::Finished { y } => host.scroll_to(y),
            FrameOutcome::Superseded => {}
        }
        outcome
    }
}
