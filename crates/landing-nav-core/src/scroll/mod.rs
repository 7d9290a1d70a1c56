//! Anchor scrolling for the landing page
//!
//! Linear, duration-based scrolling to an absolute offset, with an instant
//! jump when the host prefers reduced motion.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `timing` - Time calculation utilities (progress, interpolation)
//! - `config` - Scroll settings and derived durations
//!
//! ## L3 Molecular Layer
//! - `animation` - Token-based animation controller combining atoms
//!
//! # Usage
//!
//! ```ignore
//! use landing_nav_core::scroll::{FrameOutcome, ScrollAnimator, ScrollSettings};
//!
//! let mut animator = ScrollAnimator::new();
//! animator.animate_host(&mut host, 941.0, &ScrollSettings::default());
//!
//! // On each host animation frame carrying `token`:
//! animator.frame_host(&mut host, token);
//! ```

// L4 Atomic Layer
pub mod config;
pub mod timing;

// L3 Molecular Layer
pub mod animation;

// Re-exports for convenient access
pub use animation::{AnimateOutcome, AnimationToken, FrameOutcome, ScrollAnimator};
pub use config::{ScrollSettings, ScrollSettingsExt};
