pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod nav;
pub mod scroll;
pub mod sim;

pub use config::{read_px_var, NavigationHeights, PageConfig, ScrollSettings};
pub use controller::{PageContext, PageController};
pub use error::{Error, Result};
pub use geometry::{GeometryProvider, PageSurface, Rect};
pub use nav::{AnchorOutcome, NavPhase, ReleaseState};
pub use scroll::{AnimateOutcome, AnimationToken, FrameOutcome};
