pub mod anchor;
pub mod offset;
pub mod release;

pub use anchor::{anchor_target_y, fragment_id, AnchorOutcome, AnchorScrollController};
pub use offset::OffsetResolver;
pub use release::{
    active_sticky_bar, hero_release_threshold, NavPhase, ReleaseState, ReleaseStateMachine,
};
