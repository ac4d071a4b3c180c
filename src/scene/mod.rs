//! Host-independent page logic
//!
//! Nothing in here touches the DOM:
//! - Randomness is injected (`rand::Rng`)
//! - Container sizes come from a `LayoutProvider`
//! - Results are plain values the web layer renders

pub mod evasion;
pub mod layout;
pub mod placement;
pub mod rect;

pub use evasion::{ButtonPhase, ClickOutcome, EvasiveButton};
pub use layout::{FixedLayout, LayoutProvider, Unmeasured};
pub use placement::{
    DecorationSpec, PlacedDecoration, Quadrant, attempt_place, place_decorations, quadrant_bounds,
};
pub use rect::Rect;
