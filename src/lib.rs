//! Valentine Invite - a two-page invitation with an evasive "No" button
//!
//! Core modules:
//! - `scene`: Host-independent logic (decoration placement, button evasion)
//! - `settings`: Page copy, decoration catalog and calendar event
//! - `calendar`: Calendar "add event" link construction
//! - `routes`: Path to view mapping
//! - `audio`: Background music (browser only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod calendar;
pub mod routes;
pub mod scene;
pub mod settings;

pub use calendar::CalendarEvent;
pub use routes::Route;
pub use settings::{Settings, SettingsError};

/// Layout constants
pub mod consts {
    /// Inset of each quadrant from the viewport edges and midlines
    pub const QUADRANT_MARGIN: f32 = 40.0;
    /// Extra spacing kept around decorations of the same category
    pub const SAME_CATEGORY_CLEARANCE: f32 = 40.0;
    /// Random draws per decoration before falling back
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

    /// Evasive button footprint
    pub const BUTTON_WIDTH: f32 = 120.0;
    pub const BUTTON_HEIGHT: f32 = 45.0;
    /// Clicks after which the button gives up
    pub const SURRENDER_THRESHOLD: u32 = 10;
}
