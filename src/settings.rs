//! Page settings
//!
//! Copy, decoration catalog, No-button behaviour and the calendar event.
//! Defaults reproduce the stock invitation; a page can override any field
//! with a JSON document in `<script id="invite-config" type="application/json">`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::CalendarEvent;
use crate::consts::SURRENDER_THRESHOLD;
use crate::scene::evasion::{DEFAULT_SURRENDER_MESSAGE, DEFAULT_TAUNTS};
use crate::scene::{DecorationSpec, EvasiveButton};

/// Why a settings document was rejected
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("decoration catalog is empty")]
    EmptyCatalog,
    #[error("decoration '{category}' has zero count")]
    ZeroCount { category: String },
    #[error("decoration '{category}' has non-positive size {size}")]
    BadSize { category: String, size: f32 },
    #[error("no-button taunt list is empty")]
    NoTaunts,
    #[error("surrender threshold must be at least 1")]
    ZeroThreshold,
    #[error("calendar event ends before it starts")]
    EventEndsBeforeStart,
}

/// Everything the two pages display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Landing page ===
    pub title: String,
    pub subtitle: String,
    pub yes_label: String,
    pub no_label: String,

    // === No button ===
    /// One is picked at random per click
    pub taunts: Vec<String>,
    pub surrender_message: String,
    /// Clicks before the No button disappears
    pub surrender_after: u32,

    // === Invite page ===
    pub invite_title: String,
    pub invite_description: String,
    pub accept_label: String,
    pub event: CalendarEvent,

    // === Decorations ===
    pub decorations: Vec<DecorationSpec>,

    // === Audio ===
    /// Looping background track; `None` disables music
    pub music_src: Option<String>,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "will you be my Valentine?".to_string(),
            subtitle: "let's not go solo \u{1F469}\u{1F3FC}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FB}"
                .to_string(),
            yes_label: "Yes \u{1F496}".to_string(),
            no_label: "No".to_string(),

            taunts: DEFAULT_TAUNTS.iter().map(|t| t.to_string()).collect(),
            surrender_message: DEFAULT_SURRENDER_MESSAGE.to_string(),
            surrender_after: SURRENDER_THRESHOLD,

            invite_title: "hey, sexy. let's hang \u{1F970}".to_string(),
            invite_description: "good food, good music, and even better company.".to_string(),
            accept_label: "accept \u{1F48C}".to_string(),
            event: CalendarEvent::default(),

            decorations: DecorationSpec::default_catalog(),

            music_src: Some("/music.mp3".to_string()),
            music_volume: 1.0,
        }
    }
}

impl Settings {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.decorations.is_empty() {
            return Err(SettingsError::EmptyCatalog);
        }
        for spec in &self.decorations {
            if spec.count == 0 {
                return Err(SettingsError::ZeroCount {
                    category: spec.category.clone(),
                });
            }
            if !(spec.size > 0.0) {
                return Err(SettingsError::BadSize {
                    category: spec.category.clone(),
                    size: spec.size,
                });
            }
        }
        if self.taunts.is_empty() {
            return Err(SettingsError::NoTaunts);
        }
        if self.surrender_after == 0 {
            return Err(SettingsError::ZeroThreshold);
        }
        if self.event.end < self.event.start {
            return Err(SettingsError::EventEndsBeforeStart);
        }
        Ok(())
    }

    /// Fresh No-button state for a landing view
    pub fn evasive_button(&self) -> EvasiveButton {
        EvasiveButton::new(
            self.taunts.clone(),
            self.surrender_message.clone(),
            self.surrender_after,
        )
    }

    /// Effective music volume
    pub fn effective_music_volume(&self) -> f64 {
        self.music_volume.clamp(0.0, 1.0) as f64
    }

    /// Element holding the JSON override
    #[cfg(target_arch = "wasm32")]
    const CONFIG_ELEMENT_ID: &'static str = "invite-config";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::CONFIG_ELEMENT_ID);
                    return settings;
                }
                Err(e) => log::warn!("Ignoring page settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
