//! Evasive "No" button
//!
//! Every click bumps the counter and shows a taunt while the button jumps to
//! a random spot inside its container. At the surrender threshold the button
//! disappears for good and the terminal message is shown instead.

use glam::Vec2;
use rand::Rng;

use super::layout::LayoutProvider;
use crate::consts::*;

/// Default taunts, one picked per click
pub const DEFAULT_TAUNTS: [&str; 4] = [
    "haha you can't catch me \u{1F923}\u{1FAF5}",
    "nope, not this time \u{274C}",
    "no?! \u{1F635}",
    "seriously? \u{1F494}",
];

/// Shown once the button gives up
pub const DEFAULT_SURRENDER_MESSAGE: &str = "say yes \u{1F920}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPhase {
    /// Visible and dodging clicks
    Active,
    /// Removed from the page (absorbing)
    Terminal,
}

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// New taunt, button moved to the given top-left position
    Moved(Vec2),
    /// New taunt, container not measured so the button stayed put
    Taunted,
    /// Threshold reached; button is gone
    Surrendered,
    /// Click arrived after surrender
    Ignored,
}

/// Per-view button state
#[derive(Debug, Clone)]
pub struct EvasiveButton {
    clicks: u32,
    /// Top-left inside the container; `None` keeps the initial CSS placement
    position: Option<Vec2>,
    message: String,
    taunts: Vec<String>,
    surrender_message: String,
    threshold: u32,
    /// Button footprint used to keep it inside the container
    size: Vec2,
}

impl Default for EvasiveButton {
    fn default() -> Self {
        Self::new(
            DEFAULT_TAUNTS.iter().map(|t| t.to_string()).collect(),
            DEFAULT_SURRENDER_MESSAGE,
            SURRENDER_THRESHOLD,
        )
    }
}

impl EvasiveButton {
    /// Fresh button; `taunts` must be non-empty (checked by settings validation)
    pub fn new(taunts: Vec<String>, surrender_message: impl Into<String>, threshold: u32) -> Self {
        Self {
            clicks: 0,
            position: None,
            message: String::new(),
            taunts,
            surrender_message: surrender_message.into(),
            threshold,
            size: Vec2::new(BUTTON_WIDTH, BUTTON_HEIGHT),
        }
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Current message, empty before the first click
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phase(&self) -> ButtonPhase {
        if self.clicks >= self.threshold {
            ButtonPhase::Terminal
        } else {
            ButtonPhase::Active
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase() == ButtonPhase::Terminal
    }

    /// Whether the button should still be rendered
    pub fn is_visible(&self) -> bool {
        !self.is_terminal()
    }

    /// Handle one click
    pub fn on_click<L, R>(&mut self, layout: &L, rng: &mut R) -> ClickOutcome
    where
        L: LayoutProvider + ?Sized,
        R: Rng + ?Sized,
    {
        if self.is_terminal() {
            return ClickOutcome::Ignored;
        }

        self.clicks += 1;
        if self.is_terminal() {
            self.message = self.surrender_message.clone();
            log::info!("No button gave up after {} clicks", self.clicks);
            return ClickOutcome::Surrendered;
        }

        if !self.taunts.is_empty() {
            let pick = rng.random_range(0..self.taunts.len());
            self.message = self.taunts[pick].clone();
        }

        match layout.container_size() {
            Some(container) => {
                let pos = self.random_position(container, rng);
                self.position = Some(pos);
                log::debug!("No button click {} -> ({:.0}, {:.0})", self.clicks, pos.x, pos.y);
                ClickOutcome::Moved(pos)
            }
            None => {
                log::debug!("No button click {}: container not measured", self.clicks);
                ClickOutcome::Taunted
            }
        }
    }

    /// Uniform top-left in `[0, W - w] x [0, H - h]`, collapsed to 0 when the
    /// container is smaller than the button on an axis
    fn random_position<R: Rng + ?Sized>(&self, container: Vec2, rng: &mut R) -> Vec2 {
        let span = (container - self.size).max(Vec2::ZERO);
        Vec2::new(rng.random::<f32>() * span.x, rng.random::<f32>() * span.y)
    }
}
