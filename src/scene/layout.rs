//! Layout measurements supplied by the rendering host

use glam::Vec2;

/// Source of the evasive button's container size.
///
/// The browser implementation measures the card element on every call;
/// `None` means the container has not been laid out yet.
pub trait LayoutProvider {
    fn container_size(&self) -> Option<Vec2>;
}

/// Container with a known, fixed size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLayout(pub Vec2);

impl FixedLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self(Vec2::new(width, height))
    }
}

impl LayoutProvider for FixedLayout {
    fn container_size(&self) -> Option<Vec2> {
        Some(self.0)
    }
}

/// Container that has not been rendered
#[derive(Debug, Clone, Copy, Default)]
pub struct Unmeasured;

impl LayoutProvider for Unmeasured {
    fn container_size(&self) -> Option<Vec2> {
        None
    }
}
