//! Decoration placement
//!
//! The viewport is split into four quadrants. Instance `i` of every catalog
//! entry goes to quadrant `i % 4` and is placed by rejection sampling against
//! decorations already in that quadrant. Decorations of the same category keep
//! an extra clearance between them. Quadrants are never checked against each
//! other.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Screen region a decoration is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Round-robin assignment by instance index
    pub fn for_instance(instance: u32) -> Self {
        Self::ALL[(instance % 4) as usize]
    }

    pub fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }

    fn is_right(self) -> bool {
        matches!(self, Quadrant::TopRight | Quadrant::BottomRight)
    }

    fn is_bottom(self) -> bool {
        matches!(self, Quadrant::BottomLeft | Quadrant::BottomRight)
    }
}

/// Catalog entry: how many of one kind of decoration to scatter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationSpec {
    /// Category tag, also used as the CSS class
    pub category: String,
    pub count: u32,
    /// Square footprint side in pixels (rendered as font size)
    pub size: f32,
    pub glyph: String,
}

impl DecorationSpec {
    pub fn new(category: impl Into<String>, count: u32, size: f32, glyph: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            count,
            size,
            glyph: glyph.into(),
        }
    }

    /// Hearts, bows and teddies
    pub fn default_catalog() -> Vec<Self> {
        vec![
            Self::new("heart", 20, 32.0, "\u{2665}"),
            Self::new("arrow", 10, 32.0, "\u{1F3F9}"),
            Self::new("teddy", 10, 48.0, "\u{1F9F8}"),
        ]
    }
}

/// A decoration with its final position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedDecoration {
    /// Unique key: `{category}-{instance}-{attempt}` or `{category}-{instance}-fallback`
    pub id: String,
    pub category: String,
    pub glyph: String,
    pub size: f32,
    /// Top-left corner in viewport coordinates
    pub pos: Vec2,
    /// Index within its catalog entry
    pub instance: u32,
    pub quadrant: Quadrant,
    /// Placed after every attempt collided; may overlap its neighbours
    pub fallback: bool,
}

impl PlacedDecoration {
    pub fn footprint(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// Margin-inset region of a quadrant.
///
/// For tiny viewports the size can go negative; callers sample inside it
/// anyway and get coordinates outside the intended region.
pub fn quadrant_bounds(viewport: Vec2, quadrant: Quadrant) -> Rect {
    let half = viewport / 2.0;
    let m = QUADRANT_MARGIN;
    let min = Vec2::new(
        if quadrant.is_right() { half.x + m } else { m },
        if quadrant.is_bottom() { half.y + m } else { m },
    );
    let max = Vec2::new(
        if quadrant.is_right() { viewport.x - m } else { half.x - m },
        if quadrant.is_bottom() { viewport.y - m } else { half.y - m },
    );
    Rect::new(min, max - min)
}

/// Uniform top-left corner for a `size` square inside `bounds`
fn sample_position<R: Rng + ?Sized>(bounds: &Rect, size: f32, rng: &mut R) -> Vec2 {
    let span = bounds.size - Vec2::splat(size);
    let x = bounds.min.x + rng.random::<f32>() * span.x;
    let y = bounds.min.y + rng.random::<f32>() * span.y;
    Vec2::new(x, y)
}

/// Whether `candidate` hits anything in `existing`.
/// Same-category neighbours are grown by the clearance first.
fn collides(candidate: &Rect, category: &str, existing: &[PlacedDecoration]) -> bool {
    existing.iter().any(|other| {
        let footprint = other.footprint();
        let footprint = if other.category == category {
            footprint.expand(SAME_CATEGORY_CLEARANCE)
        } else {
            footprint
        };
        candidate.overlaps(&footprint)
    })
}

/// Rejection-sample a collision-free position.
///
/// Returns the position and the 1-based attempt that produced it, or `None`
/// once `max_attempts` draws have all collided.
pub fn attempt_place<R: Rng + ?Sized>(
    bounds: &Rect,
    size: f32,
    category: &str,
    existing: &[PlacedDecoration],
    max_attempts: u32,
    rng: &mut R,
) -> Option<(Vec2, u32)> {
    (1..=max_attempts).find_map(|attempt| {
        let pos = sample_position(bounds, size, rng);
        let candidate = Rect::square(pos, size);
        (!collides(&candidate, category, existing)).then_some((pos, attempt))
    })
}

/// Scatter every catalog entry across the viewport.
///
/// Output is quadrant by quadrant (top-left first), each in placement order.
/// Every instance is placed; when sampling is exhausted it lands at one last
/// unchecked draw with `fallback` set.
pub fn place_decorations<R: Rng + ?Sized>(
    viewport_width: f32,
    viewport_height: f32,
    catalog: &[DecorationSpec],
    rng: &mut R,
) -> Vec<PlacedDecoration> {
    let viewport = Vec2::new(viewport_width, viewport_height);
    let mut buckets: [Vec<PlacedDecoration>; 4] = Default::default();
    let mut fallbacks = 0u32;

    for spec in catalog {
        for instance in 0..spec.count {
            let quadrant = Quadrant::for_instance(instance);
            let bounds = quadrant_bounds(viewport, quadrant);
            let bucket = &mut buckets[quadrant.index()];

            let placed = attempt_place(
                &bounds,
                spec.size,
                &spec.category,
                bucket.as_slice(),
                MAX_PLACEMENT_ATTEMPTS,
                rng,
            );
            let (pos, id, fallback) = match placed {
                Some((pos, attempt)) => {
                    (pos, format!("{}-{}-{}", spec.category, instance, attempt), false)
                }
                None => {
                    fallbacks += 1;
                    let pos = sample_position(&bounds, spec.size, rng);
                    (pos, format!("{}-{}-fallback", spec.category, instance), true)
                }
            };

            bucket.push(PlacedDecoration {
                id,
                category: spec.category.clone(),
                glyph: spec.glyph.clone(),
                size: spec.size,
                pos,
                instance,
                quadrant,
                fallback,
            });
        }
    }

    if fallbacks > 0 {
        log::debug!(
            "{} decoration(s) placed without clearance in {}x{} viewport",
            fallbacks,
            viewport_width,
            viewport_height
        );
    }

    buckets.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    const EPS: f32 = 1e-3;

    fn in_bounds(viewport: Vec2, deco: &PlacedDecoration) -> bool {
        let bounds = quadrant_bounds(viewport, deco.quadrant);
        let max = bounds.max() - Vec2::splat(deco.size);
        deco.pos.x >= bounds.min.x - EPS
            && deco.pos.x <= max.x + EPS
            && deco.pos.y >= bounds.min.y - EPS
            && deco.pos.y <= max.y + EPS
    }

    /// Pairs (earlier, later) within the same quadrant, skipping fallbacks
    fn same_quadrant_pairs(
        placed: &[PlacedDecoration],
    ) -> Vec<(&PlacedDecoration, &PlacedDecoration)> {
        let mut pairs = Vec::new();
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                if a.quadrant == b.quadrant && !a.fallback && !b.fallback {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }

    #[test]
    fn test_quadrant_bounds() {
        let viewport = Vec2::new(1280.0, 800.0);

        let tl = quadrant_bounds(viewport, Quadrant::TopLeft);
        assert_eq!(tl.min, Vec2::new(40.0, 40.0));
        assert_eq!(tl.max(), Vec2::new(600.0, 360.0));

        let tr = quadrant_bounds(viewport, Quadrant::TopRight);
        assert_eq!(tr.min, Vec2::new(680.0, 40.0));
        assert_eq!(tr.max(), Vec2::new(1240.0, 360.0));

        let bl = quadrant_bounds(viewport, Quadrant::BottomLeft);
        assert_eq!(bl.min, Vec2::new(40.0, 440.0));
        assert_eq!(bl.max(), Vec2::new(600.0, 760.0));

        let br = quadrant_bounds(viewport, Quadrant::BottomRight);
        assert_eq!(br.min, Vec2::new(680.0, 440.0));
        assert_eq!(br.max(), Vec2::new(1240.0, 760.0));
    }

    #[test]
    fn test_round_robin_quadrants() {
        assert_eq!(Quadrant::for_instance(0), Quadrant::TopLeft);
        assert_eq!(Quadrant::for_instance(1), Quadrant::TopRight);
        assert_eq!(Quadrant::for_instance(2), Quadrant::BottomLeft);
        assert_eq!(Quadrant::for_instance(3), Quadrant::BottomRight);
        assert_eq!(Quadrant::for_instance(4), Quadrant::TopLeft);
        assert_eq!(Quadrant::for_instance(19), Quadrant::BottomRight);
    }

    #[test]
    fn test_attempt_place_empty_quadrant_first_try() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bounds = Rect::new(Vec2::new(40.0, 40.0), Vec2::new(560.0, 320.0));
        let (pos, attempt) =
            attempt_place(&bounds, 32.0, "heart", &[], MAX_PLACEMENT_ATTEMPTS, &mut rng)
                .expect("empty quadrant always accepts the first draw");
        assert_eq!(attempt, 1);
        assert!(bounds.contains_rect(&Rect::square(pos, 32.0)));
    }

    #[test]
    fn test_attempt_place_exhausted() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bounds = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        // One decoration covering the whole region blocks every draw
        let blocker = PlacedDecoration {
            id: "teddy-0-1".into(),
            category: "teddy".into(),
            glyph: "T".into(),
            size: 100.0,
            pos: Vec2::ZERO,
            instance: 0,
            quadrant: Quadrant::TopLeft,
            fallback: false,
        };
        let result = attempt_place(&bounds, 10.0, "heart", &[blocker], 5, &mut rng);
        assert!(result.is_none());
    }

    #[test]
    fn test_same_category_needs_clearance() {
        let mut rng = Pcg32::seed_from_u64(11);
        // Region just big enough for two 10px squares 20px apart, but not with 40px clearance
        let bounds = Rect::new(Vec2::ZERO, Vec2::new(40.0, 10.0));
        let first = PlacedDecoration {
            id: "heart-0-1".into(),
            category: "heart".into(),
            glyph: "H".into(),
            size: 10.0,
            pos: Vec2::ZERO,
            instance: 0,
            quadrant: Quadrant::TopLeft,
            fallback: false,
        };
        let existing = [first];

        let same = attempt_place(&bounds, 10.0, "heart", &existing, 50, &mut rng);
        assert!(same.is_none());

        let other = attempt_place(&bounds, 10.0, "arrow", &existing, 50, &mut rng);
        let (pos, _) = other.expect("different category only needs raw separation");
        assert!(pos.x > 10.0);
    }

    #[test]
    fn test_default_catalog_layout() {
        let mut rng = Pcg32::seed_from_u64(2025);
        let viewport = Vec2::new(1280.0, 800.0);
        let catalog = DecorationSpec::default_catalog();
        let placed = place_decorations(viewport.x, viewport.y, &catalog, &mut rng);

        assert_eq!(placed.len(), 40);
        for deco in &placed {
            assert_eq!(deco.quadrant, Quadrant::for_instance(deco.instance));
            if !deco.fallback {
                assert!(in_bounds(viewport, deco), "{} out of bounds", deco.id);
            }
        }

        // Output grouped by quadrant, top-left first
        let indices: Vec<usize> = placed.iter().map(|d| d.quadrant.index()).collect();
        let mut sorted = indices.clone();
        sorted.sort();
        assert_eq!(indices, sorted);
    }

    #[test]
    fn test_ids_unique_and_tagged() {
        let mut rng = Pcg32::seed_from_u64(99);
        let placed =
            place_decorations(1920.0, 1080.0, &DecorationSpec::default_catalog(), &mut rng);
        let mut ids: Vec<&str> = placed.iter().map(|d| d.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), placed.len());

        for deco in &placed {
            let prefix = format!("{}-{}-", deco.category, deco.instance);
            assert!(deco.id.starts_with(&prefix));
            assert_eq!(deco.id.ends_with("-fallback"), deco.fallback);
        }
    }

    #[test]
    fn test_tiny_viewport_still_places_everything() {
        let mut rng = Pcg32::seed_from_u64(3);
        let placed = place_decorations(100.0, 80.0, &DecorationSpec::default_catalog(), &mut rng);
        assert_eq!(placed.len(), 40);
        assert!(placed.iter().all(|d| d.pos.is_finite()));
    }

    #[test]
    fn test_crowded_quadrant_falls_back() {
        let mut rng = Pcg32::seed_from_u64(5);
        let catalog = vec![DecorationSpec::new("heart", 40, 32.0, "H")];
        // 10 hearts per quadrant in a 140x140 region cannot keep 40px clearance
        let placed = place_decorations(440.0, 440.0, &catalog, &mut rng);
        assert_eq!(placed.len(), 40);
        assert!(placed.iter().any(|d| d.fallback));
    }

    #[test]
    fn test_same_inputs_same_assignment() {
        let catalog = DecorationSpec::default_catalog();
        let mut rng_a = Pcg32::seed_from_u64(1);
        let mut rng_b = Pcg32::seed_from_u64(2);
        let a = place_decorations(1280.0, 800.0, &catalog, &mut rng_a);
        let b = place_decorations(1280.0, 800.0, &catalog, &mut rng_b);

        let key = |d: &PlacedDecoration| (d.category.clone(), d.instance, d.quadrant);
        let mut keys_a: Vec<_> = a.iter().map(key).collect();
        let mut keys_b: Vec<_> = b.iter().map(key).collect();
        keys_a.sort_by(|x, y| (&x.0, x.1).cmp(&(&y.0, y.1)));
        keys_b.sort_by(|x, y| (&x.0, x.1).cmp(&(&y.0, y.1)));
        assert_eq!(keys_a, keys_b);

        let counts = |placed: &[PlacedDecoration]| {
            let mut counts: HashMap<String, u32> = HashMap::new();
            for d in placed {
                *counts.entry(d.category.clone()).or_default() += 1;
            }
            counts
        };
        assert_eq!(counts(&a), counts(&b));
        assert_eq!(counts(&a)["heart"], 20);
    }

    proptest! {
        #[test]
        fn placement_invariants_hold(
            width in 600.0f32..2560.0,
            height in 500.0f32..1440.0,
            seed in any::<u64>(),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let viewport = Vec2::new(width, height);
            let catalog = DecorationSpec::default_catalog();
            let placed = place_decorations(width, height, &catalog, &mut rng);

            let expected: u32 = catalog.iter().map(|s| s.count).sum();
            prop_assert_eq!(placed.len() as u32, expected);

            for deco in placed.iter().filter(|d| !d.fallback) {
                prop_assert!(in_bounds(viewport, deco), "{} out of bounds", deco.id);
            }

            for (a, b) in same_quadrant_pairs(&placed) {
                if a.category == b.category {
                    let grown = a.footprint().expand(SAME_CATEGORY_CLEARANCE);
                    prop_assert!(!grown.overlaps(&b.footprint()), "{} crowds {}", b.id, a.id);
                } else {
                    prop_assert!(!a.footprint().overlaps(&b.footprint()), "{} hits {}", b.id, a.id);
                }
            }
        }
    }
}
