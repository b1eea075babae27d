use alloc::vec::Vec;

use crate::types::abs;
use crate::{DragDirection, PresentationSize, SizeResolver};

/// Weight applied to candidates that lie in the direction of the finished drag.
///
/// Candidates behind the release point weigh `1.0`, so a snap ahead of the motion wins unless it
/// is more than four times as far away.
pub const SNAP_DIRECTION_WEIGHT: f32 = 0.25;

/// A resting origin and the preferred size that produced it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapPoint {
    pub origin: f32,
    pub height: f32,
    pub size: PresentationSize,
}

/// The valid resting positions for one layout pass, plus the derived bounds.
///
/// Points keep the caller-given order of preferred sizes; the first one is the default origin of a
/// fresh presentation. Sizes resolving to an already-seen height are dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapPointSet {
    points: Vec<SnapPoint>,
    smallest_origin: f32,
    largest_origin: f32,
    dismissable_origin: f32,
    max_possible_origin: f32,
    min_possible_origin: f32,
}

impl SnapPointSet {
    /// Resolves `preferred` and derives the snap set.
    ///
    /// An empty `preferred` list behaves like `[IntrinsicHeight]`. `measure_content` is called at
    /// most once per pass; the result is reused by every intrinsic entry.
    pub fn build(
        preferred: &[PresentationSize],
        resolver: &SizeResolver,
        dismiss_scale: f32,
        mut measure_content: impl FnMut() -> f32,
    ) -> Self {
        let fallback = [PresentationSize::IntrinsicHeight];
        let preferred = if preferred.is_empty() {
            &fallback[..]
        } else {
            preferred
        };

        let mut measured: Option<f32> = None;
        let mut points: Vec<SnapPoint> = Vec::with_capacity(preferred.len());
        for size in preferred {
            let height = resolver.resolve(size, || {
                *measured.get_or_insert_with(&mut measure_content)
            });
            if points.iter().any(|p| p.height == height) {
                continue;
            }
            points.push(SnapPoint {
                origin: resolver.origin_for_height(height),
                height,
                size: size.clone(),
            });
        }

        let mut smallest_height = f32::INFINITY;
        let mut largest_height = f32::NEG_INFINITY;
        for p in &points {
            smallest_height = smallest_height.min(p.height);
            largest_height = largest_height.max(p.height);
        }

        let max_possible_origin = resolver.max_possible_origin();
        let min_possible_origin = resolver.min_possible_origin();
        for p in &points {
            debug_assert!(
                p.origin >= max_possible_origin && p.origin <= min_possible_origin,
                "snap origin out of bounds (origin={}, bounds={max_possible_origin}..={min_possible_origin})",
                p.origin
            );
        }

        let dismiss_scale = if dismiss_scale.is_nan() {
            0.0
        } else {
            dismiss_scale.clamp(0.0, 1.0)
        };
        let set = Self {
            smallest_origin: resolver.origin_for_height(smallest_height),
            largest_origin: resolver.origin_for_height(largest_height),
            dismissable_origin: resolver.origin_for_height(smallest_height * dismiss_scale),
            max_possible_origin,
            min_possible_origin,
            points,
        };
        sdebug!(
            points = set.points.len(),
            smallest_origin = set.smallest_origin,
            largest_origin = set.largest_origin,
            dismissable_origin = set.dismissable_origin,
            "SnapPointSet::build"
        );
        set
    }

    pub fn points(&self) -> &[SnapPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SnapPoint> {
        self.points.first()
    }

    /// Origin of the smallest preferred height (numerically the largest snap origin).
    pub fn smallest_origin(&self) -> f32 {
        self.smallest_origin
    }

    /// Origin of the largest preferred height: the "fully expanded" position.
    pub fn largest_origin(&self) -> f32 {
        self.largest_origin
    }

    /// Releasing strictly below this origin dismisses a dismissable sheet.
    pub fn dismissable_origin(&self) -> f32 {
        self.dismissable_origin
    }

    pub fn max_possible_origin(&self) -> f32 {
        self.max_possible_origin
    }

    pub fn min_possible_origin(&self) -> f32 {
        self.min_possible_origin
    }

    pub fn is_fully_expanded(&self, origin: f32) -> bool {
        origin <= self.largest_origin
    }

    pub fn is_past_dismiss_threshold(&self, origin: f32) -> bool {
        origin > self.dismissable_origin
    }

    pub fn point_at_origin(&self, origin: f32) -> Option<&SnapPoint> {
        self.points.iter().find(|p| p.origin == origin)
    }

    pub fn point_for_size(&self, size: &PresentationSize) -> Option<&SnapPoint> {
        self.points.iter().find(|p| &p.size == size)
    }

    /// Picks the snap point to settle on after a drag released at `origin`.
    ///
    /// Distances to candidates ahead of the drag (smaller origins when moving up, larger when
    /// moving down) are scaled by [`SNAP_DIRECTION_WEIGHT`]. Exact ties keep the earlier point.
    pub fn nearest(&self, origin: f32, direction: DragDirection) -> Option<&SnapPoint> {
        let mut best: Option<(&SnapPoint, f32)> = None;
        for p in &self.points {
            let ahead = match direction {
                DragDirection::Up => p.origin < origin,
                DragDirection::Down => p.origin > origin,
            };
            let weight = if ahead { SNAP_DIRECTION_WEIGHT } else { 1.0 };
            let distance = abs(p.origin - origin) * weight;
            match best {
                Some((_, d)) if d <= distance => {}
                _ => best = Some((p, distance)),
            }
        }
        best.map(|(p, _)| p)
    }

    /// Nearest point by plain distance, ignoring drag direction.
    pub fn closest(&self, origin: f32) -> Option<&SnapPoint> {
        let mut best: Option<(&SnapPoint, f32)> = None;
        for p in &self.points {
            let distance = abs(p.origin - origin);
            match best {
                Some((_, d)) if d <= distance => {}
                _ => best = Some((p, distance)),
            }
        }
        best.map(|(p, _)| p)
    }
}
