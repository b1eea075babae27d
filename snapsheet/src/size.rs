use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::types::sanitize_len;
use crate::{PresentableConfiguration, Viewport};

/// An abstract height request for a sheet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PresentationSize {
    /// Full container height minus the top safe-area inset.
    Large,
    /// Half the container height.
    Medium,
    /// A quarter of the container height.
    Small,
    /// A fixed content height, on top of the minimum sheet height.
    ContentHeight(f32),
    /// The content's measured height, on top of the minimum sheet height.
    IntrinsicHeight,
    /// Another size plus a fixed extra amount.
    AdditionalHeight(Box<PresentationSize>, f32),
}

impl PresentationSize {
    pub fn additional(base: PresentationSize, extra: f32) -> Self {
        Self::AdditionalHeight(Box::new(base), extra)
    }
}

/// Converts [`PresentationSize`] values into concrete heights for one layout pass.
///
/// All results are clamped to `[minimum_height, maximum_height]`, and origins are measured from
/// the top of the container (smaller origin = taller sheet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeResolver {
    viewport: Viewport,
    minimum_height: f32,
    maximum_height: f32,
}

impl SizeResolver {
    pub fn new(viewport: Viewport, config: &PresentableConfiguration) -> Self {
        let container = sanitize_len(viewport.height);
        let minimum_height = sanitize_len(viewport.safe_area.bottom)
            + config.drag_indicator.reserved_height();
        let maximum_height =
            (container - sanitize_len(viewport.safe_area.top)).max(minimum_height);
        Self {
            viewport,
            minimum_height,
            maximum_height,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn container_height(&self) -> f32 {
        sanitize_len(self.viewport.height)
    }

    pub fn minimum_height(&self) -> f32 {
        self.minimum_height
    }

    pub fn maximum_height(&self) -> f32 {
        self.maximum_height
    }

    pub fn clamp_height(&self, height: f32) -> f32 {
        let h = if height.is_nan() { 0.0 } else { height };
        h.clamp(self.minimum_height, self.maximum_height)
    }

    /// Translates a height into the origin that shows exactly that much sheet.
    pub fn origin_for_height(&self, height: f32) -> f32 {
        self.container_height() - self.clamp_height(height)
    }

    pub fn height_for_origin(&self, origin: f32) -> f32 {
        self.container_height() - origin
    }

    /// Origin of the tallest allowed sheet (numerically the smallest origin).
    pub fn max_possible_origin(&self) -> f32 {
        self.origin_for_height(self.maximum_height)
    }

    /// Origin of the shortest allowed sheet (numerically the largest origin).
    pub fn min_possible_origin(&self) -> f32 {
        self.origin_for_height(self.minimum_height)
    }

    /// Resolves `size` to a clamped height.
    ///
    /// `measure_content` is called at most once, and only for [`PresentationSize::IntrinsicHeight`]
    /// bases. It should return the content's compressed-fit height at the container width; a
    /// non-finite or negative answer counts as `0`.
    ///
    /// Nested [`PresentationSize::AdditionalHeight`] chains are unwrapped iteratively, so
    /// pathological nesting depth does not grow the stack. Each layer is clamped before the next
    /// extra is added.
    pub fn resolve(&self, size: &PresentationSize, measure_content: impl FnOnce() -> f32) -> f32 {
        let mut extras = Vec::new();
        let mut base = size;
        while let PresentationSize::AdditionalHeight(inner, extra) = base {
            extras.push(*extra);
            base = inner;
        }

        let container = self.container_height();
        let raw = match base {
            PresentationSize::Large => container - sanitize_len(self.viewport.safe_area.top),
            PresentationSize::Medium => container / 2.0,
            PresentationSize::Small => container / 4.0,
            PresentationSize::ContentHeight(v) => sanitize_len(*v) + self.minimum_height,
            PresentationSize::IntrinsicHeight => {
                sanitize_len(measure_content()) + self.minimum_height
            }
            PresentationSize::AdditionalHeight(..) => 0.0,
        };

        let mut height = self.clamp_height(raw);
        for extra in extras.iter().rev() {
            let extra = if extra.is_finite() { *extra } else { 0.0 };
            height = self.clamp_height(height + extra);
        }
        height
    }
}
