use crate::{GesturePhase, Point, Rect, SnapPointSet};

/// A scrollable region embedded in the sheet content, implemented by the host's scroll view.
pub trait ScrollRegion {
    /// Region bounds in sheet-local coordinates.
    fn frame(&self) -> Rect;
    fn content_offset(&self) -> f32;
    fn set_content_offset(&mut self, offset: f32);
    /// Whether the user is currently dragging the region's own content.
    fn is_dragging(&self) -> bool;
}

/// Result of observing a content-offset change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetObservation {
    /// No observation is installed.
    Detached,
    /// The sheet is fully expanded; the offset passed through and was recorded.
    Recorded,
    /// The sheet is below full expansion and the user dragged the region; the offset was reset.
    Reverted,
    /// The change was left alone.
    Passed,
}

/// Arbitrates between the sheet's drag and the native scrolling of an embedded region.
///
/// Below full expansion the region is pinned at the last offset recorded while expanded, so a
/// drag inside it moves the sheet instead. Without an attached region this type is inert.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollCoordinator {
    attached: bool,
    last_offset_y: f32,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs offset observation for `region`.
    pub fn attach(&mut self, region: &dyn ScrollRegion) {
        self.attached = true;
        self.last_offset_y = floor_offset(region.content_offset());
        sdebug!(last_offset_y = self.last_offset_y, "ScrollCoordinator::attach");
    }

    pub fn detach(&mut self) {
        if self.attached {
            sdebug!("ScrollCoordinator::detach");
        }
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn last_offset_y(&self) -> f32 {
        self.last_offset_y
    }

    /// Handles a content-offset change of `region` while the sheet sits at `origin`.
    pub fn observe(
        &mut self,
        region: &mut dyn ScrollRegion,
        origin: f32,
        snaps: &SnapPointSet,
    ) -> OffsetObservation {
        if !self.attached {
            return OffsetObservation::Detached;
        }
        if snaps.is_fully_expanded(origin) {
            self.last_offset_y = floor_offset(region.content_offset());
            return OffsetObservation::Recorded;
        }
        if region.is_dragging() && region.content_offset() != self.last_offset_y {
            strace!(
                offset = region.content_offset(),
                restored = self.last_offset_y,
                "ScrollCoordinator: reverting offset below full expansion"
            );
            region.set_content_offset(self.last_offset_y);
            return OffsetObservation::Reverted;
        }
        OffsetObservation::Passed
    }

    /// Whether the sheet's drag may consume a sample of `phase`.
    ///
    /// `start` is the pointer location where the gesture began and `dy` the sample's pending
    /// vertical motion (negative is up). Terminal phases always pass so the sheet can settle.
    /// Otherwise the sample is left to the region when the gesture started inside it or it is
    /// mid-drag, and either its content is scrolled (`offset > 0`) or the sheet is
    /// `fully_expanded` and the motion is upward.
    pub fn should_begin(
        &self,
        region: Option<&dyn ScrollRegion>,
        phase: GesturePhase,
        start: Point,
        dy: f32,
        fully_expanded: bool,
    ) -> bool {
        if phase.is_terminal() || !self.attached {
            return true;
        }
        let Some(region) = region else {
            return true;
        };
        let inside = region.frame().contains(start);
        if !inside && !region.is_dragging() {
            return true;
        }
        if region.content_offset() > 0.0 {
            return false;
        }
        !(inside && fully_expanded && dy < 0.0)
    }
}

fn floor_offset(offset: f32) -> f32 {
    if offset.is_finite() { offset.max(0.0) } else { 0.0 }
}
