use crate::{
    DragDirection, DragSample, GesturePhase, Point, PresentableConfiguration, SnapPoint,
    SnapPointSet,
};

/// Geometry and policy a drag sample is evaluated against.
#[derive(Clone, Copy, Debug)]
pub struct DragBounds<'a> {
    pub snaps: &'a SnapPointSet,
    pub resistance: f32,
    pub is_dismissable: bool,
    /// Whether the content embeds a scroll region whose scrolling takes over at full expansion.
    pub has_scroll_region: bool,
    pub safe_area_bottom: f32,
}

impl<'a> DragBounds<'a> {
    pub fn new(
        snaps: &'a SnapPointSet,
        config: &PresentableConfiguration,
        has_scroll_region: bool,
        safe_area_bottom: f32,
    ) -> Self {
        Self {
            snaps,
            resistance: config.drag_resistance(),
            is_dismissable: config.is_dismissable,
            has_scroll_region,
            safe_area_bottom,
        }
    }

    /// The topmost origin a drag may reach.
    ///
    /// With a scroll region the sheet stops at its largest preferred origin, where the region's
    /// own scrolling takes over; otherwise at the absolute maximum.
    pub fn top_bound(&self) -> f32 {
        if self.has_scroll_region {
            self.snaps.largest_origin()
        } else {
            self.snaps.max_possible_origin()
        }
    }

    /// Content bottom inset for a live origin.
    ///
    /// Above the smallest snap the inset grows by the distance travelled past it.
    pub fn bottom_inset(&self, origin: f32) -> f32 {
        let smallest = self.snaps.smallest_origin();
        if origin < smallest {
            self.safe_area_bottom + (smallest - origin)
        } else {
            self.safe_area_bottom
        }
    }
}

/// What the session should do with a processed drag sample.
#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
    /// The sample was consumed without moving the sheet.
    Ignored,
    /// A drag started; any running settle animation should stop at its live position.
    Began,
    /// Move the sheet to `origin` immediately (no animation).
    Moved { origin: f32, bottom_inset: f32 },
    /// The release crossed the dismiss threshold.
    Dismiss,
    /// Animate to this snap point.
    Settle(SnapPoint),
}

/// Tracks a single drag gesture and turns its samples into sheet displacements.
///
/// Displacement is incremental: each processed (or skipped) sample resets the accumulator to its
/// own location, so only motion since the previous sample is ever applied.
#[derive(Clone, Debug, Default)]
pub struct DragGestureController {
    direction: DragDirection,
    last_location: Option<Point>,
    start_location: Option<Point>,
    engaged: bool,
}

impl DragGestureController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction of the last non-zero displacement. Zero-motion samples keep it.
    pub fn direction(&self) -> DragDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: DragDirection) {
        self.direction = direction;
    }

    pub fn is_active(&self) -> bool {
        self.last_location.is_some()
    }

    /// Pointer location of the current gesture's first sample.
    pub fn start_location(&self) -> Option<Point> {
        self.start_location
    }

    /// Whether a `Changed` sample of the current gesture was applied to the sheet.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Vertical motion `location` would apply since the last recorded sample (negative is up).
    pub fn pending_displacement(&self, location: Point) -> f32 {
        let d = match self.last_location {
            Some(prev) => location.y - prev.y,
            None => 0.0,
        };
        if d.is_finite() { d } else { 0.0 }
    }

    /// Records `sample` without applying its displacement (the sample was gated off).
    pub fn skip(&mut self, sample: &DragSample) {
        if sample.phase.is_terminal() {
            self.reset();
            return;
        }
        if sample.phase == GesturePhase::Began || self.start_location.is_none() {
            self.start_location = Some(sample.location);
        }
        self.last_location = Some(sample.location);
    }

    pub fn reset(&mut self) {
        self.last_location = None;
        self.start_location = None;
        self.engaged = false;
    }

    fn take_displacement(&mut self, location: Point) -> f32 {
        let d = self.pending_displacement(location);
        self.last_location = Some(location);
        d
    }

    /// Processes one sample against the sheet's live `origin`.
    pub fn process(
        &mut self,
        sample: &DragSample,
        origin: f32,
        bounds: &DragBounds<'_>,
    ) -> DragOutcome {
        let outcome = match sample.phase {
            GesturePhase::Began => {
                self.start_location = Some(sample.location);
                self.last_location = Some(sample.location);
                DragOutcome::Began
            }
            GesturePhase::Changed => {
                if self.start_location.is_none() {
                    self.start_location = Some(sample.location);
                }
                self.engaged = true;
                let d = self.take_displacement(sample.location);
                if d > 0.0 {
                    self.direction = DragDirection::Down;
                } else if d < 0.0 {
                    self.direction = DragDirection::Up;
                }

                let free = self.direction == DragDirection::Down && bounds.is_dismissable;
                let applied = if free { d } else { d * (1.0 - bounds.resistance) };
                let next = (origin + applied).max(bounds.top_bound());
                DragOutcome::Moved {
                    origin: next,
                    bottom_inset: bounds.bottom_inset(next),
                }
            }
            GesturePhase::Ended => {
                self.reset();
                if bounds.is_dismissable && bounds.snaps.is_past_dismiss_threshold(origin) {
                    DragOutcome::Dismiss
                } else {
                    self.settle(origin, bounds)
                }
            }
            GesturePhase::Cancelled => {
                self.reset();
                self.settle(origin, bounds)
            }
        };
        strace!(
            phase = ?sample.phase,
            origin,
            direction = ?self.direction,
            outcome = ?outcome,
            "DragGestureController::process"
        );
        outcome
    }

    fn settle(&self, origin: f32, bounds: &DragBounds<'_>) -> DragOutcome {
        match bounds.snaps.nearest(origin, self.direction) {
            Some(p) => DragOutcome::Settle(p.clone()),
            None => DragOutcome::Ignored,
        }
    }
}
