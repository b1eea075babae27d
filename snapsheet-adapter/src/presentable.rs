use alloc::vec;
use alloc::vec::Vec;

use snapsheet::{
    DragIndicator, DragSample, PresentableConfiguration, PresentationSize, ScrollRegion, Viewport,
};

/// What the session does when the dimmed area outside the sheet is tapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TapResponse {
    #[default]
    Dismiss,
    Ignore,
}

/// Capabilities of the content shown inside a sheet.
///
/// Every method has a default, so content only overrides what it cares about.
pub trait Presentable {
    /// Preferred resting sizes, in order. The first entry is where a fresh presentation settles.
    fn preferred_presentation_size(&self) -> Vec<PresentationSize> {
        vec![PresentationSize::IntrinsicHeight]
    }

    /// The embedded scrollable region, if any.
    fn scroll_region(&mut self) -> Option<&mut dyn ScrollRegion> {
        None
    }

    /// Adjusts the configuration before each layout pass. Starts from defaults every time.
    fn configure(&mut self, _config: &mut PresentableConfiguration) {}

    /// Compressed-fit content height at `width`. Used by [`PresentationSize::IntrinsicHeight`].
    ///
    /// Return `0` when the content cannot be measured yet.
    fn measure_content(&mut self, _width: f32) -> f32 {
        0.0
    }

    fn on_background_tap(&mut self) -> TapResponse {
        TapResponse::Dismiss
    }

    /// Whether the sheet may keep following this drag sample.
    fn should_continue_drag(&mut self, _sample: &DragSample) -> bool {
        true
    }

    fn should_transition(&mut self, _to: &PresentationSize) -> bool {
        true
    }

    fn will_transition(&mut self, _to: &PresentationSize) {}

    fn did_transition(&mut self, _to: &PresentationSize) {}
}

/// The host windowing layer a session renders into.
pub trait SheetHost {
    /// Current container size and safe-area insets.
    fn viewport(&self) -> Viewport;

    /// Moves the sheet's top-left corner to `origin` (measured from the container top).
    fn set_sheet_origin(&mut self, origin: f32);

    fn set_dimming_visible(&mut self, _visible: bool) {}

    /// Shows (`Some`) or removes (`None`) the drag indicator overlay.
    fn set_drag_indicator(&mut self, _indicator: Option<DragIndicator>) {}

    fn set_content_bottom_inset(&mut self, _inset: f32) {}
}
