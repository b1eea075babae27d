use crate::{Rgba, Size};

/// Spacing added to the drag indicator's height when it contributes to the minimum sheet height.
pub const INDICATOR_OFFSET: f32 = 10.0;

/// Appearance of the grabber drawn above the sheet content.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragIndicator {
    pub visible: bool,
    pub size: Size,
    pub color: Rgba,
}

impl Default for DragIndicator {
    fn default() -> Self {
        Self {
            visible: true,
            size: Size::new(36.0, 5.0),
            color: Rgba::new(0xC7, 0xC7, 0xCC, 0xFF),
        }
    }
}

impl DragIndicator {
    /// Height the indicator reserves at the top of the sheet (`0` when hidden).
    pub fn reserved_height(&self) -> f32 {
        if self.visible {
            self.size.height.max(0.0) + INDICATOR_OFFSET
        } else {
            0.0
        }
    }
}

/// Behavioral knobs of a presented sheet.
///
/// Created with defaults and handed to the presented content once per layout pass so it can
/// adjust them. `drag_resistance` and `dismiss_scale` are clamped to `0.0..=1.0` on read, so
/// writing the fields directly is fine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresentableConfiguration {
    pub rounded_corners: bool,
    /// Fraction of upward (or non-dismissable downward) drag that is swallowed.
    pub drag_resistance: f32,
    pub is_dismissable: bool,
    /// Fraction of the smallest preferred height below which a release dismisses the sheet.
    pub dismiss_scale: f32,
    pub drag_indicator: DragIndicator,
    pub tap_outside_to_dismiss: bool,
}

impl Default for PresentableConfiguration {
    fn default() -> Self {
        Self {
            rounded_corners: true,
            drag_resistance: 0.0,
            is_dismissable: true,
            dismiss_scale: 0.5,
            drag_indicator: DragIndicator::default(),
            tap_outside_to_dismiss: true,
        }
    }
}

impl PresentableConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_resistance(&self) -> f32 {
        clamp_unit(self.drag_resistance)
    }

    pub fn dismiss_scale(&self) -> f32 {
        clamp_unit(self.dismiss_scale)
    }

    pub fn with_rounded_corners(mut self, rounded_corners: bool) -> Self {
        self.rounded_corners = rounded_corners;
        self
    }

    pub fn with_drag_resistance(mut self, drag_resistance: f32) -> Self {
        self.drag_resistance = clamp_unit(drag_resistance);
        self
    }

    pub fn with_dismissable(mut self, is_dismissable: bool) -> Self {
        self.is_dismissable = is_dismissable;
        self
    }

    pub fn with_dismiss_scale(mut self, dismiss_scale: f32) -> Self {
        self.dismiss_scale = clamp_unit(dismiss_scale);
        self
    }

    pub fn with_drag_indicator(mut self, drag_indicator: DragIndicator) -> Self {
        self.drag_indicator = drag_indicator;
        self
    }

    pub fn with_drag_indicator_visible(mut self, visible: bool) -> Self {
        self.drag_indicator.visible = visible;
        self
    }

    pub fn with_tap_outside_to_dismiss(mut self, tap_outside_to_dismiss: bool) -> Self {
        self.tap_outside_to_dismiss = tap_outside_to_dismiss;
        self
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
