use crate::DragDirection;

/// A lightweight, serializable snapshot of a sheet's position.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetState {
    /// Live origin (may be mid-drag or mid-animation).
    pub origin: f32,
    /// Origin of the last completed settle.
    pub settled_origin: f32,
    pub direction: DragDirection,
}
