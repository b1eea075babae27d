//! A headless engine for draggable, multi-size bottom sheets.
//!
//! For the presentation session (animation, content lifecycle), see the `snapsheet-adapter`
//! crate.
//!
//! This crate focuses on the geometry and gesture math behind a sheet that slides up from the
//! bottom of a container: resolving abstract size requests into heights, deriving snap origins,
//! turning pointer samples into sheet displacement, and arbitrating with an embedded scroll
//! region.
//!
//! It is UI-agnostic. A GUI layer is expected to provide:
//! - container size and safe-area insets
//! - the content's measured height (when intrinsic sizing is used)
//! - pointer samples and scroll-offset changes
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod config;
mod drag;
mod scroll;
mod size;
mod snap;
mod state;
mod types;


pub use config::{DragIndicator, INDICATOR_OFFSET, PresentableConfiguration};
pub use drag::{DragBounds, DragGestureController, DragOutcome};
pub use scroll::{OffsetObservation, ScrollCoordinator, ScrollRegion};
pub use size::{PresentationSize, SizeResolver};
pub use snap::{SNAP_DIRECTION_WEIGHT, SnapPoint, SnapPointSet};
pub use state::SheetState;
pub use types::{
    DragDirection, DragSample, GesturePhase, Insets, Point, Rect, Rgba, Size, Viewport,
};
