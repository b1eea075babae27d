//! Presentation session for the `snapsheet` crate.
//!
//! The `snapsheet` crate is UI-agnostic and focuses on geometry and gesture math. This crate
//! ties those pieces to a presented sheet:
//!
//! - Content capabilities ([`Presentable`]) and the host surface ([`SheetHost`])
//! - A [`PresentationSession`] that sequences present, transition, drag and dismiss
//! - Tween-based animation helpers (adapter-driven via `tick(now_ms)`)
//!
//! This crate is framework-agnostic (no toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod presentable;
mod session;
mod tween;

#[cfg(test)]
mod tests;

pub use presentable::{Presentable, SheetHost, TapResponse};
pub use session::{DismissCompletion, PresentationSession, SessionOptions, SessionPhase};
pub use tween::{Easing, Tween};
