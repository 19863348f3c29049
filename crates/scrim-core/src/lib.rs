#![forbid(unsafe_code)]

//! Core: geometry, input events, time, and cancellable timers.
//!
//! # Role in scrim
//! `scrim-core` holds the primitives the overlay widget is built on. It owns
//! no rendering and no presentation state; the widget crate
//! (`scrim-widgets`) consumes these types to schedule its settle and exit
//! timers and to route pointer/keyboard input.
//!
//! # Primary responsibilities
//! - **Geometry**: `Rect`, `Size`, and `Sides` in presentation units.
//! - **Event**: canonical key and mouse events the overlay reacts to.
//! - **Clock**: an injectable time source (`SystemClock`, `ManualClock`).
//! - **Timers**: `TimerSlot`, a single-slot deadline timer with
//!   cancel-and-replace semantics backed by cancellation tokens.

pub mod cancellation;
pub mod clock;
pub mod event;
pub mod geometry;
pub mod timer;

pub use cancellation::{CancellationSource, CancellationToken};
pub use clock::{Clock, ManualClock, SystemClock};
pub use geometry::{Rect, Sides, Size};
pub use timer::{Fired, TimerSlot};
