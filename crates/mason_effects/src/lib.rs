//! Mason Effects
//!
//! Decorative effects modelled as tick-driven state: each keeps nothing
//! between frames but a last-tick timestamp and accumulated time, and reports
//! what to draw.
//!
//! - **Shine**: a highlight band swept across text by moving its background
//!   gradient
//! - **Counter**: a number counting up from zero once scrolled into view

pub mod counter;
pub mod error;
pub mod shine;

pub use counter::{CounterPhase, CounterTween};
pub use error::{EffectError, Result};
pub use shine::{ShineDirection, ShineEffect, ShineOptions};
