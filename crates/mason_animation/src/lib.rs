//! Mason Animation System
//!
//! Property tweens with easing, driven by an explicit frame clock.
//!
//! # Features
//!
//! - **Easing**: power / CSS named curves and cubic beziers, parsed from names
//!   such as `"power3.out"` or `"ease-in-out"`
//! - **Animator capability**: the interface layout code animates through, so
//!   it can be backed by a real scheduler or by a recording test double
//! - **Override semantics**: a new tween for a property supersedes any
//!   in-flight tween of that property on the same target
//! - **Frame clock**: last-tick timestamp plus accumulated elapsed time

pub mod animator;
pub mod clock;
pub mod easing;
pub mod properties;
pub mod recording;
pub mod scheduler;
pub mod tween;

pub use animator::{Animator, StaggeredTween, Target, TweenOptions};
pub use clock::FrameClock;
pub use easing::{Easing, ParseEasingError};
pub use properties::{Property, PropertyMap};
pub use recording::{AnimatorCall, RecordingAnimator};
pub use scheduler::AnimationScheduler;
pub use tween::Tween;
