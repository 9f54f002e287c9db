//! Property tweens
//!
//! A tween moves a sparse set of properties of one target from start values
//! to end values over a duration, after an optional delay.

use crate::animator::{Target, TweenOptions};
use crate::easing::Easing;
use crate::properties::{Property, PropertyMap};

#[derive(Clone, Debug)]
pub struct Tween {
    target: Target,
    /// Explicit start values; missing ones are captured when the delay ends
    from: PropertyMap,
    to: PropertyMap,
    duration: f32,
    delay: f32,
    easing: Easing,
    elapsed: f32,
    started: bool,
}

impl Tween {
    pub fn new(
        target: Target,
        from: Option<&PropertyMap>,
        to: &PropertyMap,
        options: TweenOptions,
    ) -> Self {
        Self {
            target,
            from: from.copied().unwrap_or_default(),
            to: *to,
            duration: options.duration.max(0.0),
            delay: options.delay.max(0.0),
            easing: options.easing,
            elapsed: 0.0,
            started: false,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn end_values(&self) -> &PropertyMap {
        &self.to
    }

    /// Whether the delay has elapsed
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.to.is_empty() || self.elapsed >= self.delay + self.duration
    }

    /// Linear progress through the active part (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.elapsed < self.delay {
            0.0
        } else if self.duration <= 0.0 {
            1.0
        } else {
            ((self.elapsed - self.delay) / self.duration).min(1.0)
        }
    }

    /// Stop driving `property`. Returns true if the tween drives nothing now.
    pub fn drop_property(&mut self, property: Property) -> bool {
        self.to.clear(property);
        self.from.clear(property);
        self.to.is_empty()
    }

    /// Advance by `dt` seconds and write the interpolated values into
    /// `rendered`. Returns true once the tween has reached its end values.
    pub fn step(&mut self, dt: f32, rendered: &mut PropertyMap) -> bool {
        self.elapsed += dt.max(0.0);
        if self.elapsed < self.delay {
            return false;
        }

        if !self.started {
            for (property, _) in self.to.iter() {
                if !self.from.contains(property) {
                    self.from.set(property, rendered.resolved(property));
                }
            }
            self.started = true;
        }

        let eased = self.easing.apply(self.progress());
        for (property, end) in self.to.iter() {
            let start = self.from.get(property).unwrap_or(end);
            rendered.set(property, start + (end - start) * eased);
        }

        self.is_finished()
    }
}
