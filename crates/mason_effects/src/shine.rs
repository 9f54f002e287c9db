//! Shine sweep
//!
//! Text painted with a linear gradient whose bright band sweeps across it.
//! The sweep is expressed as a progress value `p` in `0..=100`, mapped to a
//! horizontal background position of `150 - 2p` percent: the band starts off
//! the right edge and leaves past the left one.
//!
//! Without yoyo a cycle lasts `speed + delay` seconds: the sweep runs for
//! `speed`, then holds at the end. With yoyo a full cycle runs forward, holds,
//! runs back and holds at the start.

use crate::error::{EffectError, Result};
use mason_animation::FrameClock;
use serde::{Deserialize, Serialize};

/// Which way the band travels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShineDirection {
    #[default]
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShineOptions {
    /// Seconds one sweep takes
    pub speed: f64,
    /// Base text color
    pub color: String,
    /// Color of the bright band
    pub shine_color: String,
    /// Gradient angle in degrees
    pub spread: f32,
    pub yoyo: bool,
    pub pause_on_hover: bool,
    pub direction: ShineDirection,
    /// Seconds to hold between sweeps
    pub delay: f64,
    pub disabled: bool,
}

impl Default for ShineOptions {
    fn default() -> Self {
        Self {
            speed: 2.0,
            color: "#b5b5b5".to_string(),
            shine_color: "#ffffff".to_string(),
            spread: 120.0,
            yoyo: false,
            pause_on_hover: false,
            direction: ShineDirection::Left,
            delay: 0.0,
            disabled: false,
        }
    }
}

impl ShineOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(EffectError::InvalidOption {
                option: "speed",
                reason: format!("must be a positive number of seconds, got {}", self.speed),
            });
        }
        if !(self.delay.is_finite() && self.delay >= 0.0) {
            return Err(EffectError::InvalidOption {
                option: "delay",
                reason: format!("must be a non-negative number of seconds, got {}", self.delay),
            });
        }
        Ok(())
    }
}

pub struct ShineEffect {
    options: ShineOptions,
    clock: FrameClock,
    hovered: bool,
    progress: f64,
}

impl ShineEffect {
    pub fn new(options: ShineOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            clock: FrameClock::new(),
            hovered: false,
            progress: 0.0,
        })
    }

    pub fn options(&self) -> &ShineOptions {
        &self.options
    }

    /// CSS background image for the text
    pub fn gradient(&self) -> String {
        let ShineOptions {
            spread,
            color,
            shine_color,
            ..
        } = &self.options;
        format!(
            "linear-gradient({spread}deg, {color} 0%, {color} 35%, {shine_color} 50%, {color} 65%, {color} 100%)"
        )
    }

    pub fn is_paused(&self) -> bool {
        self.options.disabled || (self.options.pause_on_hover && self.hovered)
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
    }

    /// Advance to the frame at `now_ms`. Returns the new progress, or `None`
    /// when the sweep is paused or this is the first frame of a run.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        if self.is_paused() {
            self.clock.pause();
            return None;
        }
        self.clock.tick(now_ms)?;
        self.progress = self.progress_at(self.clock.elapsed());
        Some(self.progress as f32)
    }

    fn progress_at(&self, elapsed: f64) -> f64 {
        let ShineOptions {
            speed, delay, yoyo, ..
        } = self.options;
        let cycle = speed + delay;

        let forward = if yoyo {
            let time = elapsed % (cycle * 2.0);
            if time < speed {
                time / speed * 100.0
            } else if time < cycle {
                100.0
            } else if time < cycle + speed {
                100.0 - (time - cycle) / speed * 100.0
            } else {
                0.0
            }
        } else {
            let time = elapsed % cycle;
            if time < speed {
                time / speed * 100.0
            } else {
                100.0
            }
        };

        match self.options.direction {
            ShineDirection::Left => forward,
            ShineDirection::Right => 100.0 - forward,
        }
    }

    /// Sweep progress, 0 to 100
    pub fn progress(&self) -> f32 {
        self.progress as f32
    }

    /// Horizontal background position in percent
    pub fn background_position(&self) -> f32 {
        (150.0 - self.progress * 2.0) as f32
    }

    /// CSS `background-position` value
    pub fn background_position_css(&self) -> String {
        format!("{}% center", self.background_position())
    }

    /// Seconds of sweep time accumulated across runs
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn effect(options: ShineOptions) -> ShineEffect {
        ShineEffect::new(options).unwrap()
    }

    #[test]
    fn test_first_tick_only_records() {
        let mut shine = effect(ShineOptions::default());
        assert_eq!(shine.tick(500.0), None);
        assert_eq!(shine.progress(), 0.0);
        assert_eq!(shine.background_position(), 150.0);

        assert!(approx(shine.tick(1500.0).unwrap(), 50.0));
        assert!(approx(shine.background_position(), 50.0));
        assert_eq!(shine.background_position_css(), "50% center");
    }

    #[test]
    fn test_hold_then_wrap() {
        let mut shine = effect(ShineOptions {
            delay: 1.0,
            ..Default::default()
        });
        shine.tick(0.0);
        assert!(approx(shine.tick(2500.0).unwrap(), 100.0));
        assert!(approx(shine.background_position(), -50.0));
        assert!(approx(shine.tick(3500.0).unwrap(), 25.0));
    }

    #[test]
    fn test_yoyo_runs_back() {
        let mut shine = effect(ShineOptions {
            yoyo: true,
            ..Default::default()
        });
        shine.tick(0.0);
        assert!(approx(shine.tick(1000.0).unwrap(), 50.0));
        assert!(approx(shine.tick(2500.0).unwrap(), 75.0));
        assert!(approx(shine.tick(3000.0).unwrap(), 50.0));
        assert!(approx(shine.tick(4500.0).unwrap(), 25.0));
    }

    #[test]
    fn test_yoyo_holds_at_both_ends() {
        let mut shine = effect(ShineOptions {
            yoyo: true,
            delay: 1.0,
            ..Default::default()
        });
        shine.tick(0.0);
        assert!(approx(shine.tick(2500.0).unwrap(), 100.0));
        assert!(approx(shine.tick(5500.0).unwrap(), 0.0));
    }

    #[test]
    fn test_right_direction_mirrors() {
        let mut shine = effect(ShineOptions {
            direction: ShineDirection::Right,
            ..Default::default()
        });
        shine.tick(0.0);
        assert!(approx(shine.tick(500.0).unwrap(), 75.0));
    }

    #[test]
    fn test_pause_on_hover_keeps_elapsed() {
        let mut shine = effect(ShineOptions {
            pause_on_hover: true,
            ..Default::default()
        });
        shine.tick(0.0);
        shine.tick(500.0);

        shine.pointer_enter();
        assert_eq!(shine.tick(900.0), None);
        assert_eq!(shine.tick(5000.0), None);

        shine.pointer_leave();
        assert_eq!(shine.tick(6000.0), None);
        assert!(approx(shine.tick(6500.0).unwrap(), 50.0));
        assert!((shine.elapsed() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_hover_ignored_without_pause_on_hover() {
        let mut shine = effect(ShineOptions::default());
        shine.tick(0.0);
        shine.pointer_enter();
        assert!(shine.tick(500.0).is_some());
    }

    #[test]
    fn test_disabled_does_not_advance() {
        let mut shine = effect(ShineOptions::default());
        shine.set_disabled(true);
        assert_eq!(shine.tick(0.0), None);
        assert_eq!(shine.tick(1000.0), None);

        shine.set_disabled(false);
        assert_eq!(shine.tick(2000.0), None);
        assert_eq!(shine.elapsed(), 0.0);
    }

    #[test]
    fn test_gradient() {
        let shine = effect(ShineOptions::default());
        assert_eq!(
            shine.gradient(),
            "linear-gradient(120deg, #b5b5b5 0%, #b5b5b5 35%, #ffffff 50%, #b5b5b5 65%, #b5b5b5 100%)"
        );
    }

    #[test]
    fn test_options_from_json_and_validation() {
        let options: ShineOptions =
            serde_json::from_str(r#"{"speed": 3.0, "direction": "right", "yoyo": true}"#).unwrap();
        assert_eq!(options.speed, 3.0);
        assert_eq!(options.direction, ShineDirection::Right);
        assert_eq!(options.color, "#b5b5b5");

        let err = ShineEffect::new(ShineOptions {
            speed: 0.0,
            ..Default::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, EffectError::InvalidOption { option: "speed", .. }));
    }
}
