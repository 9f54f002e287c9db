//! Scroll-triggered counter
//!
//! A number that counts from zero up to its target once the element scrolls
//! far enough into view, and back down to zero if it is scrolled back out
//! above the trigger line. The displayed value is always a whole number.

use crate::error::{EffectError, Result};
use mason_animation::{Easing, FrameClock};
use mason_core::StateMachine;

/// Seconds a full count takes
pub const COUNT_DURATION: f32 = 2.0;
/// `power2.out`
pub const COUNT_EASING: Easing = Easing::EaseOutCubic;
/// Fraction of the viewport height the element's top must reach to start
pub const TRIGGER_LINE: f32 = 0.85;

/// Playback phase of a counter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterPhase {
    /// Not yet scrolled into view
    Waiting,
    CountingUp,
    CountingDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trigger {
    Enter,
    LeaveBack,
}

fn trigger_machine() -> StateMachine<CounterPhase, Trigger> {
    use CounterPhase::*;

    StateMachine::builder(Waiting)
        .on(Waiting, Trigger::Enter, CountingUp)
        .on(CountingUp, Trigger::LeaveBack, CountingDown)
        .on(CountingDown, Trigger::Enter, CountingUp)
        .history_limit(0)
        .build()
}

/// Longest numeric prefix of `text`, ignoring surrounding whitespace
fn parse_leading_number(text: &str) -> Option<f32> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find(|end| text[..*end].parse::<f32>().is_ok())?;
    text[..end].parse::<f32>().ok().filter(|value| value.is_finite())
}

pub struct CounterTween {
    target: f32,
    /// Seconds into the count, 0 to `COUNT_DURATION`
    time: f32,
    phase: StateMachine<CounterPhase, Trigger>,
    clock: FrameClock,
}

impl CounterTween {
    pub fn new(target: f32) -> Result<Self> {
        if !target.is_finite() {
            return Err(EffectError::InvalidOption {
                option: "target",
                reason: format!("must be a finite number, got {target}"),
            });
        }
        Ok(Self {
            target,
            time: 0.0,
            phase: trigger_machine(),
            clock: FrameClock::new(),
        })
    }

    /// Build a counter from the target text of an element. Text without a
    /// leading number yields no counter.
    pub fn parse(text: &str) -> Option<Self> {
        let Some(target) = parse_leading_number(text) else {
            tracing::debug!("counter: ignoring non-numeric target {:?}", text);
            return None;
        };
        Self::new(target).ok()
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase.current_state()
    }

    /// Report where the element's top edge is, relative to the top of a
    /// viewport `viewport_height` tall. Returns the new phase when the
    /// trigger line was crossed.
    pub fn scroll(&mut self, element_top: f32, viewport_height: f32) -> Option<CounterPhase> {
        let trigger = if element_top <= viewport_height * TRIGGER_LINE {
            Trigger::Enter
        } else {
            Trigger::LeaveBack
        };
        let phase = self.phase.send(trigger)?;
        self.clock.pause();
        Some(phase)
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        match self.phase() {
            CounterPhase::Waiting => {}
            CounterPhase::CountingUp => self.time = (self.time + dt).min(COUNT_DURATION),
            CounterPhase::CountingDown => self.time = (self.time - dt).max(0.0),
        }
    }

    /// Advance to the frame at `now_ms`; the first frame after a trigger only
    /// records the timestamp
    pub fn tick(&mut self, now_ms: f64) {
        if let Some(dt) = self.clock.tick(now_ms) {
            self.advance(dt);
        }
    }

    pub fn is_animating(&self) -> bool {
        match self.phase() {
            CounterPhase::Waiting => false,
            CounterPhase::CountingUp => self.time < COUNT_DURATION,
            CounterPhase::CountingDown => self.time > 0.0,
        }
    }

    /// Current tweened value, snapped to whole steps
    pub fn value(&self) -> f32 {
        let eased = COUNT_EASING.apply(self.time / COUNT_DURATION);
        (self.target * eased).round()
    }

    /// Text to display
    pub fn display(&self) -> String {
        format!("{}", self.value().ceil() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(CounterTween::parse("250").unwrap().target(), 250.0);
        assert_eq!(CounterTween::parse("  12.5 ").unwrap().target(), 12.5);
        assert_eq!(CounterTween::parse("98%").unwrap().target(), 98.0);
        assert!(CounterTween::parse("soon").is_none());
        assert!(CounterTween::parse("").is_none());
    }

    #[test]
    fn test_waits_for_trigger_line() {
        let mut counter = CounterTween::new(100.0).unwrap();
        assert_eq!(counter.scroll(900.0, 1000.0), None);
        counter.advance(1.0);
        assert_eq!(counter.display(), "0");
        assert!(!counter.is_animating());

        assert_eq!(counter.scroll(850.0, 1000.0), Some(CounterPhase::CountingUp));
        assert!(counter.is_animating());
    }

    #[test]
    fn test_counts_up_to_target() {
        let mut counter = CounterTween::new(250.0).unwrap();
        counter.scroll(400.0, 1000.0);

        counter.advance(1.0);
        // power2.out at half time is 1 - 0.5^3
        assert_eq!(counter.value(), (250.0_f32 * 0.875).round());
        assert_eq!(counter.display(), "219");

        counter.advance(5.0);
        assert_eq!(counter.display(), "250");
        assert!(!counter.is_animating());
    }

    #[test]
    fn test_scrolling_back_reverses() {
        let mut counter = CounterTween::new(40.0).unwrap();
        counter.scroll(100.0, 1000.0);
        counter.advance(2.0);
        assert_eq!(counter.display(), "40");

        assert_eq!(counter.scroll(950.0, 1000.0), Some(CounterPhase::CountingDown));
        counter.advance(1.0);
        assert!(counter.value() < 40.0);
        counter.advance(1.0);
        assert_eq!(counter.display(), "0");

        assert_eq!(counter.scroll(100.0, 1000.0), Some(CounterPhase::CountingUp));
    }

    #[test]
    fn test_tick_first_frame_only_records() {
        let mut counter = CounterTween::new(10.0).unwrap();
        counter.scroll(0.0, 1000.0);
        counter.tick(1000.0);
        assert_eq!(counter.display(), "0");
        counter.tick(3000.0);
        assert_eq!(counter.display(), "10");
    }

    #[test]
    fn test_rejects_non_finite_target() {
        assert!(CounterTween::new(f32::NAN).is_err());
        assert!(CounterTween::parse("inf").is_none());
    }
}
