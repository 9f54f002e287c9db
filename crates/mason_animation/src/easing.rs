//! Easing functions for animations
//!
//! Curves can be parsed from the names used in stylesheets and tween configs:
//! `"none"`, `"linear"`, `"power1"`..`"power4"` with an optional `.in`, `.out`
//! or `.inOut` suffix (no suffix means `.out`), the `quad` / `cubic` / `quart`
//! / `quint` aliases, the CSS keywords `ease`, `ease-in`, `ease-out`,
//! `ease-in-out`, and `cubic-bezier(x1, y1, x2, y2)`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    CubicBezier(f32, f32, f32, f32),
}

/// Error returned when an easing name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown easing `{0}`")]
pub struct ParseEasingError(pub String);

#[derive(Clone, Copy)]
enum Phase {
    In,
    Out,
    InOut,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseInQuad => power(t, 2, Phase::In),
            Easing::EaseOutQuad => power(t, 2, Phase::Out),
            Easing::EaseInOutQuad => power(t, 2, Phase::InOut),
            Easing::EaseInCubic => power(t, 3, Phase::In),
            Easing::EaseOutCubic => power(t, 3, Phase::Out),
            Easing::EaseInOutCubic => power(t, 3, Phase::InOut),
            Easing::EaseInQuart => power(t, 4, Phase::In),
            Easing::EaseOutQuart => power(t, 4, Phase::Out),
            Easing::EaseInOutQuart => power(t, 4, Phase::InOut),
            Easing::EaseInQuint => power(t, 5, Phase::In),
            Easing::EaseOutQuint => power(t, 5, Phase::Out),
            Easing::EaseInOutQuint => power(t, 5, Phase::InOut),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }

    /// Parse an easing from its name. See the module docs for accepted forms.
    pub fn from_name(name: &str) -> Result<Self, ParseEasingError> {
        let trimmed = name.trim();
        let unknown = || ParseEasingError(trimmed.to_string());

        match trimmed {
            "none" | "linear" | "power0" => return Ok(Easing::Linear),
            "ease" => return Ok(Easing::CubicBezier(0.25, 0.1, 0.25, 1.0)),
            "ease-in" => return Ok(Easing::CubicBezier(0.42, 0.0, 1.0, 1.0)),
            "ease-out" => return Ok(Easing::CubicBezier(0.0, 0.0, 0.58, 1.0)),
            "ease-in-out" => return Ok(Easing::CubicBezier(0.42, 0.0, 0.58, 1.0)),
            _ => {}
        }

        if let Some(args) = trimmed
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let values: Vec<f32> = args
                .split(',')
                .map(|v| v.trim().parse::<f32>())
                .collect::<Result<_, _>>()
                .map_err(|_| unknown())?;
            return match values.as_slice() {
                &[x1, y1, x2, y2] => Ok(Easing::CubicBezier(x1, y1, x2, y2)),
                _ => Err(unknown()),
            };
        }

        let (family, phase) = match trimmed.split_once('.') {
            Some((family, "in")) => (family, Phase::In),
            Some((family, "out")) => (family, Phase::Out),
            Some((family, "inOut")) => (family, Phase::InOut),
            Some(_) => return Err(unknown()),
            None => (trimmed, Phase::Out),
        };

        let degree = match family {
            "power0" => return Ok(Easing::Linear),
            "power1" | "quad" => 2,
            "power2" | "cubic" => 3,
            "power3" | "quart" => 4,
            "power4" | "quint" | "strong" => 5,
            _ => return Err(unknown()),
        };

        Ok(match (degree, phase) {
            (2, Phase::In) => Easing::EaseInQuad,
            (2, Phase::Out) => Easing::EaseOutQuad,
            (2, Phase::InOut) => Easing::EaseInOutQuad,
            (3, Phase::In) => Easing::EaseInCubic,
            (3, Phase::Out) => Easing::EaseOutCubic,
            (3, Phase::InOut) => Easing::EaseInOutCubic,
            (4, Phase::In) => Easing::EaseInQuart,
            (4, Phase::Out) => Easing::EaseOutQuart,
            (4, Phase::InOut) => Easing::EaseInOutQuart,
            (_, Phase::In) => Easing::EaseInQuint,
            (_, Phase::Out) => Easing::EaseOutQuint,
            (_, Phase::InOut) => Easing::EaseInOutQuint,
        })
    }
}

impl FromStr for Easing {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::from_name(s)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Easing::Linear => "linear",
            Easing::EaseInQuad => "power1.in",
            Easing::EaseOutQuad => "power1.out",
            Easing::EaseInOutQuad => "power1.inOut",
            Easing::EaseInCubic => "power2.in",
            Easing::EaseOutCubic => "power2.out",
            Easing::EaseInOutCubic => "power2.inOut",
            Easing::EaseInQuart => "power3.in",
            Easing::EaseOutQuart => "power3.out",
            Easing::EaseInOutQuart => "power3.inOut",
            Easing::EaseInQuint => "power4.in",
            Easing::EaseOutQuint => "power4.out",
            Easing::EaseInOutQuint => "power4.inOut",
            Easing::CubicBezier(x1, y1, x2, y2) => {
                return write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})");
            }
        };
        f.write_str(name)
    }
}

/// Polynomial ease of the given degree
fn power(t: f32, degree: i32, phase: Phase) -> f32 {
    match phase {
        Phase::In => t.powi(degree),
        Phase::Out => 1.0 - (1.0 - t).powi(degree),
        Phase::InOut => {
            if t < 0.5 {
                0.5 * (2.0 * t).powi(degree)
            } else {
                1.0 - 0.5 * (2.0 - 2.0 * t).powi(degree)
            }
        }
    }
}

/// Cubic bezier easing with fixed endpoints (0,0) and (1,1).
///
/// Solves x(p) = t with Newton-Raphson, falling back to bisection when the
/// slope flattens out. Computed in f64.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = f64::from(t);
    let (x1, y1, x2, y2) = (f64::from(x1), f64::from(y1), f64::from(x2), f64::from(y2));

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = x;
    for _ in 0..24 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 14] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseInQuint,
        Easing::EaseOutQuint,
        Easing::EaseInOutQuint,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing} at 1");
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(Easing::EaseOutCubic.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseOutCubic.apply(2.0), 1.0);
    }

    #[test]
    fn test_out_curves_lead_linear() {
        assert!(Easing::EaseOutQuart.apply(0.3) > 0.3);
        assert!(Easing::EaseInQuart.apply(0.3) < 0.3);
        assert!((Easing::EaseInOutCubic.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_power_names() {
        assert_eq!(Easing::from_name("power3.out"), Ok(Easing::EaseOutQuart));
        assert_eq!(Easing::from_name("power2.out"), Ok(Easing::EaseOutCubic));
        assert_eq!(Easing::from_name("power1.inOut"), Ok(Easing::EaseInOutQuad));
        assert_eq!(Easing::from_name("power4.in"), Ok(Easing::EaseInQuint));
        assert_eq!(Easing::from_name("power2"), Ok(Easing::EaseOutCubic));
        assert_eq!(Easing::from_name("none"), Ok(Easing::Linear));
        assert_eq!("quad.in".parse::<Easing>(), Ok(Easing::EaseInQuad));
    }

    #[test]
    fn test_css_names() {
        assert_eq!(
            Easing::from_name("ease-in-out"),
            Ok(Easing::CubicBezier(0.42, 0.0, 0.58, 1.0))
        );
        assert_eq!(
            Easing::from_name("cubic-bezier(0.1, 0.7, 1.0, 0.1)"),
            Ok(Easing::CubicBezier(0.1, 0.7, 1.0, 0.1))
        );
    }

    #[test]
    fn test_unknown_names() {
        assert!(Easing::from_name("bounce.out").is_err());
        assert!(Easing::from_name("power3.sideways").is_err());
        assert!(Easing::from_name("cubic-bezier(1, 2)").is_err());
        assert_eq!(
            Easing::from_name("wobble").unwrap_err().to_string(),
            "unknown easing `wobble`"
        );
    }

    #[test]
    fn test_display_round_trips_names() {
        for name in ["power3.out", "power2.inOut", "linear"] {
            let easing = Easing::from_name(name).unwrap();
            assert_eq!(easing.to_string(), name);
        }
    }

    #[test]
    fn test_css_ease_is_monotonic() {
        let ease = Easing::CubicBezier(0.25, 0.1, 0.25, 1.0);
        let mut previous = 0.0;
        for step in 1..=20 {
            let value = ease.apply(step as f32 / 20.0);
            assert!(value >= previous - 1e-5);
            previous = value;
        }
    }
}
