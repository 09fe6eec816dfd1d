//! Easing curves shared by the animation timeline and the smooth-scroll driver.

use serde::{Deserialize, Serialize};

/// Control points of the signature section curve (a steep ease-in-out).
const SECTION_CURVE: (f32, f32, f32, f32) = (0.86, 0.0, 0.07, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    #[default]
    Linear,
    Power1Out,
    Power2Out,
    CubicOut,
    ExpoOut,
    Custom,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            // power2 counts from zero, so it is the cubic curve.
            Ease::Power2Out | Ease::CubicOut => 1.0 - (1.0 - t).powi(3),
            Ease::ExpoOut => (1.001 - 2f32.powf(-10.0 * t)).min(1.0),
            Ease::Custom => {
                let (x1, y1, x2, y2) = SECTION_CURVE;
                cubic_bezier(x1, y1, x2, y2, t)
            }
        }
    }
}

/// Evaluate a CSS-style cubic bezier timing function at `x`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let curve = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    // Newton first, bisection when the slope flattens out.
    let mut s = x;
    for _ in 0..8 {
        let err = curve(x1, x2, s) - x;
        if err.abs() < 1e-6 {
            return curve(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = x;
    for _ in 0..40 {
        let value = curve(x1, x2, s);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    curve(y1, y2, s)
}
