//! CSS-style `cubic-bezier()` timing curves.
//!
//! The curve runs from `(0, 0)` to `(1, 1)` through two control points; for a
//! progress value `x` we solve for the curve parameter and return its `y`.

use serde::{Deserialize, Serialize};

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;
const EPSILON: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Default for CubicBezier {
    /// Fast start with a long, soft run-out: the wheel's deceleration curve.
    fn default() -> Self {
        Self::new(0.17, 0.67, 0.12, 0.99)
    }
}

impl CubicBezier {
    pub const LINEAR: CubicBezier = CubicBezier { x1: 0.0, y1: 0.0, x2: 1.0, y2: 1.0 };

    /// `x1` and `x2` are clamped into `[0, 1]` so the curve stays a function of x.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1: x1.clamp(0.0, 1.0), y1, x2: x2.clamp(0.0, 1.0), y2 }
    }

    fn sample(p1: f64, p2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn sample_derivative(p1: f64, p2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = Self::sample(self.x1, self.x2, t) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let d = Self::sample_derivative(self.x1, self.x2, t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let v = Self::sample(self.x1, self.x2, t);
            if (v - x).abs() < EPSILON {
                break;
            }
            if v < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    /// Eased progress for linear progress `x` in `[0, 1]`.
    pub fn ease(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        Self::sample(self.y1, self.y2, self.solve_t(x))
    }

    pub fn to_css(&self) -> String {
        format!("cubic-bezier({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        let curve = CubicBezier::default();
        assert_eq!(curve.ease(0.0), 0.0);
        assert_eq!(curve.ease(1.0), 1.0);
        assert_eq!(curve.ease(-3.0), 0.0);
        assert_eq!(curve.ease(7.0), 1.0);
    }

    #[test]
    fn linear_curve_is_identity() {
        for i in 0..=20 {
            let x = i as f64 / 20.0;
            assert!((CubicBezier::LINEAR.ease(x) - x).abs() < 1e-5);
        }
    }

    #[test]
    fn wheel_curve_front_loads_motion() {
        let curve = CubicBezier::default();
        assert!(curve.ease(0.25) > 0.6);
        let mut prev = 0.0;
        for i in 1..=100 {
            let y = curve.ease(i as f64 / 100.0);
            assert!(y >= prev - 1e-9, "curve went backwards at {i}");
            prev = y;
        }
    }

    #[test]
    fn css_form() {
        assert_eq!(
            CubicBezier::default().to_css(),
            "cubic-bezier(0.17, 0.67, 0.12, 0.99)"
        );
    }
}
