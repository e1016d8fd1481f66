//! CSS style timing functions.

/// A cubic bezier timing curve through (0, 0) and (1, 1),
/// the same shape as CSS `cubic-bezier(x1, y1, x2, y2)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// CSS `ease`.
pub const EASE: CubicBezier = CubicBezier::new(0.25, 0.1, 0.25, 1.0);

pub const LINEAR: CubicBezier = CubicBezier::new(0.0, 0.0, 1.0, 1.0);

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 24;
const EPSILON: f32 = 1e-6;

fn bezier(t: f32, p1: f32, p2: f32) -> f32 {
    // Bernstein form with p0 = 0 and p3 = 1.
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Maps linear progress `x` in `0..=1` to eased progress.
    pub fn apply(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }

        if x >= 1.0 {
            return 1.0;
        }

        let t = self.solve_t(x);
        bezier(t, self.y1, self.y2)
    }

    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;

        for _ in 0..NEWTON_ITERATIONS {
            let err = bezier(t, self.x1, self.x2) - x;

            if err.abs() < EPSILON {
                return t;
            }

            let slope = bezier_slope(t, self.x1, self.x2);

            if slope.abs() < EPSILON {
                break;
            }

            t -= err / slope;
        }

        // Newton wandered off or stalled on a flat spot.
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = x;

        for _ in 0..BISECTION_ITERATIONS {
            let v = bezier(t, self.x1, self.x2);

            if (v - x).abs() < EPSILON {
                break;
            }

            if v < x {
                lo = t;
            } else {
                hi = t;
            }

            t = (lo + hi) * 0.5;
        }

        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        assert_eq!(EASE.apply(0.0), 0.0);
        assert_eq!(EASE.apply(1.0), 1.0);
        assert_eq!(EASE.apply(-3.0), 0.0);
        assert_eq!(EASE.apply(7.0), 1.0);
    }

    #[test]
    fn linear_is_identity() {
        for i in 1..10 {
            let x = i as f32 / 10.0;
            assert!((LINEAR.apply(x) - x).abs() < 1e-4);
        }
    }

    #[test]
    fn ease_is_monotonic_and_front_loaded() {
        let mut prev = 0.0;

        for i in 1..=100 {
            let y = EASE.apply(i as f32 / 100.0);
            assert!(y + 1e-5 >= prev);
            prev = y;
        }

        // CSS ease reaches ~0.8 of the way at half time.
        let mid = EASE.apply(0.5);
        assert!(mid > 0.75 && mid < 0.85, "{mid}");
    }
}
