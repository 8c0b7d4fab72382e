//! Quadratic Bézier evaluation and arc-length parametrization.
//!
//! Arc length uses composite 3-point Gauss-Legendre quadrature on the speed
//! `|B'(t)|`; there is no closed form worth the trouble for the inverse, so
//! `parameter_at_arc_length` walks a fixed number of linear substeps.

use super::tolerance::{clamp01, ARC_PANELS, ARC_SUBSTEPS, EPS_LEN};
use crate::model::Vec2;

// Gauss-Legendre nodes and weights on [-1, 1].
const GL_X: [f32; 3] = [-0.774_596_7, 0.0, 0.774_596_7];
const GL_W: [f32; 3] = [5.0 / 9.0, 8.0 / 9.0, 5.0 / 9.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadBezier {
    pub p0: Vec2, // Start anchor
    pub p1: Vec2, // Control point
    pub p2: Vec2, // End anchor
}

impl QuadBezier {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2) -> Self {
        Self { p0, p1, p2 }
    }

    /// Evaluate the curve at parameter t ∈ [0, 1].
    pub fn eval(&self, t: f32) -> Vec2 {
        let mt = 1.0 - t;
        let a = mt * mt;
        let b = 2.0 * mt * t;
        let c = t * t;
        Vec2 {
            x: a * self.p0.x + b * self.p1.x + c * self.p2.x,
            y: a * self.p0.y + b * self.p1.y + c * self.p2.y,
        }
    }

    /// First derivative `B'(t)`.
    pub fn derivative(&self, t: f32) -> Vec2 {
        let mt = 1.0 - t;
        Vec2 {
            x: 2.0 * mt * (self.p1.x - self.p0.x) + 2.0 * t * (self.p2.x - self.p1.x),
            y: 2.0 * mt * (self.p1.y - self.p0.y) + 2.0 * t * (self.p2.y - self.p1.y),
        }
    }

    /// Unit tangent direction at t, falling back to the chord when the
    /// derivative vanishes (control point sitting on an anchor).
    pub fn tangent(&self, t: f32) -> Vec2 {
        self.derivative(t)
            .normalized()
            .or_else(|| (self.p2 - self.p0).normalized())
            .unwrap_or(Vec2::new(1.0, 0.0))
    }

    /// Tangent angle at t in radians.
    pub fn tangent_angle(&self, t: f32) -> f32 {
        let d = self.tangent(t);
        d.y.atan2(d.x)
    }

    #[inline]
    fn speed(&self, t: f32) -> f32 {
        self.derivative(t).length()
    }

    /// Arc length over `[t0, t1]`, one 3-point Gauss-Legendre panel.
    pub fn arc_length_between(&self, t0: f32, t1: f32) -> f32 {
        let half = 0.5 * (t1 - t0);
        let mid = 0.5 * (t1 + t0);
        let mut sum = 0.0;
        for i in 0..3 {
            sum += GL_W[i] * self.speed(mid + half * GL_X[i]);
        }
        sum * half
    }

    /// Arc length from 0 to t.
    pub fn arc_length_to(&self, t: f32) -> f32 {
        let t = clamp01(t);
        let step = t / ARC_PANELS as f32;
        let mut total = 0.0;
        for i in 0..ARC_PANELS {
            let a = i as f32 * step;
            total += self.arc_length_between(a, a + step);
        }
        total
    }

    pub fn arc_length(&self) -> f32 {
        self.arc_length_to(1.0)
    }

    /// Invert arc length to the curve parameter by stepping t in fixed
    /// increments and interpolating inside the substep that crosses the
    /// target. Lengths beyond the curve clamp to 1.
    pub fn parameter_at_arc_length(&self, target: f32) -> f32 {
        if target <= 0.0 {
            return 0.0;
        }
        let dt = 1.0 / ARC_SUBSTEPS as f32;
        let mut acc = 0.0;
        for i in 0..ARC_SUBSTEPS {
            let t0 = i as f32 * dt;
            let len = self.arc_length_between(t0, t0 + dt);
            if acc + len >= target {
                let frac = if len > EPS_LEN { (target - acc) / len } else { 0.0 };
                return clamp01(t0 + frac * dt);
            }
            acc += len;
        }
        1.0
    }

    /// Parameters of axis extrema strictly inside (0, 1).
    pub fn extrema(&self) -> Vec<f32> {
        let mut ts = Vec::with_capacity(2);
        let axis = |a: f32, b: f32, c: f32| {
            let den = a - 2.0 * b + c;
            if den.abs() > EPS_LEN {
                let t = (a - b) / den;
                if t > 0.0 && t < 1.0 {
                    return Some(t);
                }
            }
            None
        };
        if let Some(t) = axis(self.p0.x, self.p1.x, self.p2.x) {
            ts.push(t);
        }
        if let Some(t) = axis(self.p0.y, self.p1.y, self.p2.y) {
            ts.push(t);
        }
        ts
    }
}
