use crate::model::Vec2;
use super::quad::QuadBezier;

pub fn seg_distance_sq(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32) {
    let vx = x2 - x1; let vy = y2 - y1;
    let wx = px - x1; let wy = py - y1;
    let vv = vx*vx + vy*vy;
    let mut t = if vv > 0.0 { (wx*vx + wy*vy) / vv } else { 0.0 };
    if t < 0.0 { t = 0.0; } else if t > 1.0 { t = 1.0; }
    let projx = x1 + t * vx; let projy = y1 + t * vy;
    let dx = px - projx; let dy = py - projy;
    (dx*dx + dy*dy, t)
}

pub fn dist_point_to_seg_sq(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let (d2, _) = seg_distance_sq(p.x, p.y, a.x, a.y, b.x, b.y);
    d2
}

/// Direction of the vector `from -> to` in degrees, (-180, 180].
pub fn angle_deg(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

pub fn point_in_radius(p: Vec2, center: Vec2, radius: f32) -> bool {
    let dx = p.x - center.x; let dy = p.y - center.y;
    dx*dx + dy*dy <= radius*radius
}

/// Sampled distance from a point to a quadratic curve; returns (d2, t).
pub fn quad_distance_sq(p: Vec2, q: &QuadBezier) -> (f32, f32) {
    let n = 16;
    let mut best_d2 = f32::INFINITY;
    let mut best_t = 0.0;
    let mut prev = q.p0;
    for i in 1..=n {
        let t1 = i as f32 / n as f32;
        let cur = q.eval(t1);
        let (d2, ts) = seg_distance_sq(p.x, p.y, prev.x, prev.y, cur.x, cur.y);
        if d2 < best_d2 { best_d2 = d2; best_t = (i as f32 - 1.0 + ts) / n as f32; }
        prev = cur;
    }
    (best_d2, best_t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_of_axes() {
        let o = Vec2::ZERO;
        assert!((angle_deg(o, Vec2::new(1.0, 0.0)) - 0.0).abs() < 1e-5);
        assert!((angle_deg(o, Vec2::new(0.0, 1.0)) - 90.0).abs() < 1e-4);
        assert!((angle_deg(o, Vec2::new(-1.0, 0.0)) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn radius_is_inclusive() {
        assert!(point_in_radius(Vec2::new(3.0, 4.0), Vec2::ZERO, 5.0));
        assert!(!point_in_radius(Vec2::new(3.0, 4.1), Vec2::ZERO, 5.0));
    }

    #[test]
    fn quad_distance_hits_apex() {
        let q = QuadBezier::new(Vec2::new(0.0, 0.0), Vec2::new(50.0, 100.0), Vec2::new(100.0, 0.0));
        let (d2, t) = quad_distance_sq(Vec2::new(50.0, 50.0), &q);
        assert!(d2 < 1.0, "apex should lie on the curve, d2={}", d2);
        assert!((t - 0.5).abs() < 0.05);
    }
}
