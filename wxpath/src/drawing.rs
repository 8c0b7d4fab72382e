//! Drawing gestures. All points are scene coordinates; while a shape is in
//! `Drawing` state its path frame coincides with the scene.
//!
//! Drag tools (arrow, curved line) sample the pointer while it is held and
//! complete on release. Click tools (poly path, front) append one anchor per
//! pointer-down and drag a floating preview anchor between clicks.

use crate::config::EditorConfig;
use crate::geometry::limits::MAX_SEGMENTS_PER_PATH;
use crate::geometry::tolerance::EPS_POS;
use crate::model::{Segment, ShapeId, ShapeState, Tool, Vec2};
use crate::path::Path;
use crate::shapes::Shape;

/// What a pointer event did to the gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Ignored,
    Updated,
    /// The tool's natural completion gesture happened; caller should finish.
    Complete,
}

#[derive(Clone, Debug)]
pub struct Gesture {
    pub(crate) id: ShapeId,
    pub(crate) tool: Tool,
    preview: bool,
    shift: bool,
}

impl Gesture {
    pub(crate) fn start(id: ShapeId, tool: Tool) -> Self {
        Gesture {
            id,
            tool,
            preview: false,
            shift: false,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub(crate) fn pointer_move(&mut self, shape: &mut Shape, p: Vec2, shift: bool, cfg: &EditorConfig) -> Step {
        if !p.is_finite() {
            return Step::Ignored;
        }
        self.shift = shift;
        if self.tool.is_drag_tool() {
            drag_sample(&mut shape.path, p, shift, cfg.sample_distance);
        } else if self.preview {
            shape.path.set_last_anchor(p);
        } else {
            if shape.path.len() >= MAX_SEGMENTS_PER_PATH {
                return Step::Ignored;
            }
            shape.path.push_line(p);
            self.preview = true;
        }
        shape.follow_offset();
        Step::Updated
    }

    /// Click tools only: fix the current anchor at `p`.
    pub(crate) fn pointer_down(&mut self, shape: &mut Shape, p: Vec2, cfg: &EditorConfig) -> Step {
        if self.tool.is_drag_tool() || !p.is_finite() {
            return Step::Ignored;
        }
        if self.preview {
            shape.path.set_last_anchor(p);
            self.preview = false;
        } else {
            let last = shape.path.anchor(shape.path.len() - 1).unwrap_or(p);
            if last.dist(p) <= EPS_POS || shape.path.len() >= MAX_SEGMENTS_PER_PATH {
                return Step::Ignored;
            }
            shape.path.push_line(p);
        }
        let done = self.tool == Tool::PolyPath && snap_closed(&mut shape.path, cfg.close_tolerance);
        shape.follow_offset();
        if done {
            Step::Complete
        } else {
            Step::Updated
        }
    }

    /// Drag tools only: the release point is the last sample.
    pub(crate) fn pointer_up(&mut self, shape: &mut Shape, p: Vec2, cfg: &EditorConfig) -> Step {
        if !self.tool.is_drag_tool() {
            return Step::Ignored;
        }
        if p.is_finite() {
            drag_sample(&mut shape.path, p, self.shift, cfg.sample_distance);
            shape.follow_offset();
        }
        Step::Complete
    }

    /// Drop the preview anchor and duplicate points, then commit the shape
    /// if it still has two or more segments. Returns whether it committed.
    pub(crate) fn settle(self, shape: &mut Shape) -> bool {
        if self.preview {
            shape.path.pop();
        }
        dedupe(&mut shape.path);
        if shape.path.is_degenerate() {
            return false;
        }
        shape.path.convert_straight_to_curve();
        shape.follow_offset();
        shape.state = ShapeState::Committed;
        shape.refresh_derived();
        true
    }
}

fn drag_sample(path: &mut Path, p: Vec2, shift: bool, sample_distance: f32) {
    if shift {
        path.truncate(1);
        path.push_line(p);
        return;
    }
    let n = path.len();
    if n == 1 {
        path.push_line(p);
        return;
    }
    let prev = path.anchor(n - 2).unwrap_or(p);
    let last = path.anchor(n - 1).unwrap_or(p);
    if prev.dist(last) >= sample_distance && n < MAX_SEGMENTS_PER_PATH {
        path.push_line(p);
    } else {
        path.set_last_anchor(p);
    }
}

/// Snap the last anchor onto the first when it lands within `tol` on a
/// path with at least three distinct corners.
fn snap_closed(path: &mut Path, tol: f32) -> bool {
    let n = path.len();
    if n < 4 {
        return false;
    }
    let (first, last) = match (path.anchor(0), path.anchor(n - 1)) {
        (Some(f), Some(l)) => (f, l),
        _ => return false,
    };
    if first.dist(last) > tol {
        return false;
    }
    path.set_last_anchor(first);
    true
}

fn dedupe(path: &mut Path) {
    let segs = path.segments();
    let mut kept: Vec<Segment> = Vec::with_capacity(segs.len());
    for s in segs {
        if let Some(prev) = kept.last() {
            if prev.anchor().dist(s.anchor()) <= EPS_POS {
                continue;
            }
        }
        kept.push(*s);
    }
    if kept.len() != segs.len() {
        if let Some(p) = Path::from_segments(kept) {
            *path = p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ArrowHeads, ShapeKind};
    use crate::shapes::{FrontLine, PolyPath};

    fn cfg() -> EditorConfig {
        EditorConfig::default()
    }

    #[test]
    fn shift_drag_yields_straight_two_anchor_path() {
        let mut s = Shape::new(0, ShapeKind::Arrow(ArrowHeads::default()), Vec2::ZERO);
        let mut g = Gesture::start(0, Tool::Arrow);
        for x in [10.0, 35.0, 60.0, 100.0] {
            g.pointer_move(&mut s, Vec2::new(x, 3.0), true, &cfg());
        }
        assert_eq!(g.pointer_up(&mut s, Vec2::new(100.0, 0.0), &cfg()), Step::Complete);
        assert!(g.settle(&mut s));
        assert_eq!(s.scene_anchors(), vec![Vec2::ZERO, Vec2::new(100.0, 0.0)]);
        assert!(s.path().segments()[1].is_curve());
    }

    #[test]
    fn freehand_samples_by_distance() {
        let mut s = Shape::new(0, ShapeKind::Arrow(ArrowHeads::default()), Vec2::ZERO);
        let mut g = Gesture::start(0, Tool::Arrow);
        for i in 1..=40 {
            g.pointer_move(&mut s, Vec2::new(i as f32, 0.0), false, &cfg());
        }
        // 8px sampling over 40px of travel.
        assert_eq!(s.path().len(), 6);
        let a = s.scene_anchors();
        assert_eq!(*a.last().unwrap(), Vec2::new(40.0, 0.0));
    }

    #[test]
    fn click_tool_drops_preview_on_settle() {
        let mut s = Shape::new(0, ShapeKind::WeatherFront(FrontLine::default()), Vec2::ZERO);
        let mut g = Gesture::start(0, Tool::WeatherFront);
        g.pointer_move(&mut s, Vec2::new(50.0, 0.0), false, &cfg());
        g.pointer_down(&mut s, Vec2::new(100.0, 0.0), &cfg());
        g.pointer_move(&mut s, Vec2::new(150.0, 20.0), false, &cfg());
        assert_eq!(s.path().len(), 3);
        assert!(g.settle(&mut s));
        assert_eq!(s.path().len(), 2);
        assert_eq!(s.state(), ShapeState::Committed);
    }

    #[test]
    fn poly_path_snaps_closed_near_start() {
        let mut s = Shape::new(0, ShapeKind::PolyPath(PolyPath), Vec2::ZERO);
        let mut g = Gesture::start(0, Tool::PolyPath);
        assert_eq!(g.pointer_down(&mut s, Vec2::new(100.0, 0.0), &cfg()), Step::Updated);
        assert_eq!(g.pointer_down(&mut s, Vec2::new(100.0, 100.0), &cfg()), Step::Updated);
        assert_eq!(g.pointer_down(&mut s, Vec2::new(4.0, 3.0), &cfg()), Step::Complete);
        assert!(g.settle(&mut s));
        assert_eq!(s.scene_anchors().last().copied(), Some(Vec2::ZERO));
        assert!(s.is_closed(cfg().close_tolerance));
    }

    #[test]
    fn single_click_is_discarded() {
        let mut s = Shape::new(0, ShapeKind::PolyPath(PolyPath), Vec2::new(5.0, 5.0));
        let mut g = Gesture::start(0, Tool::PolyPath);
        g.pointer_move(&mut s, Vec2::new(30.0, 5.0), false, &cfg());
        assert!(!g.settle(&mut s));
        assert_eq!(s.state(), ShapeState::Drawing);
    }
}
