//! Control-point overlay: draggable handles bound to a shape's path.
//!
//! Each handle remembers which segment it edits and, once bound, its
//! `relationship`: `inverse(shape matrix) · handle matrix`. Shape-level
//! moves and rotations reposition handles through that matrix alone;
//! handle drags write straight back into the path.

use crate::geometry::affine::Affine;
use crate::model::{HandleRole, Segment, Vec2};
use crate::path::Path;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPoint {
    pub segment_index: usize,
    pub role: HandleRole,
    /// Scene position of the handle center.
    pub center: Vec2,
    /// Degrees.
    pub angle: f32,
    #[serde(skip)]
    pub(crate) relationship: Option<Affine>,
}

impl ControlPoint {
    fn new(segment_index: usize, role: HandleRole, center: Vec2) -> Self {
        ControlPoint {
            segment_index,
            role,
            center,
            angle: 0.0,
            relationship: None,
        }
    }

    pub fn matrix(&self) -> Affine {
        Affine::translate(self.center.x, self.center.y).mul(&Affine::rotate_deg(self.angle))
    }

    pub fn relationship(&self) -> Option<Affine> {
        self.relationship
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlOverlay {
    pub(crate) handles: Vec<ControlPoint>,
    pub(crate) closed: bool,
}

impl ControlOverlay {
    /// Create handles for every anchor and curve control of `path`.
    ///
    /// `to_scene` maps path coordinates to the scene (shape matrix with the
    /// path offset folded in). Segment 0 gets a start handle; every later
    /// segment gets a midpoint handle when curved and an end handle unless
    /// it closes the path onto the start anchor.
    pub fn rebuild(path: &Path, to_scene: &Affine, close_tol: f32) -> ControlOverlay {
        let closed = path.is_closed(close_tol);
        let segs = path.segments();
        let last = segs.len().saturating_sub(1);
        let mut handles = Vec::with_capacity(segs.len() * 2);
        for (i, seg) in segs.iter().enumerate() {
            if i == 0 {
                handles.push(ControlPoint::new(0, HandleRole::Start, to_scene.apply(seg.anchor())));
                continue;
            }
            if let Some(ctrl) = seg.control() {
                handles.push(ControlPoint::new(i, HandleRole::MidPoint, to_scene.apply(ctrl)));
            }
            if !(closed && i == last) {
                handles.push(ControlPoint::new(i, HandleRole::End, to_scene.apply(seg.anchor())));
            }
        }
        ControlOverlay { handles, closed }
    }

    pub fn handles(&self) -> &[ControlPoint] {
        &self.handles
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Capture every handle's placement relative to the shape. A singular
    /// shape matrix leaves relationships unbound.
    pub fn bind(&mut self, shape_matrix: &Affine) {
        let inv = shape_matrix.invert();
        for h in self.handles.iter_mut() {
            h.relationship = inv.map(|inv| inv.mul(&h.matrix()));
        }
    }

    /// Reposition handles from `shape_matrix · relationship`. Unbound
    /// handles stay where they are.
    pub fn sync_from_shape_transform(&mut self, shape_matrix: &Affine) {
        for h in self.handles.iter_mut() {
            let rel = match h.relationship {
                Some(rel) => rel,
                None => continue,
            };
            let d = shape_matrix.mul(&rel).decompose();
            h.center = Vec2::new(d.translate_x, d.translate_y);
            h.angle = d.angle;
        }
    }

    pub(crate) fn set_handle_center(&mut self, idx: usize, p: Vec2) -> bool {
        match self.handles.get_mut(idx) {
            Some(h) => {
                h.center = p;
                true
            }
            None => false,
        }
    }

    /// Write handle `idx`'s current position into the path. `to_local`
    /// maps scene coordinates into the path frame. Dragging the start of a
    /// closed path drags the closing anchor with it.
    pub(crate) fn write_handle(&self, idx: usize, path: &mut Path, to_local: &Affine) -> bool {
        let h = match self.handles.get(idx) {
            Some(h) => h,
            None => return false,
        };
        let p = to_local.apply(h.center);
        if !p.is_finite() {
            return false;
        }
        let closed = self.closed;
        let segs = path.segments_mut();
        let n = segs.len();
        if h.segment_index >= n {
            return false;
        }
        match h.role {
            HandleRole::Start => {
                *segs[h.segment_index].anchor_mut() = p;
                if closed && n > 1 {
                    *segs[n - 1].anchor_mut() = p;
                }
            }
            HandleRole::End => *segs[h.segment_index].anchor_mut() = p,
            HandleRole::MidPoint => match &mut segs[h.segment_index] {
                Segment::QuadTo { ctrl, .. } => *ctrl = p,
                _ => return false,
            },
        }
        true
    }
}
