pub mod model;
pub mod geometry {
    pub mod affine;
    pub mod limits;
    pub mod math;
    pub mod path_length;
    pub mod quad;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod decoration;
    pub mod picking;
}
pub mod clipboard;
pub mod config;
pub mod drawing;
pub mod error;
pub mod history;
pub mod overlay;
pub mod path;
pub mod shapes;
pub mod transform;
mod json;

pub use json::SCENE_VERSION;

use clipboard::ClipboardService;
use config::EditorConfig;
use drawing::{Gesture, Step};
use error::PersistError;
use geometry::affine::Affine;
use geometry::limits;
use history::HistoryStack;
use model::{
    ArrowHeadStyle, Color, FrontType, Phase, ShapeId, ShapeState, Tool, TransformKind, Vec2,
};
use overlay::ControlPoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shapes::{Shape, ShapeKind};
use transform::ObjectTransform;

pub struct Editor {
    pub(crate) shapes: Vec<Option<Shape>>, // id is index
    pub(crate) order: Vec<ShapeId>,        // back to front
    pub(crate) selection: Vec<ShapeId>,
    pub(crate) gesture: Option<Gesture>,
    pub(crate) tool: Tool,
    pub(crate) config: EditorConfig,
    pub(crate) history: HistoryStack,
    pub(crate) clipboard: ClipboardService,
    pub(crate) viewport: Affine,
    pub(crate) version: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Pick {
    #[serde(rename = "handle")]
    Handle { shape: ShapeId, index: usize, dist: f32 },
    #[serde(rename = "shape")]
    Shape { id: ShapeId, segment: usize, t: f32, dist: f32 },
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let mut ed = Editor {
            shapes: Vec::new(),
            order: Vec::new(),
            selection: Vec::new(),
            gesture: None,
            tool: Tool::Arrow,
            history: HistoryStack::new(config.history_capacity),
            config,
            clipboard: ClipboardService::new(),
            viewport: Affine::IDENTITY,
            version: 1,
        };
        ed.checkpoint();
        ed
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    // Configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EditorConfig) -> bool {
        if config.validate().is_err() {
            return false;
        }
        self.history.set_capacity(config.history_capacity);
        self.config = config;
        true
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switching tools ends any gesture and leaves edit mode.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.gesture.is_some() {
            self.finish_drawing();
        }
        self.exit_all_edit_modes();
        self.tool = tool;
    }

    // Shapes
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id as usize).and_then(|s| s.as_ref())
    }

    pub(crate) fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id as usize).and_then(|s| s.as_mut())
    }

    /// Shape ids in z-order, back to front.
    pub fn shape_ids(&self) -> &[ShapeId] {
        &self.order
    }

    pub fn shape_count(&self) -> usize {
        self.order.len()
    }

    /// Ids are arena slots and are not reused once a shape has been
    /// committed, so a session allocates at most `MAX_SHAPE_ID + 1`.
    fn alloc_id(&self) -> Option<ShapeId> {
        let id = self.shapes.len();
        if self.order.len() >= limits::MAX_SHAPES || id > limits::MAX_SHAPE_ID as usize {
            log::warn!("shape limit reached");
            return None;
        }
        Some(id as ShapeId)
    }

    fn insert(&mut self, shape: Shape) {
        let id = shape.id;
        let slot = id as usize;
        if slot >= self.shapes.len() {
            self.shapes.resize_with(slot + 1, || None);
        }
        self.shapes[slot] = Some(shape);
        self.order.push(id);
    }

    fn discard(&mut self, id: ShapeId) {
        if let Some(slot) = self.shapes.get_mut(id as usize) {
            *slot = None;
        }
        self.order.retain(|&o| o != id);
        self.selection.retain(|&o| o != id);
    }

    pub fn delete_shapes(&mut self, ids: &[ShapeId]) -> usize {
        let mut n = 0;
        for &id in ids {
            if self.shape(id).is_none() {
                continue;
            }
            if self.gesture.as_ref().map(|g| g.id) == Some(id) {
                self.gesture = None;
            }
            self.discard(id);
            n += 1;
        }
        if n > 0 {
            self.bump();
            self.checkpoint();
        }
        n
    }

    // Z-order
    fn reorder(&mut self, id: ShapeId, to: impl FnOnce(usize, usize) -> usize) -> bool {
        let from = match self.order.iter().position(|&o| o == id) {
            Some(i) => i,
            None => return false,
        };
        let to = to(from, self.order.len() - 1);
        if to == from {
            return false;
        }
        let id = self.order.remove(from);
        self.order.insert(to, id);
        self.bump();
        self.checkpoint();
        true
    }

    pub fn bring_to_front(&mut self, id: ShapeId) -> bool {
        self.reorder(id, |_, last| last)
    }

    pub fn send_to_back(&mut self, id: ShapeId) -> bool {
        self.reorder(id, |_, _| 0)
    }

    pub fn bring_forward(&mut self, id: ShapeId) -> bool {
        self.reorder(id, |i, last| (i + 1).min(last))
    }

    pub fn send_backward(&mut self, id: ShapeId) -> bool {
        self.reorder(id, |i, _| i.saturating_sub(1))
    }

    // Selection and edit mode
    pub fn selection(&self) -> &[ShapeId] {
        &self.selection
    }

    /// Replace the selection. Unknown ids are ignored; returns how many
    /// shapes ended up selected. Anything in edit mode that is no longer
    /// the single selected shape leaves edit mode.
    pub fn select(&mut self, ids: &[ShapeId]) -> usize {
        let mut sel: Vec<ShapeId> = Vec::with_capacity(ids.len());
        for &id in ids {
            let ok = self.shape(id).map_or(false, |s| s.state != ShapeState::Drawing);
            if ok && !sel.contains(&id) {
                sel.push(id);
            }
        }
        self.selection = sel;
        let keep = if self.selection.len() == 1 { Some(self.selection[0]) } else { None };
        self.exit_edit_modes_except(keep);
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.select(&[]);
    }

    fn exit_edit_modes_except(&mut self, keep: Option<ShapeId>) {
        let mut changed = false;
        for s in self.shapes.iter_mut().flatten() {
            if Some(s.id) != keep && s.exit_edit_mode() {
                changed = true;
            }
        }
        if changed {
            self.bump();
        }
    }

    fn exit_all_edit_modes(&mut self) {
        self.exit_edit_modes_except(None);
    }

    /// Double-click: enter edit mode on a committed shape, leave it on one
    /// already editing.
    pub fn toggle_edit_mode(&mut self, id: ShapeId) -> bool {
        match self.shape(id).map(|s| s.state) {
            Some(ShapeState::Editing) => self.exit_edit_mode(id),
            Some(ShapeState::Committed) => self.enter_edit_mode(id),
            _ => false,
        }
    }

    pub fn enter_edit_mode(&mut self, id: ShapeId) -> bool {
        if self.shape(id).map(|s| s.state) != Some(ShapeState::Committed) {
            return false;
        }
        self.select(&[id]);
        let close_tol = self.config.close_tolerance;
        let entered = self.shape_mut(id).map_or(false, |s| s.enter_edit_mode(close_tol));
        if entered {
            self.bump();
        }
        entered
    }

    pub fn exit_edit_mode(&mut self, id: ShapeId) -> bool {
        let exited = self.shape_mut(id).map_or(false, |s| s.exit_edit_mode());
        if exited {
            self.bump();
        }
        exited
    }

    /// Handles are shown only for a single selected shape in edit mode.
    pub fn visible_handles(&self) -> Option<(ShapeId, &[ControlPoint])> {
        if self.selection.len() != 1 {
            return None;
        }
        let id = self.selection[0];
        let s = self.shape(id)?;
        if s.state != ShapeState::Editing {
            return None;
        }
        s.overlay.as_ref().map(|o| (id, o.handles()))
    }

    // Path editing
    fn editable(&self, id: ShapeId) -> bool {
        self.shape(id).map_or(false, |s| s.state != ShapeState::Drawing)
    }

    pub fn convert_to_curve(&mut self, id: ShapeId) -> bool {
        if !self.editable(id) {
            return false;
        }
        let close_tol = self.config.close_tolerance;
        let changed = self.shape_mut(id).map_or(false, |s| s.convert_to_curve(close_tol));
        if changed {
            self.bump();
            self.checkpoint();
        }
        changed
    }

    /// Insert an anchor at scene point (x, y) on the nearest chord within
    /// `insert_tolerance`.
    pub fn add_point(&mut self, id: ShapeId, x: f32, y: f32) -> Option<usize> {
        if !self.editable(id) || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let tol = self.config.insert_tolerance;
        let close_tol = self.config.close_tolerance;
        let idx = self.shape_mut(id)?.add_point(Vec2::new(x, y), tol, close_tol)?;
        self.bump();
        self.checkpoint();
        Some(idx)
    }

    /// Remove the anchor within `remove_tolerance` of scene point (x, y).
    pub fn remove_point(&mut self, id: ShapeId, x: f32, y: f32) -> Option<usize> {
        if !self.editable(id) || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let tol = self.config.remove_tolerance;
        let close_tol = self.config.close_tolerance;
        let idx = self.shape_mut(id)?.remove_point(Vec2::new(x, y), tol, close_tol)?;
        self.bump();
        self.checkpoint();
        Some(idx)
    }

    // Transforms
    /// Run the follow-up steps after a shape's transform changed:
    ///
    /// 1. Move/Rotate: handles follow through their relationships, then
    ///    rebind. Scale (live): handles follow only. Scale (commit): bake
    ///    the scale into the path, then rebuild and bind handles.
    /// 2. Regenerate derived geometry.
    /// 3. On commit, record a history snapshot.
    pub fn on_shape_transformed(&mut self, id: ShapeId, kind: TransformKind, phase: Phase) -> bool {
        if !self.editable(id) {
            return false;
        }
        let close_tol = self.config.close_tolerance;
        let shape = match self.shape_mut(id) {
            Some(s) => s,
            None => return false,
        };
        match (kind, phase) {
            (TransformKind::Move, _) | (TransformKind::Rotate, _) => {
                shape.sync_overlay();
                shape.bind_overlay();
            }
            (TransformKind::Scale, Phase::Live) => shape.sync_overlay(),
            (TransformKind::Scale, Phase::Commit) => {
                if shape.bake_scale() && shape.overlay.is_some() {
                    shape.rebuild_overlay(close_tol);
                } else {
                    shape.bind_overlay();
                }
            }
        }
        shape.refresh_derived();
        self.bump();
        if phase == Phase::Commit {
            self.checkpoint();
        }
        true
    }

    /// Host-driven transform update (drag, rotate or scale gizmo).
    pub fn set_shape_transform(
        &mut self,
        id: ShapeId,
        xf: ObjectTransform,
        kind: TransformKind,
        phase: Phase,
    ) -> bool {
        if !xf.is_finite() || !limits::in_scale_bounds(xf.scale_x) || !limits::in_scale_bounds(xf.scale_y) {
            return false;
        }
        if !self.editable(id) {
            return false;
        }
        if let Some(s) = self.shape_mut(id) {
            s.xf = xf;
        }
        self.on_shape_transformed(id, kind, phase)
    }

    pub fn translate_shape(&mut self, id: ShapeId, dx: f32, dy: f32) -> bool {
        let mut xf = match self.shape(id) {
            Some(s) => s.xf,
            None => return false,
        };
        xf.center = xf.center + Vec2::new(dx, dy);
        self.set_shape_transform(id, xf, TransformKind::Move, Phase::Commit)
    }

    /// Rotate about the shape center by `deg` degrees.
    pub fn rotate_shape(&mut self, id: ShapeId, deg: f32) -> bool {
        let mut xf = match self.shape(id) {
            Some(s) => s.xf,
            None => return false,
        };
        xf.angle = (xf.angle + deg).rem_euclid(360.0);
        self.set_shape_transform(id, xf, TransformKind::Rotate, Phase::Commit)
    }

    pub fn scale_shape(&mut self, id: ShapeId, sx: f32, sy: f32) -> bool {
        let mut xf = match self.shape(id) {
            Some(s) => s.xf,
            None => return false,
        };
        xf.scale_x *= sx;
        xf.scale_y *= sy;
        self.set_shape_transform(id, xf, TransformKind::Scale, Phase::Commit)
    }

    /// A handle was dragged to scene point (x, y):
    ///
    /// 1. Move the handle and write it into its path segment.
    /// 2. Recompute dimensions, keeping untouched points in place.
    /// 3. Rebind handles (the shape center may have shifted).
    /// 4. Regenerate derived geometry.
    /// 5. On commit, rebuild the overlay and record history.
    pub fn on_handle_dragged(&mut self, id: ShapeId, handle: usize, x: f32, y: f32, phase: Phase) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let close_tol = self.config.close_tolerance;
        let shape = match self.shape_mut(id) {
            Some(s) if s.state == ShapeState::Editing => s,
            _ => return false,
        };
        let moved = shape
            .overlay
            .as_mut()
            .map_or(false, |o| o.set_handle_center(handle, Vec2::new(x, y)));
        if !moved || !shape.apply_handle(handle) {
            return false;
        }
        if phase == Phase::Commit {
            shape.rebuild_overlay(close_tol);
        } else {
            shape.bind_overlay();
        }
        shape.refresh_derived();
        self.bump();
        if phase == Phase::Commit {
            self.checkpoint();
        }
        true
    }

    /// Live group scaling: shapes take the group's scale factors and front
    /// symbols are suppressed until `on_selection_scaled`.
    pub fn on_selection_scaling(&mut self, ids: &[ShapeId], sx: f32, sy: f32) -> bool {
        if !limits::in_scale_bounds(sx) || !limits::in_scale_bounds(sy) {
            return false;
        }
        let mut any = false;
        for &id in ids {
            if !self.editable(id) {
                continue;
            }
            if let Some(s) = self.shape_mut(id) {
                s.group_scaling = true;
                s.xf.scale_x = sx;
                s.xf.scale_y = sy;
                s.sync_overlay();
                s.refresh_derived();
                any = true;
            }
        }
        if any {
            self.bump();
        }
        any
    }

    pub fn on_selection_scaled(&mut self, ids: &[ShapeId]) -> bool {
        let close_tol = self.config.close_tolerance;
        let mut any = false;
        for &id in ids {
            if !self.editable(id) {
                continue;
            }
            if let Some(s) = self.shape_mut(id) {
                s.group_scaling = false;
                if s.bake_scale() && s.overlay.is_some() {
                    s.rebuild_overlay(close_tol);
                }
                s.refresh_derived();
                any = true;
            }
        }
        if any {
            self.bump();
            self.checkpoint();
        }
        any
    }

    // Style and variant setters
    fn mutate_shape(&mut self, id: ShapeId, f: impl FnOnce(&mut Shape) -> bool) -> bool {
        if !self.editable(id) {
            return false;
        }
        let changed = match self.shape_mut(id) {
            Some(s) => {
                let changed = f(s);
                if changed {
                    s.refresh_derived();
                }
                changed
            }
            None => false,
        };
        if changed {
            self.bump();
            self.checkpoint();
        }
        changed
    }

    /// Also resets the stroke to the front type's color.
    pub fn set_front_type(&mut self, id: ShapeId, front_type: FrontType) -> bool {
        self.mutate_shape(id, |s| match &mut s.kind {
            ShapeKind::WeatherFront(f) => {
                f.front_type = front_type;
                s.stroke = front_type.stroke_color();
                true
            }
            _ => false,
        })
    }

    pub fn set_front_spacing(&mut self, id: ShapeId, spacing: f32) -> bool {
        if !spacing.is_finite() || spacing <= 0.0 || spacing > limits::SPACING_MAX {
            return false;
        }
        self.mutate_shape(id, |s| match &mut s.kind {
            ShapeKind::WeatherFront(f) => {
                f.spacing = spacing;
                true
            }
            _ => false,
        })
    }

    pub fn set_front_symbol_size(&mut self, id: ShapeId, size: f32) -> bool {
        if !limits::in_width_bounds(size) {
            return false;
        }
        self.mutate_shape(id, |s| match &mut s.kind {
            ShapeKind::WeatherFront(f) => {
                f.symbol_size = size;
                true
            }
            _ => false,
        })
    }

    pub fn set_front_reflect(&mut self, id: ShapeId, reflect: bool) -> bool {
        self.mutate_shape(id, |s| match &mut s.kind {
            ShapeKind::WeatherFront(f) => {
                f.reflect = reflect;
                true
            }
            _ => false,
        })
    }

    pub fn set_arrow_heads(&mut self, id: ShapeId, start: ArrowHeadStyle, end: ArrowHeadStyle) -> bool {
        self.mutate_shape(id, |s| match &mut s.kind {
            ShapeKind::Arrow(h) => {
                h.start = start;
                h.end = end;
                true
            }
            _ => false,
        })
    }

    pub fn set_stroke_width(&mut self, id: ShapeId, width: f32) -> bool {
        if !limits::in_width_bounds(width) {
            return false;
        }
        self.mutate_shape(id, |s| {
            s.stroke_width = width;
            true
        })
    }

    pub fn set_stroke(&mut self, id: ShapeId, color: Color) -> bool {
        self.mutate_shape(id, |s| {
            s.stroke = color;
            true
        })
    }

    pub fn set_visible(&mut self, id: ShapeId, visible: bool) -> bool {
        self.mutate_shape(id, |s| {
            s.visible = visible;
            true
        })
    }

    pub fn set_name(&mut self, id: ShapeId, name: &str) -> bool {
        if name.len() > limits::MAX_NAME_LEN {
            return false;
        }
        self.mutate_shape(id, |s| {
            s.name = name.to_string();
            true
        })
    }

    // Drawing
    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn drawing_shape(&self) -> Option<ShapeId> {
        self.gesture.as_ref().map(|g| g.id)
    }

    /// First pointer-down of a gesture at scene point (x, y).
    pub fn begin_draw(&mut self, tool: Tool, x: f32, y: f32) -> Option<ShapeId> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        if self.gesture.is_some() {
            self.finish_drawing();
        }
        self.exit_all_edit_modes();
        self.selection.clear();
        self.tool = tool;
        let id = self.alloc_id()?;
        let kind = ShapeKind::for_tool(tool, &self.config);
        self.insert(Shape::new(id, kind, Vec2::new(x, y)));
        self.gesture = Some(Gesture::start(id, tool));
        self.bump();
        Some(id)
    }

    fn gesture_step(&mut self, f: impl FnOnce(&mut Gesture, &mut Shape, &EditorConfig) -> Step) -> Step {
        let id = match self.gesture.as_ref() {
            Some(g) => g.id,
            None => return Step::Ignored,
        };
        let shape = match self.shapes.get_mut(id as usize).and_then(|s| s.as_mut()) {
            Some(s) => s,
            None => {
                self.gesture = None;
                return Step::Ignored;
            }
        };
        let step = match self.gesture.as_mut() {
            Some(g) => f(g, shape, &self.config),
            None => Step::Ignored,
        };
        if step != Step::Ignored {
            self.bump();
        }
        step
    }

    pub fn draw_pointer_move(&mut self, x: f32, y: f32, shift: bool) -> bool {
        let p = Vec2::new(x, y);
        self.gesture_step(|g, s, cfg| g.pointer_move(s, p, shift, cfg)) != Step::Ignored
    }

    /// Click tools: fix an anchor. Finishes the gesture when a poly path
    /// closes on its start.
    pub fn draw_pointer_down(&mut self, x: f32, y: f32) -> bool {
        let p = Vec2::new(x, y);
        match self.gesture_step(|g, s, cfg| g.pointer_down(s, p, cfg)) {
            Step::Ignored => false,
            Step::Updated => true,
            Step::Complete => {
                self.finish_drawing();
                true
            }
        }
    }

    /// Drag tools: release completes the gesture.
    pub fn draw_pointer_up(&mut self, x: f32, y: f32) -> Option<ShapeId> {
        let p = Vec2::new(x, y);
        match self.gesture_step(|g, s, cfg| g.pointer_up(s, p, cfg)) {
            Step::Complete => self.finish_drawing(),
            _ => None,
        }
    }

    /// Enter, double-click or natural completion. Commits the shape with
    /// the points so far, or discards it when fewer than two remain.
    pub fn finish_drawing(&mut self) -> Option<ShapeId> {
        let g = self.gesture.take()?;
        let id = g.id;
        let committed = match self.shape_mut(id) {
            Some(s) => g.settle(s),
            None => return None,
        };
        self.bump();
        if committed {
            log::debug!("shape {} committed", id);
            self.checkpoint();
            Some(id)
        } else {
            log::debug!("shape {} discarded: fewer than two segments", id);
            self.discard(id);
            // Never saved or snapshotted, so its id can be handed out again.
            if id as usize + 1 == self.shapes.len() {
                self.shapes.pop();
            }
            None
        }
    }

    /// Escape or outside click. Same outcome as `finish_drawing`.
    pub fn abort_drawing(&mut self) -> Option<ShapeId> {
        if let Some(g) = self.gesture.as_ref() {
            log::debug!("gesture on shape {} aborted", g.id);
        }
        self.finish_drawing()
    }

    // Hit testing and viewport
    pub fn pick(&self, x: f32, y: f32, tol: f32) -> Option<Pick> {
        algorithms::picking::pick_impl(self, x, y, tol)
    }

    pub fn viewport(&self) -> Affine {
        self.viewport
    }

    pub fn set_viewport(&mut self, m: Affine) -> bool {
        if !m.is_finite() || m.invert().is_none() {
            return false;
        }
        self.viewport = m;
        self.bump();
        true
    }

    /// Screen pointer to scene coordinates.
    pub fn to_scene(&self, x: f32, y: f32) -> Option<Vec2> {
        let p = self.viewport.invert()?.apply(Vec2::new(x, y));
        if p.is_finite() {
            Some(p)
        } else {
            None
        }
    }

    // History
    pub fn checkpoint(&mut self) {
        let snap = json::to_json_impl(self);
        self.history.push(snap);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo().cloned() {
            Some(v) => self.restore(&v),
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo().cloned() {
            Some(v) => self.restore(&v),
            None => false,
        }
    }

    /// Snapshots carry the viewport but undo never pans the view.
    fn restore(&mut self, snap: &Value) -> bool {
        let viewport = self.viewport;
        let ok = json::from_json_impl(self, snap);
        self.viewport = viewport;
        ok
    }

    // Clipboard
    pub fn copy_selection(&mut self) -> usize {
        let items: Vec<Value> = self
            .order
            .iter()
            .filter(|id| self.selection.contains(id))
            .filter_map(|&id| self.shape_to_json(id))
            .collect();
        let n = items.len();
        if n > 0 {
            self.clipboard.copy(items);
        }
        n
    }

    /// Paste clipboard contents with fresh ids, each paste shifted one
    /// more `paste_offset` than the last. The pasted shapes become the
    /// selection.
    pub fn paste(&mut self) -> Vec<ShapeId> {
        let (items, n) = match self.clipboard.paste() {
            Some(p) => p,
            None => return Vec::new(),
        };
        let offset = self.config.paste_offset * n as f32;
        self.exit_all_edit_modes();
        let mut pasted = Vec::with_capacity(items.len());
        for v in &items {
            let mut s = match json::shape_from_value(v) {
                Ok(s) => s,
                Err(e) => {
                    log::warn!("paste skipped an item: {}", e);
                    continue;
                }
            };
            let id = match self.alloc_id() {
                Some(id) => id,
                None => break,
            };
            s.id = id;
            s.xf.center = s.xf.center + Vec2::new(offset, offset);
            s.refresh_derived();
            self.insert(s);
            pasted.push(id);
        }
        if !pasted.is_empty() {
            self.selection = pasted.clone();
            self.bump();
            self.checkpoint();
        }
        pasted
    }

    // Persistence
    pub fn to_json_value(&self) -> Value {
        json::to_json_impl(self)
    }

    pub fn shape_to_json(&self, id: ShapeId) -> Option<Value> {
        self.shape(id)
            .filter(|s| s.state != ShapeState::Drawing)
            .map(json::shape_to_value)
    }

    /// Replace the scene, skipping invalid objects. Resets history.
    pub fn from_json_value(&mut self, v: &Value) -> bool {
        if !json::from_json_impl(self, v) {
            return false;
        }
        self.history.clear();
        self.checkpoint();
        true
    }

    pub fn from_json_value_strict(&mut self, v: &Value) -> Result<bool, PersistError> {
        json::from_json_impl_strict(self, v)?;
        self.history.clear();
        self.checkpoint();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committed_line(ed: &mut Editor, tool: Tool, to: (f32, f32)) -> ShapeId {
        ed.begin_draw(tool, 0.0, 0.0).unwrap();
        ed.draw_pointer_move(to.0, to.1, true);
        ed.draw_pointer_up(to.0, to.1).unwrap()
    }

    #[test]
    fn discarded_gesture_frees_its_id() {
        let mut ed = Editor::new();
        let a = committed_line(&mut ed, Tool::CurvedLine, (10.0, 0.0));
        for _ in 0..3 {
            let b = ed.begin_draw(Tool::PolyPath, 50.0, 50.0).unwrap();
            assert_eq!(b, a + 1);
            assert_eq!(ed.finish_drawing(), None);
        }
        let c = committed_line(&mut ed, Tool::CurvedLine, (20.0, 0.0));
        assert_eq!(c, a + 1);
        assert_eq!(ed.shapes.len(), 2);
    }

    #[test]
    fn z_order_moves() {
        let mut ed = Editor::new();
        let a = committed_line(&mut ed, Tool::CurvedLine, (10.0, 0.0));
        let b = committed_line(&mut ed, Tool::CurvedLine, (20.0, 0.0));
        let c = committed_line(&mut ed, Tool::CurvedLine, (30.0, 0.0));
        assert!(ed.bring_to_front(a));
        assert_eq!(ed.shape_ids(), &[b, c, a]);
        assert!(ed.send_backward(a));
        assert_eq!(ed.shape_ids(), &[b, a, c]);
        assert!(!ed.send_to_back(b));
        assert!(ed.bring_forward(b));
        assert_eq!(ed.shape_ids(), &[a, b, c]);
    }

    #[test]
    fn handles_only_for_single_selection_in_edit_mode() {
        let mut ed = Editor::new();
        let a = committed_line(&mut ed, Tool::CurvedLine, (100.0, 0.0));
        let b = committed_line(&mut ed, Tool::CurvedLine, (0.0, 100.0));
        assert!(ed.toggle_edit_mode(a));
        assert_eq!(ed.visible_handles().map(|(id, h)| (id, h.len())), Some((a, 3)));
        ed.select(&[a, b]);
        assert!(ed.visible_handles().is_none());
        assert_eq!(ed.shape(a).unwrap().state(), ShapeState::Committed);
    }

    #[test]
    fn switching_tool_leaves_edit_mode() {
        let mut ed = Editor::new();
        let a = committed_line(&mut ed, Tool::Arrow, (100.0, 0.0));
        assert!(ed.enter_edit_mode(a));
        ed.set_tool(Tool::PolyPath);
        assert!(ed.shape(a).unwrap().overlay().is_none());
    }

    #[test]
    fn to_scene_inverts_viewport() {
        let mut ed = Editor::new();
        assert!(ed.set_viewport(Affine([2.0, 0.0, 0.0, 2.0, 10.0, 20.0])));
        assert_eq!(ed.to_scene(30.0, 40.0), Some(Vec2::new(10.0, 10.0)));
        assert!(!ed.set_viewport(Affine([0.0; 6])));
    }
}
