use crate::error;
use crate::interop::{arr_f32, arr_u32, new_obj, opt_u32, set_kv, to_js};
use crate::Editor;
use js_sys::{Float32Array, Uint32Array};
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use wxpath::config::EditorConfig;
use wxpath::geometry::affine::Affine;
use wxpath::geometry::limits;
use wxpath::model::{
    ArrowHeadStyle, Color, FrontType, Phase, Segment, ShapeState, Tool, TransformKind, Vec2,
};
use wxpath::shapes::{Shape, ShapeKind};
use wxpath::transform::ObjectTransform;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn phase(commit: bool) -> Phase {
    if commit { Phase::Commit } else { Phase::Live }
}

fn parse_kind(s: &str) -> Option<TransformKind> {
    match s {
        "move" => Some(TransformKind::Move),
        "rotate" => Some(TransformKind::Rotate),
        "scale" => Some(TransformKind::Scale),
        _ => None,
    }
}

fn parse_front_type(s: &str) -> Option<FrontType> {
    serde_json::from_value(Value::String(s.to_string())).ok()
}

fn parse_head(s: &str) -> Option<ArrowHeadStyle> {
    serde_json::from_value(Value::String(s.to_string())).ok()
}

fn flat(points: &[Vec2]) -> Vec<f32> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

fn scene_command(s: &Shape, seg: &Segment) -> Value {
    match seg.map(|p| s.to_scene(p)) {
        Segment::MoveTo(p) => json!(["M", p.x, p.y]),
        Segment::LineTo(p) => json!(["L", p.x, p.y]),
        Segment::QuadTo { ctrl, to } => json!(["Q", ctrl.x, ctrl.y, to.x, to.y]),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HeadView {
    style: ArrowHeadStyle,
    points: Vec<f32>,
    closed: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GlyphView {
    kind: wxpath::model::GlyphKind,
    color: String,
    points: Vec<f32>,
}

/// Everything a host needs to paint one shape, in scene coordinates.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShapeView {
    id: u32,
    #[serde(rename = "type")]
    type_name: &'static str,
    name: String,
    state: ShapeState,
    visible: bool,
    stroke: String,
    stroke_width: f32,
    transform: ObjectTransform,
    path: Vec<Value>,
    arrowheads: Vec<HeadView>,
    glyphs: Vec<GlyphView>,
}

impl ShapeView {
    fn of(s: &Shape) -> ShapeView {
        ShapeView {
            id: s.id(),
            type_name: s.kind().type_name(),
            name: s.name.clone(),
            state: s.state(),
            visible: s.is_visible(),
            stroke: s.stroke.to_hex(),
            stroke_width: s.stroke_width(),
            transform: *s.transform(),
            path: s.path().segments().iter().map(|seg| scene_command(s, seg)).collect(),
            arrowheads: s
                .arrowheads()
                .iter()
                .map(|h| {
                    let (pts, closed) = h.outline();
                    HeadView { style: h.style, points: flat(&pts), closed }
                })
                .collect(),
            glyphs: s
                .glyphs()
                .iter()
                .map(|g| GlyphView { kind: g.kind, color: g.color.to_hex(), points: flat(&g.outline()) })
                .collect(),
        }
    }
}

impl Editor {
    fn handle_count(&self, id: u32) -> Option<usize> {
        let s = self.inner.shape(id)?;
        if s.state() != ShapeState::Editing {
            return None;
        }
        s.overlay().map(|o| o.handles().len())
    }

    fn committed(&self, id: u32) -> Result<&Shape, JsValue> {
        match self.inner.shape(id) {
            None => Err(error::invalid_id("shape", id)),
            Some(s) if s.state() == ShapeState::Drawing => Err(error::invalid_state(id, "committed")),
            Some(s) => Ok(s),
        }
    }

    fn front(&self, id: u32) -> Result<&Shape, JsValue> {
        let s = self.committed(id)?;
        match s.kind() {
            ShapeKind::WeatherFront(_) => Ok(s),
            _ => Err(error::invalid_state(id, "a weather front")),
        }
    }
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor { Editor::rs_new() }
    pub fn version(&self) -> u64 { self.rs_version() }

    // Config
    pub fn config(&self) -> JsValue { to_js(self.inner.config()) }
    pub fn set_config_json(&mut self, s: &str) -> bool {
        match EditorConfig::from_json_str(s) {
            Ok(cfg) => self.inner.set_config(cfg),
            Err(_) => false,
        }
    }
    pub fn set_config_json_res(&mut self, s: &str) -> JsValue {
        match EditorConfig::from_json_str(s) {
            Ok(cfg) => error::ok(JsValue::from_bool(self.inner.set_config(cfg))),
            Err(e) => error::persist(&e),
        }
    }

    // Tools and drawing
    pub fn tool(&self) -> String {
        match serde_json::to_value(self.inner.tool()) {
            Ok(Value::String(s)) => s,
            _ => String::new(),
        }
    }
    pub fn set_tool(&mut self, name: &str) -> bool {
        match Tool::parse(name) {
            Some(t) => { self.inner.set_tool(t); true }
            None => false,
        }
    }
    pub fn set_tool_res(&mut self, name: &str) -> JsValue {
        match Tool::parse(name) {
            Some(t) => { self.inner.set_tool(t); error::ok(JsValue::UNDEFINED) }
            None => error::invalid_value("tool", name),
        }
    }
    pub fn is_drawing(&self) -> bool { self.inner.is_drawing() }
    pub fn drawing_shape(&self) -> JsValue { opt_u32(self.inner.drawing_shape()) }
    /// Start a gesture with the current tool at scene point (x, y).
    pub fn begin_draw(&mut self, x: f32, y: f32) -> JsValue {
        let tool = self.inner.tool();
        opt_u32(self.inner.begin_draw(tool, x, y))
    }
    pub fn begin_draw_res(&mut self, x: f32, y: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("x", x), ("y", y)]) { return e; }
        if !limits::in_coord_bounds(x) { return error::out_of_range("x", limits::COORD_MIN, limits::COORD_MAX, x); }
        if !limits::in_coord_bounds(y) { return error::out_of_range("y", limits::COORD_MIN, limits::COORD_MAX, y); }
        if self.inner.is_drawing() {
            return error::err("invalid_state", "a drawing gesture is already in progress", None);
        }
        let tool = self.inner.tool();
        match self.inner.begin_draw(tool, x, y) {
            Some(id) => error::ok(JsValue::from_f64(id as f64)),
            None => error::err("limit_exceeded", "no shape id available", None),
        }
    }
    pub fn draw_pointer_move(&mut self, x: f32, y: f32, shift: bool) -> bool { self.inner.draw_pointer_move(x, y, shift) }
    pub fn draw_pointer_down(&mut self, x: f32, y: f32) -> bool { self.inner.draw_pointer_down(x, y) }
    pub fn draw_pointer_up(&mut self, x: f32, y: f32) -> JsValue { opt_u32(self.inner.draw_pointer_up(x, y)) }
    pub fn finish_drawing(&mut self) -> JsValue { opt_u32(self.inner.finish_drawing()) }
    pub fn abort_drawing(&mut self) -> JsValue { opt_u32(self.inner.abort_drawing()) }

    // Viewport
    pub fn viewport(&self) -> Float32Array { arr_f32(&self.inner.viewport().0) }
    pub fn set_viewport(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> bool {
        self.inner.set_viewport(Affine([a, b, c, d, e, f]))
    }
    pub fn set_viewport_res(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> JsValue {
        if let Some(err) = error::check_finite(&[("a", a), ("b", b), ("c", c), ("d", d), ("e", e), ("f", f)]) {
            return err;
        }
        if self.inner.set_viewport(Affine([a, b, c, d, e, f])) {
            error::ok(JsValue::UNDEFINED)
        } else {
            error::err("not_invertible", "viewport matrix is singular", None)
        }
    }
    /// Canvas pointer to scene coordinates, `[x, y]` or null.
    pub fn to_scene(&self, x: f32, y: f32) -> JsValue {
        match self.inner.to_scene(x, y) {
            Some(p) => arr_f32(&[p.x, p.y]).into(),
            None => JsValue::NULL,
        }
    }

    // Scene queries
    pub fn shape_ids(&self) -> Uint32Array { arr_u32(self.inner.shape_ids()) }
    pub fn shape_count(&self) -> u32 { self.inner.shape_count() as u32 }
    pub fn get_shape(&self, id: u32) -> JsValue {
        self.inner.shape(id).map_or(JsValue::NULL, |s| to_js(&ShapeView::of(s)))
    }
    pub fn get_shape_res(&self, id: u32) -> JsValue {
        match self.inner.shape(id) {
            Some(s) => error::ok(to_js(&ShapeView::of(s))),
            None => error::invalid_id("shape", id),
        }
    }
    /// Scene-space anchors as a flat `[x0, y0, x1, y1, ...]` array.
    pub fn get_anchors(&self, id: u32) -> Float32Array {
        let pts = self.inner.shape(id).map(|s| s.scene_anchors()).unwrap_or_default();
        arr_f32(&flat(&pts))
    }
    /// `{ shape, handles: [...] }` for the shape in edit mode, or null.
    pub fn get_handles(&self) -> JsValue {
        match self.inner.visible_handles() {
            Some((id, handles)) => {
                let obj = new_obj();
                set_kv(&obj, "shape", &JsValue::from_f64(id as f64));
                set_kv(&obj, "handles", &to_js(handles));
                obj.into()
            }
            None => JsValue::NULL,
        }
    }

    // Selection and edit mode
    pub fn selection(&self) -> Uint32Array { arr_u32(self.inner.selection()) }
    pub fn select(&mut self, ids: &Uint32Array) -> u32 { self.inner.select(&ids.to_vec()) as u32 }
    pub fn clear_selection(&mut self) { self.inner.clear_selection() }
    pub fn toggle_edit_mode(&mut self, id: u32) -> bool { self.inner.toggle_edit_mode(id) }
    pub fn toggle_edit_mode_res(&mut self, id: u32) -> JsValue {
        if let Err(e) = self.committed(id) { return e; }
        error::ok(JsValue::from_bool(self.inner.toggle_edit_mode(id)))
    }
    pub fn enter_edit_mode(&mut self, id: u32) -> bool { self.inner.enter_edit_mode(id) }
    pub fn exit_edit_mode(&mut self, id: u32) -> bool { self.inner.exit_edit_mode(id) }

    // Path editing
    pub fn convert_to_curve(&mut self, id: u32) -> bool { self.inner.convert_to_curve(id) }
    pub fn add_point(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        opt_u32(self.inner.add_point(id, x, y).map(|i| i as u32))
    }
    pub fn add_point_res(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("x", x), ("y", y)]) { return e; }
        if let Err(e) = self.committed(id) { return e; }
        match self.inner.add_point(id, x, y) {
            Some(i) => error::ok(JsValue::from_f64(i as f64)),
            // No chord near the click.
            None => error::ok(JsValue::NULL),
        }
    }
    pub fn remove_point(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        opt_u32(self.inner.remove_point(id, x, y).map(|i| i as u32))
    }
    pub fn remove_point_res(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("x", x), ("y", y)]) { return e; }
        if let Err(e) = self.committed(id) { return e; }
        match self.inner.remove_point(id, x, y) {
            Some(i) => error::ok(JsValue::from_f64(i as f64)),
            None => error::ok(JsValue::NULL),
        }
    }

    // Transforms
    pub fn translate_shape(&mut self, id: u32, dx: f32, dy: f32) -> bool { self.inner.translate_shape(id, dx, dy) }
    pub fn translate_shape_res(&mut self, id: u32, dx: f32, dy: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("dx", dx), ("dy", dy)]) { return e; }
        if let Err(e) = self.committed(id) { return e; }
        error::ok(JsValue::from_bool(self.inner.translate_shape(id, dx, dy)))
    }
    pub fn rotate_shape(&mut self, id: u32, deg: f32) -> bool { self.inner.rotate_shape(id, deg) }
    pub fn rotate_shape_res(&mut self, id: u32, deg: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("deg", deg)]) { return e; }
        if let Err(e) = self.committed(id) { return e; }
        error::ok(JsValue::from_bool(self.inner.rotate_shape(id, deg)))
    }
    pub fn scale_shape(&mut self, id: u32, sx: f32, sy: f32) -> bool { self.inner.scale_shape(id, sx, sy) }
    pub fn scale_shape_res(&mut self, id: u32, sx: f32, sy: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("sx", sx), ("sy", sy)]) { return e; }
        if !limits::in_scale_bounds(sx) { return error::out_of_range("sx", limits::SCALE_MIN, f32::MAX, sx.abs()); }
        if !limits::in_scale_bounds(sy) { return error::out_of_range("sy", limits::SCALE_MIN, f32::MAX, sy.abs()); }
        if let Err(e) = self.committed(id) { return e; }
        error::ok(JsValue::from_bool(self.inner.scale_shape(id, sx, sy)))
    }
    /// Gizmo update: full object transform plus which kind of drag it was.
    #[allow(clippy::too_many_arguments)]
    pub fn set_shape_transform(&mut self, id: u32, cx: f32, cy: f32, angle: f32, sx: f32, sy: f32, kind: &str, commit: bool) -> bool {
        let kind = match parse_kind(kind) { Some(k) => k, None => return false };
        let xf = ObjectTransform { center: Vec2::new(cx, cy), angle, scale_x: sx, scale_y: sy };
        self.inner.set_shape_transform(id, xf, kind, phase(commit))
    }
    #[allow(clippy::too_many_arguments)]
    pub fn set_shape_transform_res(&mut self, id: u32, cx: f32, cy: f32, angle: f32, sx: f32, sy: f32, kind: &str, commit: bool) -> JsValue {
        if let Some(e) = error::check_finite(&[("cx", cx), ("cy", cy), ("angle", angle), ("sx", sx), ("sy", sy)]) { return e; }
        if !limits::in_scale_bounds(sx) { return error::out_of_range("sx", limits::SCALE_MIN, f32::MAX, sx.abs()); }
        if !limits::in_scale_bounds(sy) { return error::out_of_range("sy", limits::SCALE_MIN, f32::MAX, sy.abs()); }
        let k = match parse_kind(kind) { Some(k) => k, None => return error::invalid_value("kind", kind) };
        if let Err(e) = self.committed(id) { return e; }
        let xf = ObjectTransform { center: Vec2::new(cx, cy), angle, scale_x: sx, scale_y: sy };
        error::ok(JsValue::from_bool(self.inner.set_shape_transform(id, xf, k, phase(commit))))
    }
    pub fn on_handle_dragged(&mut self, id: u32, handle: u32, x: f32, y: f32, commit: bool) -> bool {
        self.inner.on_handle_dragged(id, handle as usize, x, y, phase(commit))
    }
    pub fn on_handle_dragged_res(&mut self, id: u32, handle: u32, x: f32, y: f32, commit: bool) -> JsValue {
        if let Some(e) = error::check_finite(&[("x", x), ("y", y)]) { return e; }
        if self.inner.shape(id).is_none() { return error::invalid_id("shape", id); }
        let count = match self.handle_count(id) {
            Some(n) => n,
            None => return error::invalid_state(id, "in edit mode"),
        };
        if handle as usize >= count {
            return error::out_of_range("handle", 0.0, count.saturating_sub(1) as f32, handle as f32);
        }
        error::ok(JsValue::from_bool(self.inner.on_handle_dragged(id, handle as usize, x, y, phase(commit))))
    }
    pub fn on_selection_scaling(&mut self, ids: &Uint32Array, sx: f32, sy: f32) -> bool {
        self.inner.on_selection_scaling(&ids.to_vec(), sx, sy)
    }
    pub fn on_selection_scaled(&mut self, ids: &Uint32Array) -> bool {
        self.inner.on_selection_scaled(&ids.to_vec())
    }

    // Z-order and deletion
    pub fn bring_to_front(&mut self, id: u32) -> bool { self.inner.bring_to_front(id) }
    pub fn send_to_back(&mut self, id: u32) -> bool { self.inner.send_to_back(id) }
    pub fn bring_forward(&mut self, id: u32) -> bool { self.inner.bring_forward(id) }
    pub fn send_backward(&mut self, id: u32) -> bool { self.inner.send_backward(id) }
    pub fn delete_shapes(&mut self, ids: &Uint32Array) -> u32 { self.inner.delete_shapes(&ids.to_vec()) as u32 }
    pub fn delete_shapes_res(&mut self, ids: &Uint32Array) -> JsValue {
        let v = ids.to_vec();
        if let Some(&bad) = v.iter().find(|&&id| self.inner.shape(id).is_none()) {
            return error::invalid_id("shape", bad);
        }
        error::ok(JsValue::from_f64(self.inner.delete_shapes(&v) as f64))
    }

    // Styling
    pub fn set_front_type(&mut self, id: u32, front_type: &str) -> bool {
        parse_front_type(front_type).map_or(false, |t| self.inner.set_front_type(id, t))
    }
    pub fn set_front_type_res(&mut self, id: u32, front_type: &str) -> JsValue {
        let t = match parse_front_type(front_type) { Some(t) => t, None => return error::invalid_value("frontType", front_type) };
        if let Err(e) = self.front(id) { return e; }
        error::ok(JsValue::from_bool(self.inner.set_front_type(id, t)))
    }
    pub fn set_front_spacing(&mut self, id: u32, spacing: f32) -> bool { self.inner.set_front_spacing(id, spacing) }
    pub fn set_front_spacing_res(&mut self, id: u32, spacing: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("spacing", spacing)]) { return e; }
        if spacing <= 0.0 || spacing > limits::SPACING_MAX {
            return error::out_of_range("spacing", 0.0, limits::SPACING_MAX, spacing);
        }
        if let Err(e) = self.front(id) { return e; }
        error::ok(JsValue::from_bool(self.inner.set_front_spacing(id, spacing)))
    }
    pub fn set_front_symbol_size(&mut self, id: u32, size: f32) -> bool { self.inner.set_front_symbol_size(id, size) }
    pub fn set_front_symbol_size_res(&mut self, id: u32, size: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("size", size)]) { return e; }
        if size <= 0.0 || size > limits::WIDTH_MAX {
            return error::out_of_range("size", 0.0, limits::WIDTH_MAX, size);
        }
        if let Err(e) = self.front(id) { return e; }
        error::ok(JsValue::from_bool(self.inner.set_front_symbol_size(id, size)))
    }
    pub fn set_front_reflect(&mut self, id: u32, reflect: bool) -> bool { self.inner.set_front_reflect(id, reflect) }
    pub fn set_arrow_heads(&mut self, id: u32, start: &str, end: &str) -> bool {
        match (parse_head(start), parse_head(end)) {
            (Some(s), Some(e)) => self.inner.set_arrow_heads(id, s, e),
            _ => false,
        }
    }
    pub fn set_arrow_heads_res(&mut self, id: u32, start: &str, end: &str) -> JsValue {
        let s = match parse_head(start) { Some(s) => s, None => return error::invalid_value("start", start) };
        let e = match parse_head(end) { Some(e) => e, None => return error::invalid_value("end", end) };
        match self.committed(id) {
            Ok(shape) if matches!(shape.kind(), ShapeKind::Arrow(_)) => {}
            Ok(_) => return error::invalid_state(id, "an arrow"),
            Err(err) => return err,
        }
        error::ok(JsValue::from_bool(self.inner.set_arrow_heads(id, s, e)))
    }
    pub fn set_stroke_width(&mut self, id: u32, width: f32) -> bool { self.inner.set_stroke_width(id, width) }
    pub fn set_stroke_width_res(&mut self, id: u32, width: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("width", width)]) { return e; }
        if !limits::in_width_bounds(width) {
            return error::out_of_range("width", 0.0, limits::WIDTH_MAX, width);
        }
        if let Err(e) = self.committed(id) { return e; }
        error::ok(JsValue::from_bool(self.inner.set_stroke_width(id, width)))
    }
    /// `#rrggbb` or `#rrggbbaa`.
    pub fn set_stroke(&mut self, id: u32, hex: &str) -> bool {
        Color::from_hex(hex).map_or(false, |c| self.inner.set_stroke(id, c))
    }
    pub fn set_stroke_res(&mut self, id: u32, hex: &str) -> JsValue {
        let c = match Color::from_hex(hex) { Some(c) => c, None => return error::invalid_value("stroke", hex) };
        if let Err(e) = self.committed(id) { return e; }
        error::ok(JsValue::from_bool(self.inner.set_stroke(id, c)))
    }
    pub fn set_visible(&mut self, id: u32, visible: bool) -> bool { self.inner.set_visible(id, visible) }
    pub fn set_name(&mut self, id: u32, name: &str) -> bool { self.inner.set_name(id, name) }

    // Picking
    pub fn pick(&self, x: f32, y: f32, tol: f32) -> JsValue {
        if let Some(p) = self.inner.pick(x, y, tol) {
            // Flatten to { kind: 'handle'|'shape', ... }
            let obj = new_obj();
            match p {
                wxpath::Pick::Handle { shape, index, dist } => {
                    set_kv(&obj, "kind", &JsValue::from_str("handle"));
                    set_kv(&obj, "shape", &JsValue::from_f64(shape as f64));
                    set_kv(&obj, "index", &JsValue::from_f64(index as f64));
                    set_kv(&obj, "dist", &JsValue::from_f64(dist as f64));
                }
                wxpath::Pick::Shape { id, segment, t, dist } => {
                    set_kv(&obj, "kind", &JsValue::from_str("shape"));
                    set_kv(&obj, "id", &JsValue::from_f64(id as f64));
                    set_kv(&obj, "segment", &JsValue::from_f64(segment as f64));
                    set_kv(&obj, "t", &JsValue::from_f64(t as f64));
                    set_kv(&obj, "dist", &JsValue::from_f64(dist as f64));
                }
            }
            obj.into()
        } else {
            JsValue::NULL
        }
    }
    pub fn pick_res(&self, x: f32, y: f32, tol: f32) -> JsValue {
        if let Some(e) = error::check_finite(&[("x", x), ("y", y), ("tol", tol)]) { return e; }
        if tol < 0.0 {
            return error::out_of_range("tol", 0.0, f32::INFINITY, tol);
        }
        error::ok(self.pick(x, y, tol))
    }

    // History
    pub fn checkpoint(&mut self) { self.inner.checkpoint() }
    pub fn can_undo(&self) -> bool { self.inner.can_undo() }
    pub fn can_redo(&self) -> bool { self.inner.can_redo() }
    pub fn undo(&mut self) -> bool { self.inner.undo() }
    pub fn redo(&mut self) -> bool { self.inner.redo() }

    // Clipboard
    pub fn copy_selection(&mut self) -> u32 { self.inner.copy_selection() as u32 }
    pub fn paste(&mut self) -> Uint32Array { arr_u32(&self.inner.paste()) }

    // Persistence
    pub fn to_json(&self) -> JsValue { to_js(&self.inner.to_json_value()) }
    pub fn shape_to_json(&self, id: u32) -> JsValue {
        self.inner.shape_to_json(id).map_or(JsValue::NULL, |v| to_js(&v))
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<Value>(v) {
            Ok(val) => self.inner.from_json_value(&val),
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<Value>(v) {
            Ok(val) => match self.inner.from_json_value_strict(&val) {
                Ok(ok) => error::ok(JsValue::from_bool(ok)),
                Err(e) => error::persist(&e),
            },
            Err(e) => error::err("invalid_json", format!("{}", e), None),
        }
    }
}

impl Default for Editor {
    fn default() -> Self { Editor::rs_new() }
}
