//! Path-based shape variants sharing one path model and handle overlay.

pub mod arrow;
pub mod front;
pub mod poly;

pub use arrow::{ArrowHead, ArrowHeads};
pub use front::FrontLine;
pub use poly::{CurvedLine, PolyPath};

use crate::algorithms::decoration::{self, Glyph};
use crate::config::EditorConfig;
use crate::error::PersistError;
use crate::geometry::affine::Affine;
use crate::geometry::math::dist_point_to_seg_sq;
use crate::geometry::path_length::Piece;
use crate::model::{Color, ShapeId, ShapeState, Tool, Vec2};
use crate::overlay::ControlOverlay;
use crate::path::Path;
use crate::transform::ObjectTransform;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// Persistence contract each variant's own state implements. Common
/// fields (path, transform, stroke) are handled by the caller.
pub trait ShapeVariant: Sized {
    /// Persisted `type` tag.
    const TYPE: &'static str;
    fn write_fields(&self, obj: &mut Map<String, Value>);
    fn read_fields(obj: &Map<String, Value>) -> Result<Self, PersistError>;
}

pub(crate) fn merge_fields<T: Serialize>(v: &T, obj: &mut Map<String, Value>) {
    if let Ok(Value::Object(fields)) = serde_json::to_value(v) {
        obj.extend(fields);
    }
}

pub(crate) fn fields_from<T: DeserializeOwned>(obj: &Map<String, Value>) -> Result<T, PersistError> {
    Ok(serde_json::from_value(Value::Object(obj.clone()))?)
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    Arrow(ArrowHeads),
    CurvedLine(CurvedLine),
    PolyPath(PolyPath),
    WeatherFront(FrontLine),
}

impl ShapeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Arrow(_) => ArrowHeads::TYPE,
            ShapeKind::CurvedLine(_) => CurvedLine::TYPE,
            ShapeKind::PolyPath(_) => PolyPath::TYPE,
            ShapeKind::WeatherFront(_) => FrontLine::TYPE,
        }
    }

    pub fn tool(&self) -> Tool {
        match self {
            ShapeKind::Arrow(_) => Tool::Arrow,
            ShapeKind::CurvedLine(_) => Tool::CurvedLine,
            ShapeKind::PolyPath(_) => Tool::PolyPath,
            ShapeKind::WeatherFront(_) => Tool::WeatherFront,
        }
    }

    /// Fresh variant state for a drawing tool.
    pub fn for_tool(tool: Tool, cfg: &EditorConfig) -> ShapeKind {
        match tool {
            Tool::Arrow => ShapeKind::Arrow(ArrowHeads::default()),
            Tool::CurvedLine => ShapeKind::CurvedLine(CurvedLine),
            Tool::PolyPath => ShapeKind::PolyPath(PolyPath),
            Tool::WeatherFront => ShapeKind::WeatherFront(FrontLine {
                spacing: cfg.front_spacing,
                symbol_size: cfg.front_symbol_size,
                ..FrontLine::default()
            }),
        }
    }

    pub(crate) fn write_fields(&self, obj: &mut Map<String, Value>) {
        match self {
            ShapeKind::Arrow(v) => v.write_fields(obj),
            ShapeKind::CurvedLine(v) => v.write_fields(obj),
            ShapeKind::PolyPath(v) => v.write_fields(obj),
            ShapeKind::WeatherFront(v) => v.write_fields(obj),
        }
    }

    pub(crate) fn read(type_name: &str, obj: &Map<String, Value>) -> Result<ShapeKind, PersistError> {
        match type_name {
            ArrowHeads::TYPE => Ok(ShapeKind::Arrow(ArrowHeads::read_fields(obj)?)),
            CurvedLine::TYPE => Ok(ShapeKind::CurvedLine(CurvedLine::read_fields(obj)?)),
            PolyPath::TYPE => Ok(ShapeKind::PolyPath(PolyPath::read_fields(obj)?)),
            FrontLine::TYPE => Ok(ShapeKind::WeatherFront(FrontLine::read_fields(obj)?)),
            other => Err(PersistError::UnknownType(other.to_string())),
        }
    }

    fn default_stroke(&self) -> Color {
        match self {
            ShapeKind::WeatherFront(f) => f.front_type.stroke_color(),
            _ => Color::BLACK,
        }
    }
}

/// Cached render geometry; rebuilt on every path or transform change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Derived {
    pub arrowheads: Vec<ArrowHead>,
    pub glyphs: Vec<Glyph>,
}

impl Derived {
    fn clear(&mut self) {
        self.arrowheads.clear();
        self.glyphs.clear();
    }
}

#[derive(Clone, Debug)]
pub struct Shape {
    pub(crate) id: ShapeId,
    pub name: String,
    pub(crate) kind: ShapeKind,
    pub(crate) path: Path,
    pub(crate) xf: ObjectTransform,
    pub stroke: Color,
    pub(crate) stroke_width: f32,
    pub(crate) visible: bool,
    pub(crate) state: ShapeState,
    pub(crate) group_scaling: bool,
    pub(crate) overlay: Option<ControlOverlay>,
    pub(crate) derived: Derived,
}

impl Shape {
    /// A shape in `Drawing` state whose path starts at scene point `start`.
    /// While drawing, the path frame coincides with the scene.
    pub fn new(id: ShapeId, kind: ShapeKind, start: Vec2) -> Shape {
        let stroke = kind.default_stroke();
        let mut s = Shape {
            id,
            name: format!("{} {}", kind.type_name(), id),
            kind,
            path: Path::new(start),
            xf: ObjectTransform::at(start),
            stroke,
            stroke_width: 2.0,
            visible: true,
            state: ShapeState::Drawing,
            group_scaling: false,
            overlay: None,
            derived: Derived::default(),
        };
        s.follow_offset();
        s
    }

    pub(crate) fn from_parts(id: ShapeId, kind: ShapeKind, path: Path, xf: ObjectTransform) -> Shape {
        let stroke = kind.default_stroke();
        Shape {
            id,
            name: format!("{} {}", kind.type_name(), id),
            kind,
            path,
            xf,
            stroke,
            stroke_width: 2.0,
            visible: true,
            state: ShapeState::Committed,
            group_scaling: false,
            overlay: None,
            derived: Derived::default(),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn transform(&self) -> &ObjectTransform {
        &self.xf
    }
    pub fn state(&self) -> ShapeState {
        self.state
    }
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }
    pub fn is_visible(&self) -> bool {
        self.visible
    }
    pub fn overlay(&self) -> Option<&ControlOverlay> {
        self.overlay.as_ref()
    }
    pub fn arrowheads(&self) -> &[ArrowHead] {
        &self.derived.arrowheads
    }
    pub fn glyphs(&self) -> &[Glyph] {
        &self.derived.glyphs
    }

    /// Object matrix `T·R·S` (no path offset).
    pub fn matrix(&self) -> Affine {
        self.xf.calc_transform_matrix()
    }

    /// Path frame to scene: `M · T(−path_offset)`.
    pub fn path_to_scene(&self) -> Affine {
        let o = self.path.path_offset();
        self.matrix().mul(&Affine::translate(-o.x, -o.y))
    }

    pub fn scene_to_path(&self) -> Option<Affine> {
        self.path_to_scene().invert()
    }

    pub fn to_scene(&self, p: Vec2) -> Vec2 {
        self.path_to_scene().apply(p)
    }

    pub fn scene_anchors(&self) -> Vec<Vec2> {
        let m = self.path_to_scene();
        self.path.segments().iter().map(|s| m.apply(s.anchor())).collect()
    }

    pub fn scene_pieces(&self) -> Vec<Piece> {
        let m = self.path_to_scene();
        self.path.pieces().iter().map(|p| p.transformed(&m)).collect()
    }

    pub fn is_closed(&self, close_tol: f32) -> bool {
        self.path.is_closed(close_tol)
    }

    /// Run a path mutation, recompute dimensions and shift the object
    /// center by the offset change so no existing point moves on screen.
    pub(crate) fn edit_path<R>(&mut self, f: impl FnOnce(&mut Path) -> R) -> R {
        let old = self.path.path_offset();
        let r = f(&mut self.path);
        self.path.recompute_dimensions();
        let delta = self.path.path_offset() - old;
        self.xf.center = self.xf.center + self.xf.linear().apply_vector(delta);
        r
    }

    /// Drawing-time placement: identity transform centered on the offset.
    pub(crate) fn follow_offset(&mut self) {
        self.path.recompute_dimensions();
        self.xf = ObjectTransform::at(self.path.path_offset());
    }

    pub fn convert_to_curve(&mut self, close_tol: f32) -> bool {
        let changed = self.edit_path(|p| p.convert_straight_to_curve());
        if changed && self.overlay.is_some() {
            self.rebuild_overlay(close_tol);
        }
        self.refresh_derived();
        changed
    }

    /// Insert an anchor at scene point `at` when some chord lies within
    /// `tol` scene pixels of it. Returns the new anchor index.
    pub fn add_point(&mut self, at: Vec2, tol: f32, close_tol: f32) -> Option<usize> {
        let anchors = self.scene_anchors();
        let mut best: Option<(usize, f32)> = None;
        for i in 1..anchors.len() {
            let d2 = dist_point_to_seg_sq(at, anchors[i - 1], anchors[i]);
            if d2 <= tol * tol && best.map_or(true, |(_, bd)| d2 < bd) {
                best = Some((i, d2));
            }
        }
        let (idx, _) = best?;
        let local = self.scene_to_path()?.apply(at);
        if !self.edit_path(|p| p.split_chord(idx, local)) {
            return None;
        }
        if self.overlay.is_some() {
            self.rebuild_overlay(close_tol);
        }
        self.refresh_derived();
        Some(idx)
    }

    /// Remove the anchor within `tol` scene pixels of `at`.
    pub fn remove_point(&mut self, at: Vec2, tol: f32, close_tol: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, a) in self.scene_anchors().into_iter().enumerate() {
            let d = a.dist(at);
            if d <= tol && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        let (idx, _) = best?;
        if !self.edit_path(|p| p.remove_anchor(idx, close_tol)) {
            return None;
        }
        if self.overlay.is_some() {
            self.rebuild_overlay(close_tol);
        }
        self.refresh_derived();
        Some(idx)
    }

    pub fn enter_edit_mode(&mut self, close_tol: f32) -> bool {
        if self.state != ShapeState::Committed {
            return false;
        }
        self.bake_scale();
        self.rebuild_overlay(close_tol);
        self.state = ShapeState::Editing;
        self.refresh_derived();
        true
    }

    pub fn exit_edit_mode(&mut self) -> bool {
        if self.state != ShapeState::Editing {
            return false;
        }
        self.overlay = None;
        self.state = ShapeState::Committed;
        true
    }

    /// Destroy and recreate all handles, then bind them.
    pub(crate) fn rebuild_overlay(&mut self, close_tol: f32) {
        self.edit_path(|p| p.convert_straight_to_curve());
        let mut overlay = ControlOverlay::rebuild(&self.path, &self.path_to_scene(), close_tol);
        overlay.bind(&self.matrix());
        self.overlay = Some(overlay);
    }

    pub(crate) fn bind_overlay(&mut self) {
        let m = self.matrix();
        if let Some(o) = self.overlay.as_mut() {
            o.bind(&m);
        }
    }

    pub(crate) fn sync_overlay(&mut self) {
        let m = self.matrix();
        if let Some(o) = self.overlay.as_mut() {
            o.sync_from_shape_transform(&m);
        }
    }

    /// Move scale factors into the path coordinates and reset them to 1.
    pub(crate) fn bake_scale(&mut self) -> bool {
        if self.xf.is_unit_scale() {
            return false;
        }
        let (sx, sy) = (self.xf.scale_x, self.xf.scale_y);
        self.edit_path(|p| p.bake_scale(sx, sy));
        self.xf.scale_x = 1.0;
        self.xf.scale_y = 1.0;
        true
    }

    /// Write a dragged handle back into the path. The handle's own center
    /// has already been moved by the caller.
    pub(crate) fn apply_handle(&mut self, idx: usize) -> bool {
        let overlay = match self.overlay.take() {
            Some(o) => o,
            None => return false,
        };
        let written = match self.scene_to_path() {
            Some(to_local) => self.edit_path(|p| overlay.write_handle(idx, p, &to_local)),
            None => false,
        };
        self.overlay = Some(overlay);
        written
    }

    /// Regenerate arrowheads or front glyphs. Previous geometry is always
    /// dropped first.
    pub fn refresh_derived(&mut self) {
        self.derived.clear();
        if self.path.is_degenerate() {
            return;
        }
        match &self.kind {
            ShapeKind::Arrow(heads) => {
                let pieces = self.scene_pieces();
                self.derived.arrowheads = arrow::build_heads(&pieces, heads, self.stroke_width);
            }
            ShapeKind::WeatherFront(front) => {
                if !self.visible || self.group_scaling {
                    log::debug!("shape {}: front symbols skipped", self.id);
                    return;
                }
                let pieces = self.scene_pieces();
                self.derived.glyphs = decoration::generate(&pieces, front);
            }
            ShapeKind::CurvedLine(_) | ShapeKind::PolyPath(_) => {}
        }
    }
}
