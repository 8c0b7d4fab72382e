use crate::error::PersistError;
use crate::geometry::affine::Affine;
use crate::geometry::limits;
use crate::model::{Color, Segment, ShapeId, ShapeState, Vec2};
use crate::path::Path;
use crate::shapes::{Shape, ShapeKind};
use crate::transform::ObjectTransform;
use crate::Editor;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SCENE_VERSION: u32 = 1;

pub fn path_to_value(path: &Path) -> Value {
    Value::Array(
        path.segments()
            .iter()
            .map(|s| match *s {
                Segment::MoveTo(p) => json!(["M", p.x, p.y]),
                Segment::LineTo(p) => json!(["L", p.x, p.y]),
                Segment::QuadTo { ctrl, to } => json!(["Q", ctrl.x, ctrl.y, to.x, to.y]),
            })
            .collect(),
    )
}

pub fn shape_to_value(s: &Shape) -> Value {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct ShapeSer<'a> {
        #[serde(rename = "type")]
        type_name: &'static str,
        id: ShapeId,
        name: &'a str,
        path: Value,
        left: f32,
        top: f32,
        origin_x: &'static str,
        origin_y: &'static str,
        angle: f32,
        scale_x: f32,
        scale_y: f32,
        stroke: String,
        stroke_width: f32,
        visible: bool,
        path_offset: Vec2,
    }
    let ser = ShapeSer {
        type_name: s.kind.type_name(),
        id: s.id,
        name: &s.name,
        path: path_to_value(&s.path),
        left: s.xf.center.x,
        top: s.xf.center.y,
        origin_x: "center",
        origin_y: "center",
        angle: s.xf.angle,
        scale_x: s.xf.scale_x,
        scale_y: s.xf.scale_y,
        stroke: s.stroke.to_hex(),
        stroke_width: s.stroke_width,
        visible: s.visible,
        path_offset: s.path.path_offset(),
    };
    let mut v = serde_json::to_value(ser).unwrap_or(Value::Null);
    if let Value::Object(obj) = &mut v {
        s.kind.write_fields(obj);
    }
    v
}

fn coord(v: &Value) -> Result<f32, PersistError> {
    let x = v
        .as_f64()
        .ok_or_else(|| PersistError::InvalidPath(format!("{} is not a number", v)))? as f32;
    if !limits::in_coord_bounds(x) {
        return Err(PersistError::InvalidPath(format!("coordinate {} out of bounds", x)));
    }
    Ok(x)
}

pub fn path_from_value(raw: &[Value]) -> Result<Path, PersistError> {
    if raw.len() > limits::MAX_SEGMENTS_PER_PATH {
        return Err(PersistError::LimitExceeded("segments per path"));
    }
    let mut segs = Vec::with_capacity(raw.len());
    for (i, cmd) in raw.iter().enumerate() {
        let parts = cmd
            .as_array()
            .ok_or_else(|| PersistError::InvalidPath(format!("segment {} is not an array", i)))?;
        let op = parts.first().and_then(Value::as_str).unwrap_or("");
        let nums = parts
            .get(1..)
            .unwrap_or(&[])
            .iter()
            .map(coord)
            .collect::<Result<Vec<f32>, _>>()?;
        let seg = match (op, nums.as_slice()) {
            ("M", &[x, y]) => Segment::MoveTo(Vec2::new(x, y)),
            ("L", &[x, y]) => Segment::LineTo(Vec2::new(x, y)),
            ("Q", &[cx, cy, x, y]) => Segment::QuadTo {
                ctrl: Vec2::new(cx, cy),
                to: Vec2::new(x, y),
            },
            _ => {
                return Err(PersistError::InvalidPath(format!(
                    "segment {}: unsupported command '{}' with {} values",
                    i,
                    op,
                    nums.len()
                )))
            }
        };
        segs.push(seg);
    }
    let path = Path::from_segments(segs)
        .ok_or_else(|| PersistError::InvalidPath("path must open with a single M".into()))?;
    if path.is_degenerate() {
        return Err(PersistError::InvalidPath("fewer than two segments".into()));
    }
    Ok(path)
}

fn origin_factor(s: Option<&str>, low: &str, high: &str) -> Result<f32, PersistError> {
    match s {
        None | Some("center") => Ok(0.5),
        Some(v) if v == low => Ok(0.0),
        Some(v) if v == high => Ok(1.0),
        Some(v) => Err(PersistError::InvalidField {
            field: "origin",
            reason: format!("unknown origin '{}'", v),
        }),
    }
}

fn finite(field: &'static str, v: Option<f32>, default: f32) -> Result<f32, PersistError> {
    let v = v.unwrap_or(default);
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PersistError::NonFinite(field))
    }
}

/// Decode one persisted shape. Derived geometry is regenerated.
pub fn shape_from_value(v: &Value) -> Result<Shape, PersistError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct ShapeDe {
        #[serde(rename = "type")]
        type_name: Option<String>,
        id: Option<u32>,
        name: Option<String>,
        path: Option<Vec<Value>>,
        left: Option<f32>,
        top: Option<f32>,
        origin_x: Option<String>,
        origin_y: Option<String>,
        angle: Option<f32>,
        scale_x: Option<f32>,
        scale_y: Option<f32>,
        stroke: Option<String>,
        stroke_width: Option<f32>,
        visible: Option<bool>,
        path_offset: Option<Vec2>,
    }
    let obj = v
        .as_object()
        .ok_or_else(|| PersistError::InvalidJson("shape is not an object".into()))?;
    let de = ShapeDe::deserialize(v)?;
    let type_name = de.type_name.ok_or(PersistError::MissingField("type"))?;
    let kind = ShapeKind::read(&type_name, obj)?;
    let id = de.id.ok_or(PersistError::MissingField("id"))?;
    if id > limits::MAX_SHAPE_ID {
        return Err(PersistError::LimitExceeded("shape id"));
    }
    let raw = de.path.ok_or(PersistError::MissingField("path"))?;
    let path = path_from_value(&raw)?;

    let xf = ObjectTransform {
        center: Vec2::new(finite("left", de.left, 0.0)?, finite("top", de.top, 0.0)?),
        angle: finite("angle", de.angle, 0.0)?,
        scale_x: finite("scaleX", de.scale_x, 1.0)?,
        scale_y: finite("scaleY", de.scale_y, 1.0)?,
    };
    if !limits::in_scale_bounds(xf.scale_x) || !limits::in_scale_bounds(xf.scale_y) {
        return Err(PersistError::InvalidField {
            field: "scale",
            reason: format!("({}, {}) is too small", xf.scale_x, xf.scale_y),
        });
    }
    if !limits::in_coord_bounds(xf.center.x) || !limits::in_coord_bounds(xf.center.y) {
        return Err(PersistError::LimitExceeded("position"));
    }

    let mut shape = Shape::from_parts(id, kind, path, xf);
    // Non-center origins name a bbox corner; move it to the center.
    let fx = origin_factor(de.origin_x.as_deref(), "left", "right")?;
    let fy = origin_factor(de.origin_y.as_deref(), "top", "bottom")?;
    let (_, _, w, h) = shape.path.bounds();
    let to_center = Vec2::new((0.5 - fx) * w, (0.5 - fy) * h);
    // A stale pathOffset means the persisted center refers to another origin.
    let stale = de
        .path_offset
        .filter(|o| o.is_finite())
        .map(|o| shape.path.path_offset() - o)
        .unwrap_or(Vec2::ZERO);
    shape.xf.center = shape.xf.center + shape.xf.linear().apply_vector(to_center + stale);

    if let Some(name) = de.name {
        if name.len() > limits::MAX_NAME_LEN {
            return Err(PersistError::LimitExceeded("name length"));
        }
        shape.name = name;
    }
    if let Some(hex) = de.stroke {
        shape.stroke = Color::from_hex(&hex).ok_or_else(|| PersistError::InvalidField {
            field: "stroke",
            reason: format!("'{}' is not a hex color", hex),
        })?;
    }
    if let Some(w) = de.stroke_width {
        if !limits::in_width_bounds(w) {
            return Err(PersistError::InvalidField {
                field: "strokeWidth",
                reason: format!("{} is not a usable width", w),
            });
        }
        shape.stroke_width = w;
    }
    shape.visible = de.visible.unwrap_or(true);
    shape.refresh_derived();
    Ok(shape)
}

pub fn to_json_impl(ed: &Editor) -> Value {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Doc {
        version: u32,
        objects: Vec<Value>,
        viewport_transform: [f32; 6],
    }
    // A shape still being drawn has no committed path yet.
    let objects = ed
        .order
        .iter()
        .filter_map(|&id| ed.shape(id))
        .filter(|s| s.state != ShapeState::Drawing)
        .map(shape_to_value)
        .collect();
    serde_json::to_value(Doc {
        version: SCENE_VERSION,
        objects,
        viewport_transform: ed.viewport.0,
    })
    .unwrap_or(Value::Null)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocDe {
    version: Option<u32>,
    objects: Vec<Value>,
    viewport_transform: Option<[f32; 6]>,
}

fn usable_viewport(m: [f32; 6]) -> Option<Affine> {
    let a = Affine(m);
    if a.is_finite() && a.invert().is_some() {
        Some(a)
    } else {
        None
    }
}

fn install(ed: &mut Editor, shapes: Vec<Shape>, viewport: Affine) {
    let max = shapes.iter().map(|s| s.id as usize + 1).max().unwrap_or(0);
    ed.shapes = (0..max).map(|_| None).collect();
    ed.order.clear();
    for s in shapes {
        ed.order.push(s.id);
        let slot = s.id as usize;
        ed.shapes[slot] = Some(s);
    }
    ed.selection.clear();
    ed.gesture = None;
    ed.viewport = viewport;
    ed.bump();
}

/// Replace the scene. Invalid objects are skipped with a warning; returns
/// false (scene untouched) only when the document itself is unusable.
pub fn from_json_impl(ed: &mut Editor, v: &Value) -> bool {
    let doc = match DocDe::deserialize(v) {
        Ok(d) => d,
        Err(e) => {
            log::warn!("scene rejected: {}", e);
            return false;
        }
    };
    if doc.objects.len() > limits::MAX_SHAPES {
        log::warn!("scene rejected: {} objects exceeds {}", doc.objects.len(), limits::MAX_SHAPES);
        return false;
    }
    let mut shapes: Vec<Shape> = Vec::with_capacity(doc.objects.len());
    let mut seen = std::collections::HashSet::new();
    for (i, obj) in doc.objects.iter().enumerate() {
        match shape_from_value(obj) {
            Ok(s) if seen.insert(s.id) => shapes.push(s),
            Ok(s) => log::warn!("object {}: duplicate id {} skipped", i, s.id),
            Err(e) => log::warn!("object {} skipped: {}", i, e),
        }
    }
    let viewport = match doc.viewport_transform {
        Some(m) => usable_viewport(m).unwrap_or_else(|| {
            log::warn!("unusable viewport transform, using identity");
            Affine::IDENTITY
        }),
        None => Affine::IDENTITY,
    };
    install(ed, shapes, viewport);
    true
}

/// Like `from_json_impl` but fails on the first invalid object. The scene
/// is only replaced when the whole document is accepted.
pub fn from_json_impl_strict(ed: &mut Editor, v: &Value) -> Result<bool, PersistError> {
    let doc = DocDe::deserialize(v)?;
    if let Some(ver) = doc.version {
        if ver > SCENE_VERSION {
            return Err(PersistError::InvalidField {
                field: "version",
                reason: format!("{} is newer than {}", ver, SCENE_VERSION),
            });
        }
    }
    if doc.objects.len() > limits::MAX_SHAPES {
        return Err(PersistError::LimitExceeded("shapes"));
    }
    let mut shapes: Vec<Shape> = Vec::with_capacity(doc.objects.len());
    let mut seen = std::collections::HashSet::new();
    for obj in &doc.objects {
        let s = shape_from_value(obj)?;
        if !seen.insert(s.id) {
            return Err(PersistError::InvalidField {
                field: "id",
                reason: format!("duplicate id {}", s.id),
            });
        }
        shapes.push(s);
    }
    let viewport = match doc.viewport_transform {
        Some(m) => usable_viewport(m).ok_or_else(|| PersistError::InvalidField {
            field: "viewportTransform",
            reason: "must be finite and invertible".into(),
        })?,
        None => Affine::IDENTITY,
    };
    install(ed, shapes, viewport);
    Ok(true)
}
