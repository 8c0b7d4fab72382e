use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

pub type ShapeId = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
    #[inline]
    pub fn dist(self, o: Vec2) -> f32 {
        (self - o).length()
    }
    #[inline]
    pub fn midpoint(self, o: Vec2) -> Vec2 {
        Vec2::new(0.5 * (self.x + o.x), 0.5 * (self.y + o.y))
    }
    #[inline]
    pub fn lerp(self, o: Vec2, t: f32) -> Vec2 {
        Vec2::new(self.x + (o.x - self.x) * t, self.y + (o.y - self.y) * t)
    }
    /// Quarter turn, clockwise on a y-down screen.
    #[inline]
    pub fn perp(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len > crate::geometry::tolerance::EPS_LEN && len.is_finite() {
            Some(Vec2::new(self.x / len, self.y / len))
        } else {
            None
        }
    }
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x + o.x, self.y + o.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x - o.x, self.y - o.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn from_hex(s: &str) -> Option<Color> {
        let h = s.strip_prefix('#')?;
        if !h.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(h.get(i..i + 2)?, 16).ok();
        match h.len() {
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => None,
        }
    }
}

/// One drawing command of a shape outline, in the shape's local path frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
}

impl Segment {
    /// The anchor this segment ends on.
    pub fn anchor(&self) -> Vec2 {
        match *self {
            Segment::MoveTo(p) | Segment::LineTo(p) => p,
            Segment::QuadTo { to, .. } => to,
        }
    }
    pub fn anchor_mut(&mut self) -> &mut Vec2 {
        match self {
            Segment::MoveTo(p) | Segment::LineTo(p) => p,
            Segment::QuadTo { to, .. } => to,
        }
    }
    pub fn control(&self) -> Option<Vec2> {
        match *self {
            Segment::QuadTo { ctrl, .. } => Some(ctrl),
            _ => None,
        }
    }
    pub fn is_curve(&self) -> bool {
        matches!(self, Segment::QuadTo { .. })
    }
    pub fn map(&self, f: impl Fn(Vec2) -> Vec2) -> Segment {
        match *self {
            Segment::MoveTo(p) => Segment::MoveTo(f(p)),
            Segment::LineTo(p) => Segment::LineTo(f(p)),
            Segment::QuadTo { ctrl, to } => Segment::QuadTo {
                ctrl: f(ctrl),
                to: f(to),
            },
        }
    }
    pub fn is_finite(&self) -> bool {
        self.anchor().is_finite() && self.control().map_or(true, Vec2::is_finite)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrowHeadStyle {
    #[default]
    NoHead,
    OpenHead,
    FilledHead,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontType {
    #[default]
    Warm,
    Cold,
    Stationary,
    Occluded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphKind {
    Semicircle,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleRole {
    #[serde(rename = "isStart")]
    Start,
    #[serde(rename = "isMidPoint")]
    MidPoint,
    #[serde(rename = "isEnd")]
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    Arrow,
    CurvedLine,
    PolyPath,
    WeatherFront,
}

impl Tool {
    pub fn parse(s: &str) -> Option<Tool> {
        match s {
            "arrow" => Some(Tool::Arrow),
            "curvedLine" => Some(Tool::CurvedLine),
            "polyPath" => Some(Tool::PolyPath),
            "weatherFront" | "weatherFrontLine" => Some(Tool::WeatherFront),
            _ => None,
        }
    }

    /// Drag tools complete on pointer-up; click tools add one anchor per click.
    pub fn is_drag_tool(&self) -> bool {
        matches!(self, Tool::Arrow | Tool::CurvedLine)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeState {
    Drawing,
    Committed,
    Editing,
}

/// Whether an interactive edit is still in flight or has been released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Live,
    Commit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformKind {
    Move,
    Rotate,
    Scale,
}
