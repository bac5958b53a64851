//! Render interchange types: draw commands, lights, blend/color state.
//!
//! The runtime never draws. Each tick's render build produces an ordered
//! [`DrawCommand`] sequence plus a flat light list; the renderer
//! collaborator consumes them and issues actual draw calls.

use std::fmt;

use crate::assets::{AssetId, AssetKind};
use crate::id::ObjectHandle;

/// 2D affine transform, row-major `[a b tx; c d ty]`.
///
/// Maps `(x, y)` to `(a·x + b·y + tx, c·x + d·y + ty)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    /// Matrix entries `[a, b, tx, c, d, ty]`.
    pub m: [f64; 6],
}

impl Affine2 {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    };

    /// Scale-rotate-translate transform: scale by `(sx, sy)`, rotate by
    /// `rot` radians, translate to `(x, y)`.
    pub fn from_srt(x: f64, y: f64, rot: f64, sx: f64, sy: f64) -> Self {
        let (s, c) = rot.sin_cos();
        Self {
            m: [sx * c, -sy * s, x, sx * s, sy * c, y],
        }
    }

    /// Apply the transform to a point.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, tx, c, d, ty] = self.m;
        (a * x + b * y + tx, c * x + d * y + ty)
    }
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Blend mode applied by the default draw path.
///
/// The first word is the color-blend operation against the vertex
/// color, the second the framebuffer blend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Multiply vertex color, alpha blend. The default.
    #[default]
    MulAlpha,
    /// Multiply vertex color, additive blend.
    MulAdd,
    /// Multiply vertex color, reverse-subtract blend.
    MulRev,
    /// Multiply vertex color, subtract blend.
    MulSub,
    /// Add vertex color, alpha blend.
    AddAlpha,
    /// Add vertex color, additive blend.
    AddAdd,
    /// Add vertex color, reverse-subtract blend.
    AddRev,
    /// Add vertex color, subtract blend.
    AddSub,
}

impl BlendMode {
    /// Parse a script-facing blend name, e.g. `"mul+add"`.
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "" | "mul+alpha" => Self::MulAlpha,
            "mul+add" => Self::MulAdd,
            "mul+rev" => Self::MulRev,
            "mul+sub" => Self::MulSub,
            "add+alpha" => Self::AddAlpha,
            "add+add" => Self::AddAdd,
            "add+rev" => Self::AddRev,
            "add+sub" => Self::AddSub,
            _ => return None,
        })
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MulAlpha => "mul+alpha",
            Self::MulAdd => "mul+add",
            Self::MulRev => "mul+rev",
            Self::MulSub => "mul+sub",
            Self::AddAlpha => "add+alpha",
            Self::AddAdd => "add+add",
            Self::AddRev => "add+rev",
            Self::AddSub => "add+sub",
        };
        write!(f, "{name}")
    }
}

/// 8-bit RGBA vertex color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorRgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl ColorRgba {
    /// Opaque white, the neutral vertex color.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// A color from components.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for ColorRgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// One default-path draw: an asset placed by a refreshed transform.
///
/// Commands appear in paint order (ascending layer, then uid). The
/// renderer dispatches on [`AssetKind`]: `frame` carries the animation
/// timer for frame selection and particle advancement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    /// The drawn object.
    pub obj: ObjectHandle,
    /// Bound asset.
    pub asset: AssetId,
    /// Kind of the bound asset.
    pub kind: AssetKind,
    /// World transform, refreshed this tick.
    pub transform: Affine2,
    /// Blend mode.
    pub blend: BlendMode,
    /// Vertex color.
    pub color: ColorRgba,
    /// Animation timer at draw time.
    pub frame: i32,
}

/// One light source collected during the render build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightCommand {
    /// The emitting object.
    pub obj: ObjectHandle,
    /// Light position x.
    pub x: f64,
    /// Light position y.
    pub y: f64,
    /// Light color.
    pub color: ColorRgba,
}
