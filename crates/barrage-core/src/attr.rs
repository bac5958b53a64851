//! The attribute surface: typed keys and values for object state access.
//!
//! External layers read and write object state through `(Attr, Value)`
//! pairs rather than field pointers; the world validates handle, type,
//! and range on every call. The string names accepted by [`Attr::parse`]
//! are the conventional script-facing names.

use std::fmt;

use crate::collider::ColliderShape;
use crate::id::{CategoryId, CollisionGroup};
use crate::render::{BlendMode, ColorRgba};
use crate::status::ObjectStatus;
use crate::AssetId;

/// Typed attribute key.
///
/// `Dx`, `Dy`, and `AniTimer` are derived state and read-only; `Layer`
/// writes re-sort the render list and `Group` writes move the object
/// between collision chains; the remaining keys are plain field access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attr {
    /// Position x.
    X,
    /// Position y.
    Y,
    /// Per-tick displacement x (read-only).
    Dx,
    /// Per-tick displacement y (read-only).
    Dy,
    /// Rotation in radians.
    Rot,
    /// Angular velocity in radians per tick.
    Omega,
    /// Velocity x.
    Vx,
    /// Velocity y.
    Vy,
    /// Acceleration x.
    Ax,
    /// Acceleration y.
    Ay,
    /// Horizontal scale.
    Hscale,
    /// Vertical scale.
    Vscale,
    /// Paint layer (render sort key).
    Layer,
    /// Collision group membership.
    Group,
    /// Skip this object during render build.
    Hide,
    /// Participate in the bounds cull.
    Bound,
    /// Rotation follows displacement direction when set.
    Navi,
    /// Participate in contact tests.
    Colli,
    /// Emit a light source during render build.
    Light,
    /// Frames since creation.
    Timer,
    /// Frames of animation state (read-only).
    AniTimer,
    /// Lifecycle status.
    Status,
    /// Behavior category.
    Category,
    /// Collider half extent a.
    A,
    /// Collider half extent b.
    B,
    /// Collider shape kind.
    Shape,
    /// Bound asset reference.
    Asset,
    /// Blend mode for the default draw path.
    Blend,
    /// Vertex color for the default draw path.
    Color,
}

impl Attr {
    /// Parse a script-facing attribute name.
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "x" => Self::X,
            "y" => Self::Y,
            "dx" => Self::Dx,
            "dy" => Self::Dy,
            "rot" => Self::Rot,
            "omega" => Self::Omega,
            "vx" => Self::Vx,
            "vy" => Self::Vy,
            "ax" => Self::Ax,
            "ay" => Self::Ay,
            "hscale" => Self::Hscale,
            "vscale" => Self::Vscale,
            "layer" => Self::Layer,
            "group" => Self::Group,
            "hide" => Self::Hide,
            "bound" => Self::Bound,
            "navi" => Self::Navi,
            "colli" => Self::Colli,
            "light" => Self::Light,
            "timer" => Self::Timer,
            "ani" => Self::AniTimer,
            "status" => Self::Status,
            "class" => Self::Category,
            "a" => Self::A,
            "b" => Self::B,
            "shape" => Self::Shape,
            "img" => Self::Asset,
            "blend" => Self::Blend,
            "color" => Self::Color,
            _ => return None,
        })
    }

    /// Whether writes to this attribute are rejected.
    pub fn is_read_only(self) -> bool {
        matches!(self, Self::Dx | Self::Dy | Self::AniTimer)
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Dx => "dx",
            Self::Dy => "dy",
            Self::Rot => "rot",
            Self::Omega => "omega",
            Self::Vx => "vx",
            Self::Vy => "vy",
            Self::Ax => "ax",
            Self::Ay => "ay",
            Self::Hscale => "hscale",
            Self::Vscale => "vscale",
            Self::Layer => "layer",
            Self::Group => "group",
            Self::Hide => "hide",
            Self::Bound => "bound",
            Self::Navi => "navi",
            Self::Colli => "colli",
            Self::Light => "light",
            Self::Timer => "timer",
            Self::AniTimer => "ani",
            Self::Status => "status",
            Self::Category => "class",
            Self::A => "a",
            Self::B => "b",
            Self::Shape => "shape",
            Self::Asset => "img",
            Self::Blend => "blend",
            Self::Color => "color",
        };
        write!(f, "{name}")
    }
}

/// Typed attribute value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// A real number (positions, velocities, scales, layer).
    Num(f64),
    /// A frame count (timers).
    Int(i32),
    /// A flag (hide, bound, navi, colli, light).
    Bool(bool),
    /// A lifecycle status.
    Status(ObjectStatus),
    /// A collision group membership.
    Group(CollisionGroup),
    /// A behavior category.
    Category(CategoryId),
    /// A collider shape kind.
    Shape(ColliderShape),
    /// An asset binding, or `None` to unbind.
    Asset(Option<AssetId>),
    /// A blend mode.
    Blend(BlendMode),
    /// A vertex color.
    Color(ColorRgba),
}

impl Value {
    /// Name of the variant, used in type-mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Num(_) => "number",
            Self::Int(_) => "integer",
            Self::Bool(_) => "boolean",
            Self::Status(_) => "status",
            Self::Group(_) => "group",
            Self::Category(_) => "category",
            Self::Shape(_) => "shape",
            Self::Asset(_) => "asset",
            Self::Blend(_) => "blend",
            Self::Color(_) => "color",
        }
    }

    /// The number inside, if this is a [`Value::Num`].
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(v) => Some(*v),
            _ => None,
        }
    }

    /// The flag inside, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_display() {
        let all = [
            Attr::X,
            Attr::Y,
            Attr::Dx,
            Attr::Dy,
            Attr::Rot,
            Attr::Omega,
            Attr::Vx,
            Attr::Vy,
            Attr::Ax,
            Attr::Ay,
            Attr::Hscale,
            Attr::Vscale,
            Attr::Layer,
            Attr::Group,
            Attr::Hide,
            Attr::Bound,
            Attr::Navi,
            Attr::Colli,
            Attr::Light,
            Attr::Timer,
            Attr::AniTimer,
            Attr::Status,
            Attr::Category,
            Attr::A,
            Attr::B,
            Attr::Shape,
            Attr::Asset,
            Attr::Blend,
            Attr::Color,
        ];
        for attr in all {
            assert_eq!(Attr::parse(&attr.to_string()), Some(attr));
        }
    }

    #[test]
    fn unknown_name_parses_to_none() {
        assert_eq!(Attr::parse("zvelocity"), None);
        assert_eq!(Attr::parse(""), None);
    }

    #[test]
    fn read_only_set_is_exactly_derived_state() {
        assert!(Attr::Dx.is_read_only());
        assert!(Attr::Dy.is_read_only());
        assert!(Attr::AniTimer.is_read_only());
        assert!(!Attr::Timer.is_read_only());
        assert!(!Attr::X.is_read_only());
    }

    #[test]
    fn value_accessors_reject_other_variants() {
        assert_eq!(Value::Num(2.5).as_num(), Some(2.5));
        assert_eq!(Value::Bool(true).as_num(), None);
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Num(0.0).as_bool(), None);
    }
}
