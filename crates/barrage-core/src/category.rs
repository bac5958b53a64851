//! The [`Category`] behavior trait, its hook tags, and the [`WorldOps`]
//! surface hooks mutate the world through.
//!
//! A category is the behavior descriptor shared by every object created
//! from it — the "class" of the object. Categories supply optional
//! lifecycle hooks; per-site [`HookKind`] tags let the pipeline decide
//! whether to invoke a hook at all without dynamic dispatch, so a fully
//! default category costs nothing per tick.

use crate::attr::{Attr, Value};
use crate::error::{AccessError, ObjectError};
use crate::id::{CategoryId, ObjectHandle};
use crate::render::DrawCommand;

/// How the pipeline treats one hook site (frame, render, or collide).
///
/// The "fully default category" checks in the hot loops are plain tag
/// comparisons, never nullable-callback tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Engine default behavior; the hook is never invoked.
    ///
    /// For the frame site this is a no-op, for the render site the
    /// asset-kind draw dispatch, for the collide site no callback.
    #[default]
    Default,
    /// Internal native handler: invoked directly, outside the
    /// consecutive-run batching used for scripted hooks.
    FastPath,
    /// External scripted hook: invoked through the registry, batched by
    /// consecutive same-category runs to amortize the lookup.
    Scripted,
}

/// Narrow world access granted to category hooks.
///
/// Hooks run on the control thread in the middle of a pipeline walk, so
/// they see the world mid-tick: attribute reads and writes behave
/// exactly like the external surface, `delete`/`kill` follow the usual
/// mark-at-point / free-at-retirement discipline (and are inert on
/// already-marked objects, which terminates hook recursion), and
/// `submit_draw` appends to the frame under construction — outside the
/// render walk submissions are dropped and counted.
pub trait WorldOps {
    /// Read one attribute.
    fn get(&self, obj: ObjectHandle, attr: Attr) -> Result<Value, AccessError>;

    /// Write one attribute.
    fn set(&mut self, obj: ObjectHandle, attr: Attr, value: Value) -> Result<(), AccessError>;

    /// Whether the handle still refers to a live object.
    fn is_valid(&self, obj: ObjectHandle) -> bool;

    /// Create an object of a registered category, firing its `on_init`.
    fn spawn(&mut self, category: CategoryId) -> Result<ObjectHandle, AccessError>;

    /// Mark an object for deletion, firing its `on_delete`.
    fn delete(&mut self, obj: ObjectHandle) -> Result<(), ObjectError>;

    /// Mark an object for kill, firing its `on_kill`.
    fn kill(&mut self, obj: ObjectHandle) -> Result<(), ObjectError>;

    /// Direction from `a` to `b` in radians.
    fn angle(&self, a: ObjectHandle, b: ObjectHandle) -> Result<f64, ObjectError>;

    /// Euclidean distance between object centres.
    fn distance(&self, a: ObjectHandle, b: ObjectHandle) -> Result<f64, ObjectError>;

    /// Append a draw command to the frame under construction.
    fn submit_draw(&mut self, cmd: DrawCommand);
}

/// Behavior descriptor for a class of objects.
///
/// # Contract
///
/// - Hooks run on the control thread only; they may freely call back
///   into the world through [`WorldOps`], including deleting or killing
///   other objects mid-walk.
/// - The tag methods must be pure and stable: the pipeline reads them
///   every tick and batches consecutive same-category runs on their
///   answers.
/// - `on_init`, `on_delete`, and `on_kill` are always invoked when
///   their event fires; only the per-tick sites (frame, render,
///   collide) are gated by tags.
///
/// # Object safety
///
/// Object-safe; the world stores categories as `Arc<dyn Category>` so
/// hooks can re-enter the world mutably.
///
/// # Examples
///
/// A bullet category that ticks via a scripted hook and otherwise keeps
/// every default:
///
/// ```
/// use barrage_core::{Category, HookKind, ObjectHandle, WorldOps};
/// use barrage_core::{Attr, Value};
///
/// struct Bullet;
///
/// impl Category for Bullet {
///     fn name(&self) -> &str { "bullet" }
///
///     fn frame_hook(&self) -> HookKind { HookKind::Scripted }
///
///     fn on_frame(&self, world: &mut dyn WorldOps, obj: ObjectHandle) {
///         // Fade out over time.
///         if let Ok(Value::Int(t)) = world.get(obj, Attr::Timer) {
///             if t > 600 {
///                 let _ = world.delete(obj);
///             }
///         }
///     }
/// }
///
/// let cat = Bullet;
/// assert_eq!(cat.name(), "bullet");
/// assert_eq!(cat.frame_hook(), HookKind::Scripted);
/// assert_eq!(cat.render_hook(), HookKind::Default);
/// ```
pub trait Category: Send + Sync + 'static {
    /// Human-readable name for error reporting and telemetry.
    fn name(&self) -> &str;

    /// How the behavior-update stage treats objects of this category.
    fn frame_hook(&self) -> HookKind {
        HookKind::Default
    }

    /// How the render build treats objects of this category.
    fn render_hook(&self) -> HookKind {
        HookKind::Default
    }

    /// How contact matches on this category's side are delivered.
    fn collide_hook(&self) -> HookKind {
        HookKind::Default
    }

    /// Invoked once right after creation and linking.
    fn on_init(&self, _world: &mut dyn WorldOps, _obj: ObjectHandle) {}

    /// Invoked per tick during the behavior update, when the frame tag
    /// is not [`HookKind::Default`].
    fn on_frame(&self, _world: &mut dyn WorldOps, _obj: ObjectHandle) {}

    /// Invoked per tick during the render build in place of the default
    /// draw path, when the render tag is not [`HookKind::Default`].
    fn on_render(&self, _world: &mut dyn WorldOps, _obj: ObjectHandle) {}

    /// Invoked for each contact match delivered on this category's
    /// side, when the collide tag is not [`HookKind::Default`].
    fn on_collide(&self, _world: &mut dyn WorldOps, _obj: ObjectHandle, _other: ObjectHandle) {}

    /// Invoked when the object is marked for deletion.
    fn on_delete(&self, _world: &mut dyn WorldOps, _obj: ObjectHandle) {}

    /// Invoked when the object is marked for kill.
    fn on_kill(&self, _world: &mut dyn WorldOps, _obj: ObjectHandle) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inert;

    impl Category for Inert {
        fn name(&self) -> &str {
            "inert"
        }
    }

    #[test]
    fn every_site_defaults_to_no_hook() {
        let cat = Inert;
        assert_eq!(cat.frame_hook(), HookKind::Default);
        assert_eq!(cat.render_hook(), HookKind::Default);
        assert_eq!(cat.collide_hook(), HookKind::Default);
    }

    #[test]
    fn trait_is_object_safe() {
        let cat: Box<dyn Category> = Box::new(Inert);
        assert_eq!(cat.name(), "inert");
    }
}
