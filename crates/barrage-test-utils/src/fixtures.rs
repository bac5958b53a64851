//! Reusable category test fixtures.
//!
//! Two standard categories for pipeline validation and engine testing:
//!
//! - [`InertCategory`] — every hook site default; the cheapest object.
//! - [`RecordingCategory`] — appends every hook invocation to a shared
//!   [`EventLog`], with per-site hook kinds adjustable through public
//!   fields.

use barrage_core::{Category, HookKind, ObjectHandle, WorldOps};

use crate::{EventLog, HookEvent};

/// A category with every hook site left at [`HookKind::Default`].
///
/// Objects of this category take the engine's default paths everywhere:
/// no frame hook, asset-kind draw dispatch, no collide callback.
pub struct InertCategory {
    pub name: String,
}

impl InertCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Category for InertCategory {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A category that records every hook invocation.
///
/// Constructed with scripted frame and collide sites and a default
/// render site; flip the public fields before registering to exercise
/// other combinations. `on_init`, `on_delete`, and `on_kill` record
/// unconditionally, matching their always-invoked contract.
pub struct RecordingCategory {
    pub name: String,
    pub frame: HookKind,
    pub render: HookKind,
    pub collide: HookKind,
    log: EventLog,
}

impl RecordingCategory {
    pub fn new(name: impl Into<String>, log: EventLog) -> Self {
        Self {
            name: name.into(),
            frame: HookKind::Scripted,
            render: HookKind::Default,
            collide: HookKind::Scripted,
            log,
        }
    }
}

impl Category for RecordingCategory {
    fn name(&self) -> &str {
        &self.name
    }

    fn frame_hook(&self) -> HookKind {
        self.frame
    }

    fn render_hook(&self) -> HookKind {
        self.render
    }

    fn collide_hook(&self) -> HookKind {
        self.collide
    }

    fn on_init(&self, _world: &mut dyn WorldOps, obj: ObjectHandle) {
        self.log.push(HookEvent::Init(obj));
    }

    fn on_frame(&self, _world: &mut dyn WorldOps, obj: ObjectHandle) {
        self.log.push(HookEvent::Frame(obj));
    }

    fn on_render(&self, _world: &mut dyn WorldOps, obj: ObjectHandle) {
        self.log.push(HookEvent::Render(obj));
    }

    fn on_collide(&self, _world: &mut dyn WorldOps, obj: ObjectHandle, other: ObjectHandle) {
        self.log.push(HookEvent::Collide(obj, other));
    }

    fn on_delete(&self, _world: &mut dyn WorldOps, obj: ObjectHandle) {
        self.log.push(HookEvent::Delete(obj));
    }

    fn on_kill(&self, _world: &mut dyn WorldOps, obj: ObjectHandle) {
        self.log.push(HookEvent::Kill(obj));
    }
}
