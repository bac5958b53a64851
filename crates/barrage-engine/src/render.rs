//! The per-tick render frame: ordered draws plus collected lights.

use barrage_core::{DrawCommand, LightCommand};

/// Output of one render build.
///
/// `draws` is in paint order (ascending layer, then uid); `lights`
/// follows the same walk order. The frame is rebuilt from scratch by
/// every [`World::render`](crate::world::World::render) call and
/// borrowed out to the renderer collaborator; the world never draws.
#[derive(Clone, Debug, Default)]
pub struct RenderFrame {
    /// Ordered draw commands.
    pub draws: Vec<DrawCommand>,
    /// Light sources collected during the visible scan.
    pub lights: Vec<LightCommand>,
}

impl RenderFrame {
    /// Drop the previous build, keeping capacity.
    pub(crate) fn clear(&mut self) {
        self.draws.clear();
        self.lights.clear();
    }

    /// Whether the build produced no output.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty() && self.lights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::{ColorRgba, LightCommand, ObjectHandle, SlotId, Uid};

    #[test]
    fn clear_empties_both_lists() {
        let mut frame = RenderFrame::default();
        assert!(frame.is_empty());

        frame.lights.push(LightCommand {
            obj: ObjectHandle {
                slot: SlotId(0),
                uid: Uid(1),
            },
            x: 1.0,
            y: 2.0,
            color: ColorRgba::WHITE,
        });
        assert!(!frame.is_empty());

        frame.clear();
        assert!(frame.is_empty());
    }
}
