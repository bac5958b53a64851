//! Per-tick counters published by the world.

/// Counters for the most recent tick window.
///
/// A window opens when [`World::frame`](crate::world::World::frame)
/// begins and closes at the end of
/// [`World::after_frame`](crate::world::World::after_frame); per-window
/// fields reset at the open. Cumulative fields keep counting across
/// windows and survive until the world itself is reset.
#[derive(Clone, Debug, Default)]
pub struct FrameMetrics {
    /// Cumulative completed ticks.
    pub tick: u64,
    /// Live objects after the last retirement walk.
    pub live_objects: usize,
    /// Cumulative objects created.
    pub spawned: u64,
    /// Behavior hooks invoked this window.
    pub frame_hooks: u32,
    /// Attribute rows swept by the integration pass this window.
    pub integrated_rows: usize,
    /// Objects marked by the bounds cull this window.
    pub bound_marks: u32,
    /// Candidate pairs enumerated by the contact stages this window.
    pub candidate_pairs: u64,
    /// Contact matches delivered this window.
    pub contacts: u32,
    /// Ordering positions walked by resort corrections this window.
    pub resort_steps: u64,
    /// Draw commands in the last render build.
    pub draw_commands: usize,
    /// Light sources in the last render build.
    pub lights: usize,
    /// Objects freed by the last retirement walk.
    pub retired: u32,
    /// Cumulative draw submissions dropped outside a render walk.
    pub dropped_draws: u64,
}

impl FrameMetrics {
    /// Reset the per-window fields; cumulative fields keep counting.
    pub(crate) fn begin_window(&mut self) {
        self.frame_hooks = 0;
        self.integrated_rows = 0;
        self.bound_marks = 0;
        self.candidate_pairs = 0;
        self.contacts = 0;
        self.resort_steps = 0;
        self.draw_commands = 0;
        self.lights = 0;
        self.retired = 0;
    }
}
