//! Struct-of-arrays attribute store for per-object physical state.
//!
//! One row per pool slot, column per attribute, so the batch integration
//! stage sweeps contiguous memory. Rows of free slots are kept zeroed by
//! the engine (cleared on allocation and on release), which makes them
//! inert under integration: the batch stages sweep the whole occupied
//! range without a per-row liveness test.
//!
//! Parallel access model: readers share `&AttrStore`; the integration
//! stage splits the store into disjoint mutable row chunks with
//! [`AttrStore::chunks_mut`] and hands one [`RowChunk`] to each worker.
//! No row is ever visible to two chunks.

use std::mem;
use std::ops::Range;

use barrage_core::SlotId;

/// Physical state columns, one row per slot.
///
/// Columns are public: the attribute surface and the render build index
/// them directly by slot, mirroring how the record columns on the pool
/// are accessed. Lengths are fixed at construction; callers must never
/// resize a column.
#[derive(Clone, Debug)]
pub struct AttrStore {
    /// Position x.
    pub x: Vec<f64>,
    /// Position y.
    pub y: Vec<f64>,
    /// Position x at the end of the previous integration.
    pub last_x: Vec<f64>,
    /// Position y at the end of the previous integration.
    pub last_y: Vec<f64>,
    /// Velocity x.
    pub vx: Vec<f64>,
    /// Velocity y.
    pub vy: Vec<f64>,
    /// Acceleration x.
    pub ax: Vec<f64>,
    /// Acceleration y.
    pub ay: Vec<f64>,
    /// Rotation in radians.
    pub rot: Vec<f64>,
    /// Angular velocity in radians per tick.
    pub omega: Vec<f64>,
    /// Horizontal scale.
    pub hscale: Vec<f64>,
    /// Vertical scale.
    pub vscale: Vec<f64>,
    /// Displacement x over the last integration (derived, read-only to
    /// the attribute surface).
    pub dx: Vec<f64>,
    /// Displacement y over the last integration (derived).
    pub dy: Vec<f64>,
    /// When set, integration points rotation along the displacement.
    pub navi: Vec<bool>,
}

impl AttrStore {
    /// A store with `capacity` zeroed rows.
    pub fn new(capacity: usize) -> Self {
        Self {
            x: vec![0.0; capacity],
            y: vec![0.0; capacity],
            last_x: vec![0.0; capacity],
            last_y: vec![0.0; capacity],
            vx: vec![0.0; capacity],
            vy: vec![0.0; capacity],
            ax: vec![0.0; capacity],
            ay: vec![0.0; capacity],
            rot: vec![0.0; capacity],
            omega: vec![0.0; capacity],
            hscale: vec![0.0; capacity],
            vscale: vec![0.0; capacity],
            dx: vec![0.0; capacity],
            dy: vec![0.0; capacity],
            navi: vec![false; capacity],
        }
    }

    /// Number of rows.
    pub fn capacity(&self) -> usize {
        self.x.len()
    }

    /// Clear one row to creation defaults: everything zero, unit scales.
    ///
    /// Called on allocation and on release. A cleared row is inert under
    /// [`RowChunk::integrate`] (scales are not integrated), so freed
    /// rows can stay inside the swept occupied range.
    pub fn reset_row(&mut self, slot: SlotId) {
        let i = slot.index();
        self.x[i] = 0.0;
        self.y[i] = 0.0;
        self.last_x[i] = 0.0;
        self.last_y[i] = 0.0;
        self.vx[i] = 0.0;
        self.vy[i] = 0.0;
        self.ax[i] = 0.0;
        self.ay[i] = 0.0;
        self.rot[i] = 0.0;
        self.omega[i] = 0.0;
        self.hscale[i] = 1.0;
        self.vscale[i] = 1.0;
        self.dx[i] = 0.0;
        self.dy[i] = 0.0;
        self.navi[i] = false;
    }

    /// Clear every row to creation defaults.
    pub fn reset(&mut self) {
        let capacity = self.capacity();
        for i in 0..capacity {
            self.reset_row(SlotId(i as u32));
        }
    }

    /// Split the integrated columns into disjoint mutable row chunks.
    ///
    /// `ranges` must tile a prefix of the store in order: the first range
    /// starts at row 0 and each subsequent range starts where the
    /// previous one ended. This is exactly the shape the engine's even
    /// partition produces; anything else panics.
    pub fn chunks_mut(&mut self, ranges: &[Range<usize>]) -> Vec<RowChunk<'_>> {
        let mut out = Vec::with_capacity(ranges.len());

        let mut x = self.x.as_mut_slice();
        let mut y = self.y.as_mut_slice();
        let mut last_x = self.last_x.as_mut_slice();
        let mut last_y = self.last_y.as_mut_slice();
        let mut vx = self.vx.as_mut_slice();
        let mut vy = self.vy.as_mut_slice();
        let mut ax = self.ax.as_mut_slice();
        let mut ay = self.ay.as_mut_slice();
        let mut rot = self.rot.as_mut_slice();
        let mut omega = self.omega.as_mut_slice();
        let mut dx = self.dx.as_mut_slice();
        let mut dy = self.dy.as_mut_slice();
        let mut navi = self.navi.as_slice();

        let mut consumed = 0usize;
        for range in ranges {
            assert_eq!(
                range.start, consumed,
                "attribute chunks must tile a prefix of the store in order"
            );
            let n = range.len();

            let (cx, rest) = mem::take(&mut x).split_at_mut(n);
            x = rest;
            let (cy, rest) = mem::take(&mut y).split_at_mut(n);
            y = rest;
            let (clx, rest) = mem::take(&mut last_x).split_at_mut(n);
            last_x = rest;
            let (cly, rest) = mem::take(&mut last_y).split_at_mut(n);
            last_y = rest;
            let (cvx, rest) = mem::take(&mut vx).split_at_mut(n);
            vx = rest;
            let (cvy, rest) = mem::take(&mut vy).split_at_mut(n);
            vy = rest;
            let (cax, rest) = mem::take(&mut ax).split_at_mut(n);
            ax = rest;
            let (cay, rest) = mem::take(&mut ay).split_at_mut(n);
            ay = rest;
            let (crot, rest) = mem::take(&mut rot).split_at_mut(n);
            rot = rest;
            let (comega, rest) = mem::take(&mut omega).split_at_mut(n);
            omega = rest;
            let (cdx, rest) = mem::take(&mut dx).split_at_mut(n);
            dx = rest;
            let (cdy, rest) = mem::take(&mut dy).split_at_mut(n);
            dy = rest;
            let (cnavi, rest) = navi.split_at(n);
            navi = rest;

            out.push(RowChunk {
                start: range.start,
                x: cx,
                y: cy,
                last_x: clx,
                last_y: cly,
                vx: cvx,
                vy: cvy,
                ax: cax,
                ay: cay,
                rot: crot,
                omega: comega,
                dx: cdx,
                dy: cdy,
                navi: cnavi,
            });
            consumed = range.end;
        }
        out
    }
}

/// Disjoint mutable view over a contiguous run of rows, for one worker.
///
/// Holds exactly the columns the integration step touches; scales and
/// the rest of the physical row are reached through the store itself by
/// single-threaded stages.
#[derive(Debug)]
pub struct RowChunk<'a> {
    start: usize,
    x: &'a mut [f64],
    y: &'a mut [f64],
    last_x: &'a mut [f64],
    last_y: &'a mut [f64],
    vx: &'a mut [f64],
    vy: &'a mut [f64],
    ax: &'a mut [f64],
    ay: &'a mut [f64],
    rot: &'a mut [f64],
    omega: &'a mut [f64],
    dx: &'a mut [f64],
    dy: &'a mut [f64],
    navi: &'a [bool],
}

impl RowChunk<'_> {
    /// First store row covered by this chunk.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of rows covered.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the chunk covers no rows.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Run one integration step over every row in the chunk.
    ///
    /// Per row: accelerate velocity, advance position, advance rotation,
    /// derive the displacement against the previous position, then latch
    /// the new position as previous. When the navigation flag is set and
    /// the displacement is nonzero, rotation snaps to the displacement
    /// direction. A zeroed row is a fixed point.
    pub fn integrate(&mut self) {
        for i in 0..self.x.len() {
            self.vx[i] += self.ax[i];
            self.vy[i] += self.ay[i];
            self.x[i] += self.vx[i];
            self.y[i] += self.vy[i];
            self.rot[i] += self.omega[i];
            let dx = self.x[i] - self.last_x[i];
            let dy = self.y[i] - self.last_y[i];
            self.dx[i] = dx;
            self.dy[i] = dy;
            self.last_x[i] = self.x[i];
            self.last_y[i] = self.y[i];
            if self.navi[i] && (dx != 0.0 || dy != 0.0) {
                self.rot[i] = dy.atan2(dx);
            }
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
