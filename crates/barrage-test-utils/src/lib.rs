//! Test utilities and mock types for Barrage development.
//!
//! Provides a mock implementation of the [`AssetStore`] trait
//! ([`CountingAssets`]), a shared [`EventLog`] for observing hook
//! invocation order, and reusable [`Category`](barrage_core::Category)
//! fixtures for pipeline validation.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use barrage_core::{AssetError, AssetId, AssetKind, AssetStore, ObjectHandle};

mod fixtures;

pub use fixtures::{InertCategory, RecordingCategory};

/// One observed hook invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookEvent {
    Init(ObjectHandle),
    Frame(ObjectHandle),
    Render(ObjectHandle),
    Collide(ObjectHandle, ObjectHandle),
    Delete(ObjectHandle),
    Kill(ObjectHandle),
}

/// Shared, append-only record of hook invocations.
///
/// Clone handles freely; all clones append to the same log, so several
/// categories recording into one log preserve the global invocation
/// order. Hooks run on the control thread only, so the lock is never
/// contended.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<HookEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: HookEvent) {
        self.lock().push(event);
    }

    /// Snapshot the recorded events.
    pub fn events(&self) -> Vec<HookEvent> {
        self.lock().clone()
    }

    /// Drain the recorded events, leaving the log empty.
    pub fn take(&self) -> Vec<HookEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<HookEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Mock implementation of [`AssetStore`] with observable reference
/// counts.
///
/// Backed by shared interior state, so a clone kept by the test still
/// sees acquires and releases after another clone is boxed into a
/// world. Register assets with [`register`](CountingAssets::register)
/// before handing the store over.
#[derive(Clone, Default)]
pub struct CountingAssets {
    inner: Arc<Mutex<AssetLedger>>,
}

#[derive(Default)]
struct AssetLedger {
    kinds: HashMap<AssetId, AssetKind>,
    refs: HashMap<AssetId, u32>,
    acquires: u64,
    releases: u64,
}

impl CountingAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make an asset id known to the store.
    pub fn register(&self, id: AssetId, kind: AssetKind) {
        self.lock().kinds.insert(id, kind);
    }

    /// Current reference count of an asset.
    pub fn refs(&self, id: AssetId) -> u32 {
        self.lock().refs.get(&id).copied().unwrap_or(0)
    }

    /// Total successful acquires across all clones.
    pub fn total_acquires(&self) -> u64 {
        self.lock().acquires
    }

    /// Total releases across all clones.
    pub fn total_releases(&self) -> u64 {
        self.lock().releases
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AssetLedger> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AssetStore for CountingAssets {
    fn kind(&self, id: AssetId) -> Option<AssetKind> {
        self.lock().kinds.get(&id).copied()
    }

    fn acquire(&mut self, id: AssetId) -> Result<AssetKind, AssetError> {
        let mut inner = self.lock();
        let kind = inner
            .kinds
            .get(&id)
            .copied()
            .ok_or(AssetError::Unknown { id })?;
        *inner.refs.entry(id).or_insert(0) += 1;
        inner.acquires += 1;
        Ok(kind)
    }

    fn release(&mut self, id: AssetId) {
        let mut inner = self.lock();
        if let Some(n) = inner.refs.get_mut(&id) {
            *n = n.saturating_sub(1);
        }
        inner.releases += 1;
    }
}
