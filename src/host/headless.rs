use std::collections::BTreeMap;

use crate::draw::context::DrawContext;
use crate::draw::recording::RecordingContext;
use crate::foundation::core::{LogicalSize, PhysicalSize, SurfaceId};
use crate::foundation::error::EngineResult;
use crate::host::{FrameHandle, FrameHost, LayoutHost, SurfaceProvider};

/// Creates [`RecordingContext`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordingProvider;

impl SurfaceProvider for RecordingProvider {
    fn create_context(
        &mut self,
        _id: &SurfaceId,
        physical: PhysicalSize,
    ) -> EngineResult<Box<dyn DrawContext>> {
        Ok(Box::new(RecordingContext::new(physical)))
    }
}

/// In-memory environment: a container table, a pluggable context provider and a manually
/// fired frame queue.
pub struct HeadlessHost {
    containers: BTreeMap<SurfaceId, LogicalSize>,
    provider: Box<dyn SurfaceProvider>,
    next_handle: u64,
    pending: Vec<FrameHandle>,
    contexts_created: u64,
}

impl HeadlessHost {
    /// Host backed by `provider`.
    pub fn new(provider: impl SurfaceProvider + 'static) -> Self {
        Self {
            containers: BTreeMap::new(),
            provider: Box::new(provider),
            next_handle: 1,
            pending: Vec::new(),
            contexts_created: 0,
        }
    }

    /// Host producing display-list contexts.
    pub fn recording() -> Self {
        Self::new(RecordingProvider)
    }

    /// Add or resize the container for `id`.
    pub fn set_container(&mut self, id: impl Into<SurfaceId>, size: LogicalSize) {
        self.containers.insert(id.into(), size);
    }

    /// Drop the container for `id`.
    pub fn remove_container(&mut self, id: &SurfaceId) {
        self.containers.remove(id);
    }

    /// Give every container the same width, keeping heights.
    pub fn set_all_widths(&mut self, width: u32) {
        for size in self.containers.values_mut() {
            size.width = width;
        }
    }

    /// Registrations that have not fired or been cancelled.
    pub fn pending_frames(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Fire the oldest registration, returning its handle.
    pub fn fire_next_frame(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            return None;
        }
        Some(self.pending.remove(0))
    }

    /// Number of contexts handed out so far.
    pub fn contexts_created(&self) -> u64 {
        self.contexts_created
    }
}

impl LayoutHost for HeadlessHost {
    fn container_size(&self, id: &SurfaceId) -> Option<LogicalSize> {
        self.containers.get(id).copied()
    }
}

impl SurfaceProvider for HeadlessHost {
    fn create_context(
        &mut self,
        id: &SurfaceId,
        physical: PhysicalSize,
    ) -> EngineResult<Box<dyn DrawContext>> {
        let ctx = self.provider.create_context(id, physical)?;
        self.contexts_created += 1;
        Ok(ctx)
    }
}

impl FrameHost for HeadlessHost {
    fn request_frame(&mut self) -> FrameHandle {
        let h = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(h);
        h
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|&h| h != handle);
    }
}
