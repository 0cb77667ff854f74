//! Boundary with the embedding environment: layout measurement, backing-context creation and the
//! recurring frame callback.

pub(crate) mod headless;

use crate::draw::context::DrawContext;
use crate::foundation::core::{LogicalSize, PhysicalSize, SurfaceId};
use crate::foundation::error::EngineResult;

/// Token for one pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Resolves surface identifiers to their containers' layout size.
pub trait LayoutHost {
    /// Layout size of the container for `id`, `None` when no such container exists.
    ///
    /// A zero height means the container has not been laid out yet.
    fn container_size(&self, id: &SurfaceId) -> Option<LogicalSize>;
}

/// Allocates backing contexts.
pub trait SurfaceProvider {
    /// Fresh context with a backing store of `physical` device pixels.
    fn create_context(
        &mut self,
        id: &SurfaceId,
        physical: PhysicalSize,
    ) -> EngineResult<Box<dyn DrawContext>>;
}

/// Single-shot "call me on the next frame" registration.
pub trait FrameHost {
    /// Register a callback for the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a registration that has not fired yet.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Everything the engine needs from its environment.
pub trait Host: LayoutHost + SurfaceProvider + FrameHost {}

impl<T: LayoutHost + SurfaceProvider + FrameHost> Host for T {}
