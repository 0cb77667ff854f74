//! Ragscene renders a set of looping, canvas-style diagrams that walk through a
//! retrieval-augmented generation pipeline, one drawing surface per pipeline step.
//!
//! The engine is host-driven:
//!
//! - A [`Host`] measures containers, allocates [`DrawContext`]s and fires frame callbacks
//! - The [`Engine`] registers surfaces, debounces resizes and redraws every surface per frame
//! - Each [`Scene`] is a pure function of `elapsed mod cycle`, authored against an 860-unit
//!   reference width and scaled down uniformly on narrower surfaces
//!
//! [`HeadlessHost`] drives the engine without a windowing system, with either the display-list
//! ([`RecordingContext`]) or the raster ([`CpuContext`]) backend.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod draw;
mod engine;
mod foundation;
mod host;
mod render;
/// The twelve pipeline diagrams and their time base.
pub mod scene;
mod scheduler;
mod surface;
mod typewriter;
mod viewport;

pub use crate::foundation::core::{
    Affine, BezPath, LogicalSize, PhysicalSize, Point, Rect, SurfaceId, Vec2,
};
pub use crate::foundation::error::{EngineError, EngineResult};

pub use crate::config::{
    DEFAULT_SURFACES, DEVICE_PIXEL_RATIO, EngineConfig, REFERENCE_WIDTH, RESIZE_DEBOUNCE_MS,
    SurfaceSpec, TYPEWRITER_EVERY_TICKS,
};
pub use crate::draw::color::{Color, palette};
pub use crate::draw::context::{DrawContext, DrawState, FontSpec, Glow, StateStack, TextAlign};
pub use crate::draw::primitives;
pub use crate::draw::recording::{DrawCommand, RecordingContext};
pub use crate::engine::Engine;
pub use crate::host::headless::{HeadlessHost, RecordingProvider};
pub use crate::host::{FrameHandle, FrameHost, Host, LayoutHost, SurfaceProvider};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::{CpuContext, CpuProvider};
pub use crate::scene::cycle::{Cycle, CycleTime};
pub use crate::scene::{Scene, VirtualSurface, default_scenes, scene_for};
pub use crate::scheduler::{ClockState, FrameReport, Scheduler, SurfaceOutcome, draw_surface};
pub use crate::surface::registry::{SurfaceEntry, SurfaceRegistry};
pub use crate::surface::resize::ResizeCoordinator;
pub use crate::typewriter::{CURSOR, GENERATED_ANSWER, Typewriter};
pub use crate::viewport::{Viewport, scale_for};
