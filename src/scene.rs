//! The twelve animated pipeline diagrams.
//!
//! Every scene lays itself out in *virtual* units (authored against the reference width) and reads
//! time only through [`CycleTime`], so its picture is a pure function of `elapsed mod cycle`.

pub(crate) mod cycle;

mod answer;
mod chunking;
mod embedding;
mod generation;
mod ingestion;
mod preprocess;
mod prompt;
mod query;
mod rerank;
mod similarity;
mod sources;
mod vector_store;

pub use answer::Answer;
pub use chunking::Chunking;
pub use embedding::Embedding;
pub use generation::Generation;
pub use ingestion::Ingestion;
pub use preprocess::Preprocess;
pub use prompt::Prompt;
pub use query::Query;
pub use rerank::Rerank;
pub use similarity::Similarity;
pub use sources::Sources;
pub use vector_store::VectorStore;

use crate::draw::context::DrawContext;
use crate::foundation::core::SurfaceId;
use cycle::{Cycle, CycleTime};

/// A drawing context together with the virtual size a scene may fill.
pub struct VirtualSurface<'a> {
    /// Context already scaled from virtual to device units.
    pub ctx: &'a mut dyn DrawContext,
    /// Virtual width.
    pub width: f64,
    /// Virtual height.
    pub height: f64,
}

impl<'a> VirtualSurface<'a> {
    /// Wrap `ctx` with a virtual size.
    pub fn new(ctx: &'a mut dyn DrawContext, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    /// `true` when both dimensions are finite and positive.
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// One looping diagram.
pub trait Scene: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Loop length.
    fn cycle(&self) -> Cycle;

    /// Draw the picture for `t`. The surface is guaranteed drawable.
    fn paint(&self, surface: &mut VirtualSurface<'_>, t: &CycleTime);

    /// Draw the picture `elapsed` seconds after the clock started. Degenerate surfaces are left
    /// untouched.
    fn render(&self, surface: &mut VirtualSurface<'_>, elapsed: f64) {
        if !surface.is_drawable() {
            return;
        }
        let t = self.cycle().at(elapsed);
        self.paint(surface, &t);
    }
}

/// The default diagram set keyed by surface identifier, in pipeline order.
pub fn default_scenes() -> Vec<(SurfaceId, Box<dyn Scene>)> {
    let scenes: [(&str, Box<dyn Scene>); 12] = [
        ("c1", Box::new(Sources)),
        ("c2", Box::new(Ingestion)),
        ("c3", Box::new(Preprocess)),
        ("c4", Box::new(Chunking)),
        ("c5", Box::new(Embedding)),
        ("c6", Box::new(VectorStore)),
        ("c7", Box::new(Query)),
        ("c8", Box::new(Similarity)),
        ("c9", Box::new(Rerank)),
        ("c10", Box::new(Prompt)),
        ("c11", Box::new(Generation)),
        ("c12", Box::new(Answer)),
    ];
    scenes
        .into_iter()
        .map(|(id, scene)| (SurfaceId::from(id), scene))
        .collect()
}

/// Default diagram for `id`.
pub fn scene_for(id: &SurfaceId) -> Option<Box<dyn Scene>> {
    default_scenes()
        .into_iter()
        .find(|(k, _)| k == id)
        .map(|(_, scene)| scene)
}

#[cfg(test)]
#[path = "../tests/unit/scene.rs"]
mod tests;
