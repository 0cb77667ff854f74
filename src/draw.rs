pub(crate) mod color;
pub(crate) mod context;
pub mod primitives;
pub(crate) mod recording;
