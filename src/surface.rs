//! Drawing surfaces: the registry of measured, DPR-scaled backing contexts and the debounced
//! resize pass that rebuilds them.

pub(crate) mod registry;
pub(crate) mod resize;
