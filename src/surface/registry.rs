use std::collections::HashMap;
use std::fmt;

use crate::draw::context::DrawContext;
use crate::foundation::core::{Affine, LogicalSize, PhysicalSize, SurfaceId};
use crate::host::{LayoutHost, SurfaceProvider};

/// One registered drawing surface. Built by [`SurfaceRegistry::initialize_surface`] and replaced
/// as a whole on every re-initialization.
pub struct SurfaceEntry {
    id: SurfaceId,
    context: Box<dyn DrawContext>,
    physical: PhysicalSize,
    logical: LogicalSize,
    fallback_height: u32,
    active: bool,
}

impl SurfaceEntry {
    /// Surface identifier.
    pub fn id(&self) -> &SurfaceId {
        &self.id
    }

    /// Backing-store size, always `logical * device_pixel_ratio`.
    pub fn physical(&self) -> PhysicalSize {
        self.physical
    }

    /// Container layout size (fallback height applied).
    pub fn logical(&self) -> LogicalSize {
        self.logical
    }

    /// Height used when the container reported none.
    pub fn fallback_height(&self) -> u32 {
        self.fallback_height
    }

    /// Whether the scheduler draws this surface.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Backing context.
    pub fn context(&self) -> &dyn DrawContext {
        self.context.as_ref()
    }

    /// Mutable backing context.
    pub fn context_mut(&mut self) -> &mut dyn DrawContext {
        self.context.as_mut()
    }
}

impl fmt::Debug for SurfaceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceEntry")
            .field("id", &self.id)
            .field("physical", &self.physical)
            .field("logical", &self.logical)
            .field("fallback_height", &self.fallback_height)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// Identifier → surface table plus the remembered fallback heights resize passes re-derive
/// entries from. Iteration follows first-registration order.
pub struct SurfaceRegistry {
    device_pixel_ratio: u32,
    entries: Vec<SurfaceEntry>,
    index: HashMap<SurfaceId, usize>,
    fallbacks: Vec<(SurfaceId, u32)>,
}

impl SurfaceRegistry {
    /// Empty registry for a fixed device pixel ratio.
    pub fn new(device_pixel_ratio: u32) -> Self {
        Self {
            device_pixel_ratio: device_pixel_ratio.max(1),
            entries: Vec::new(),
            index: HashMap::new(),
            fallbacks: Vec::new(),
        }
    }

    /// Device pixel ratio applied to every surface.
    pub fn device_pixel_ratio(&self) -> u32 {
        self.device_pixel_ratio
    }

    /// Measure the container for `id` and (re)build its entry.
    ///
    /// Returns `None` without touching the current entry when the container is missing or its
    /// context cannot be created. The fallback height is remembered either way so a later resize
    /// pass can pick the surface up once its container exists.
    #[tracing::instrument(level = "debug", skip(self, host), fields(surface = %id))]
    pub fn initialize_surface<H>(
        &mut self,
        id: &SurfaceId,
        fallback_height: u32,
        host: &mut H,
    ) -> Option<&SurfaceEntry>
    where
        H: LayoutHost + SurfaceProvider + ?Sized,
    {
        self.remember_fallback(id, fallback_height);

        let Some(measured) = host.container_size(id) else {
            tracing::debug!("container missing; surface left unregistered");
            return None;
        };
        let logical = LogicalSize {
            width: measured.width,
            height: if measured.height == 0 {
                fallback_height
            } else {
                measured.height
            },
        };
        let physical = logical.to_physical(self.device_pixel_ratio);

        let mut context = match host.create_context(id, physical) {
            Ok(ctx) => ctx,
            Err(err) => {
                tracing::warn!(%err, "backing context unavailable; surface skipped");
                return None;
            }
        };
        context.set_transform(Affine::scale(f64::from(self.device_pixel_ratio)));

        let slot = self.index.get(id).copied();
        let entry = SurfaceEntry {
            id: id.clone(),
            context,
            physical,
            logical,
            fallback_height,
            active: slot.is_none_or(|i| self.entries[i].active),
        };
        tracing::debug!(
            width = logical.width,
            height = logical.height,
            "surface initialized"
        );

        let i = match slot {
            Some(i) => {
                self.entries[i] = entry;
                i
            }
            None => {
                self.entries.push(entry);
                let i = self.entries.len() - 1;
                self.index.insert(id.clone(), i);
                i
            }
        };
        Some(&self.entries[i])
    }

    /// Re-run initialization for every known identifier with its remembered fallback height.
    /// Returns how many surfaces were (re)built.
    pub fn reinitialize_all<H>(&mut self, host: &mut H) -> usize
    where
        H: LayoutHost + SurfaceProvider + ?Sized,
    {
        let known = self.fallbacks.clone();
        known
            .iter()
            .filter(|(id, fallback)| self.initialize_surface(id, *fallback, host).is_some())
            .count()
    }

    /// Entry for `id`.
    pub fn get(&self, id: &SurfaceId) -> Option<&SurfaceEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Mutable entry for `id`.
    pub fn get_mut(&mut self, id: &SurfaceId) -> Option<&mut SurfaceEntry> {
        self.index.get(id).map(|&i| &mut self.entries[i])
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &SurfaceEntry> {
        self.entries.iter()
    }

    /// Mutable entries in registration order.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut SurfaceEntry> {
        self.entries.iter_mut()
    }

    /// Remembered fallback height for `id`.
    pub fn remembered_fallback(&self, id: &SurfaceId) -> Option<u32> {
        self.fallbacks
            .iter()
            .find(|(k, _)| k == id)
            .map(|&(_, h)| h)
    }

    /// Known identifiers with their fallback heights, in first-seen order.
    pub fn known(&self) -> &[(SurfaceId, u32)] {
        &self.fallbacks
    }

    /// Include or exclude a surface from drawing. Returns `false` when `id` is not registered.
    pub fn set_active(&mut self, id: &SurfaceId, active: bool) -> bool {
        match self.get_mut(id) {
            Some(e) => {
                e.active = active;
                true
            }
            None => false,
        }
    }

    /// Number of registered surfaces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no surface is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and remembered height.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.fallbacks.clear();
    }

    fn remember_fallback(&mut self, id: &SurfaceId, fallback_height: u32) {
        match self.fallbacks.iter_mut().find(|(k, _)| k == id) {
            Some(slot) => slot.1 = fallback_height,
            None => self.fallbacks.push((id.clone(), fallback_height)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/registry.rs"]
mod tests;
