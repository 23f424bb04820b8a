//! The shared backing surface and its lazy allocation cache.

use crate::IndicatorError;

/// Resolution-sized ARGB pixel surface reused across render passes. Handed
/// to the windowing collaborator after every pass to become the lock
/// window's background.
#[derive(Debug)]
pub struct BackingSurface {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl BackingSurface {
    fn allocate(width: u32, height: u32) -> Result<Self, IndicatorError> {
        let len = width as usize * height as usize;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|source| IndicatorError::SurfaceAlloc {
                width,
                height,
                source,
            })?;
        pixels.resize(len, 0);
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }
}

/// Owns the lazily-allocated backing surface. Dropping it (resolution
/// change) forces a fresh allocation on the next render pass; a pass at an
/// unchanged resolution reuses the previous allocation.
#[derive(Debug, Default)]
pub struct RenderCache {
    surface: Option<BackingSurface>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The surface for `resolution`, reallocating at most once per
    /// resolution change. Allocation failure is the caller's problem; the
    /// cache itself never retries.
    pub fn acquire(&mut self, resolution: (u32, u32)) -> Result<&mut BackingSurface, IndicatorError> {
        let stale = self
            .surface
            .as_ref()
            .is_some_and(|s| (s.width, s.height) != resolution);
        if stale {
            self.surface = None;
        }
        if self.surface.is_none() {
            log::debug!(
                "allocating backing surface for {} x {} px",
                resolution.0,
                resolution.1
            );
            self.surface = Some(BackingSurface::allocate(resolution.0, resolution.1)?);
        }
        Ok(self.surface.as_mut().unwrap())
    }

    /// Drop the cached surface; the next [`acquire`](Self::acquire)
    /// allocates a new one. Called around resolution changes.
    pub fn invalidate(&mut self) {
        self.surface = None;
    }

    pub fn is_allocated(&self) -> bool {
        self.surface.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_allocates_lazily_and_reuses() {
        let mut cache = RenderCache::new();
        assert!(!cache.is_allocated());

        let first = cache.acquire((64, 48)).unwrap();
        first.pixels_mut()[0] = 0xFF_12_34_56;
        assert_eq!(first.pixels().len(), 64 * 48);

        // Same resolution: contents survive, no reallocation
        let again = cache.acquire((64, 48)).unwrap();
        assert_eq!(again.pixels()[0], 0xFF_12_34_56);
    }

    #[test]
    fn test_resolution_change_reallocates() {
        let mut cache = RenderCache::new();
        cache.acquire((64, 48)).unwrap().pixels_mut()[0] = 0xFF_AB_CD_EF;

        let resized = cache.acquire((128, 48)).unwrap();
        assert_eq!(resized.width(), 128);
        assert_eq!(resized.pixels()[0], 0, "stale contents survived realloc");
    }

    #[test]
    fn test_invalidate_drops_surface() {
        let mut cache = RenderCache::new();
        cache.acquire((32, 32)).unwrap();
        assert!(cache.is_allocated());
        cache.invalidate();
        assert!(!cache.is_allocated());
    }
}
