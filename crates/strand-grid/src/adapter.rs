//! Grid adapter: geometry, detour mode, and the current cost buffer.

use strand_core::{ConfigError, DetourMode};

use crate::cost::CostBuffer;
use crate::geometry::GridGeometry;
use crate::view::CostView;

/// Holds the planning session's grid configuration and the most recently
/// installed cost buffer.
///
/// [`configure`](Self::configure) is the only place geometry changes.
/// [`set_cost`](Self::set_cost) may be called at any rate; readers pick
/// up the new buffer the next time they take a [`view`](Self::view).
#[derive(Clone, Debug, Default)]
pub struct GridAdapter {
    geometry: Option<GridGeometry>,
    mode: DetourMode,
    cost: Option<CostBuffer>,
}

impl GridAdapter {
    /// An unconfigured adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install grid geometry and detour mode.
    ///
    /// An installed cost buffer survives only if the geometry is
    /// unchanged; otherwise it is released until the provider supplies
    /// one sized for the new grid.
    pub fn configure(&mut self, geometry: GridGeometry, mode: DetourMode) {
        if self.geometry != Some(geometry) && self.cost.take().is_some() {
            tracing::debug!("geometry changed, released stale cost buffer");
        }
        tracing::debug!(
            width = geometry.width(),
            height = geometry.height(),
            resolution = geometry.resolution(),
            %mode,
            "grid configured"
        );
        self.geometry = Some(geometry);
        self.mode = mode;
    }

    /// Install the current cost buffer.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Unconfigured`] if no geometry is installed.
    /// - [`ConfigError::CostBufferSize`] if the buffer length differs from
    ///   `width * height`.
    ///
    /// The previously installed buffer is kept on error.
    pub fn set_cost(&mut self, buffer: CostBuffer) -> Result<(), ConfigError> {
        let geometry = self.geometry.as_ref().ok_or(ConfigError::Unconfigured)?;
        if buffer.len() != geometry.cell_count() {
            return Err(ConfigError::CostBufferSize {
                expected: geometry.cell_count(),
                actual: buffer.len(),
            });
        }
        tracing::trace!(cells = buffer.len(), "cost buffer installed");
        self.cost = Some(buffer);
        Ok(())
    }

    /// Release the installed cost buffer. Later queries read as free.
    pub fn clear_cost(&mut self) {
        self.cost = None;
    }

    /// Installed geometry, if configured.
    pub fn geometry(&self) -> Option<&GridGeometry> {
        self.geometry.as_ref()
    }

    /// Detour mode for the planning session.
    pub fn mode(&self) -> DetourMode {
        self.mode
    }

    /// Currently installed cost buffer, if any.
    pub fn cost(&self) -> Option<&CostBuffer> {
        self.cost.as_ref()
    }

    /// Borrow a view for one planning cycle. `None` until configured.
    pub fn view(&self) -> Option<CostView<'_>> {
        let geometry = self.geometry.as_ref()?;
        Some(CostView::new(
            geometry,
            self.cost.as_ref().map(CostBuffer::as_slice),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{LETHAL, OUT_OF_BOUNDS_COST};
    use strand_core::{CostField, Point2};

    fn geometry() -> GridGeometry {
        GridGeometry::new(4, 4, 0.0, 0.0, 1.0).unwrap()
    }

    #[test]
    fn set_cost_before_configure_fails() {
        let mut adapter = GridAdapter::new();
        assert_eq!(
            adapter.set_cost(CostBuffer::filled(16, 0)),
            Err(ConfigError::Unconfigured)
        );
        assert!(adapter.view().is_none());
    }

    #[test]
    fn set_cost_rejects_wrong_length_and_keeps_previous() {
        let mut adapter = GridAdapter::new();
        adapter.configure(geometry(), DetourMode::Left);
        let good = CostBuffer::filled(16, LETHAL);
        adapter.set_cost(good.clone()).unwrap();
        match adapter.set_cost(CostBuffer::filled(15, 0)) {
            Err(ConfigError::CostBufferSize {
                expected: 16,
                actual: 15,
            }) => {}
            other => panic!("expected CostBufferSize, got {other:?}"),
        }
        assert!(adapter.cost().is_some_and(|c| c.ptr_eq(&good)));
    }

    #[test]
    fn set_cost_does_not_copy() {
        let mut adapter = GridAdapter::new();
        adapter.configure(geometry(), DetourMode::Right);
        let buffer = CostBuffer::filled(16, 7);
        adapter.set_cost(buffer.clone()).unwrap();
        let installed = adapter.cost().map(CostBuffer::as_slice).unwrap();
        assert!(std::ptr::eq(installed, buffer.as_slice()));
    }

    #[test]
    fn view_reads_latest_buffer() {
        let mut adapter = GridAdapter::new();
        adapter.configure(geometry(), DetourMode::Right);
        let p = Point2::new(1.5, 1.5);
        assert_eq!(adapter.view().unwrap().cost_at(p), 0.0);
        adapter.set_cost(CostBuffer::filled(16, LETHAL)).unwrap();
        assert_eq!(adapter.view().unwrap().cost_at(p), LETHAL as f64);
        assert_eq!(
            adapter.view().unwrap().cost_at(Point2::new(9.0, 9.0)),
            OUT_OF_BOUNDS_COST
        );
        adapter.clear_cost();
        assert_eq!(adapter.view().unwrap().cost_at(p), 0.0);
    }

    #[test]
    fn reconfigure_with_new_geometry_releases_buffer() {
        let mut adapter = GridAdapter::new();
        adapter.configure(geometry(), DetourMode::Right);
        adapter.set_cost(CostBuffer::filled(16, 1)).unwrap();

        adapter.configure(geometry(), DetourMode::Left);
        assert!(adapter.cost().is_some(), "same geometry keeps the buffer");
        assert_eq!(adapter.mode(), DetourMode::Left);

        let bigger = GridGeometry::new(8, 8, 0.0, 0.0, 1.0).unwrap();
        adapter.configure(bigger, DetourMode::Left);
        assert!(adapter.cost().is_none());
    }
}
