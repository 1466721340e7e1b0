//! Grid geometry: dimensions, origin, and world/cell conversion.

use strand_core::{ConfigError, Point2};

/// Size and placement of an occupancy grid in the world frame.
///
/// Cell `(col, row)` covers the half-open square
/// `[origin.x + col * res, origin.x + (col + 1) * res)` on x, and the
/// matching interval on y. Cells are stored row-major: index
/// `row * width + col`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    width: u32,
    height: u32,
    origin: Point2,
    resolution: f64,
    cell_count: usize,
}

impl GridGeometry {
    /// Validate and construct a geometry.
    ///
    /// Zero width or height is allowed; every query on such a grid is
    /// out of bounds.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidResolution`] if `resolution` is not finite
    ///   and strictly positive.
    /// - [`ConfigError::InvalidOrigin`] if either origin coordinate is not
    ///   finite.
    /// - [`ConfigError::GridTooLarge`] if `width * height` overflows.
    pub fn new(
        width: u32,
        height: u32,
        origin_x: f64,
        origin_y: f64,
        resolution: f64,
    ) -> Result<Self, ConfigError> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(ConfigError::InvalidResolution { value: resolution });
        }
        if !origin_x.is_finite() || !origin_y.is_finite() {
            return Err(ConfigError::InvalidOrigin {
                x: origin_x,
                y: origin_y,
            });
        }
        let cell_count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(ConfigError::GridTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            origin: Point2::new(origin_x, origin_y),
            resolution,
            cell_count,
        })
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// World position of the corner of cell `(0, 0)`.
    pub fn origin(&self) -> Point2 {
        self.origin
    }

    /// World units per cell.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// `width * height`.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Map a world position to `(col, row)`, flooring toward the origin.
    ///
    /// Returns `None` for non-finite input and for cells outside
    /// `[0, width) x [0, height)`.
    pub fn world_to_cell(&self, p: Point2) -> Option<(u32, u32)> {
        let col = resolve_axis(p.x, self.origin.x, self.resolution, self.width)?;
        let row = resolve_axis(p.y, self.origin.y, self.resolution, self.height)?;
        Some((col, row))
    }

    /// Map a world position to its row-major cell index.
    pub fn world_to_index(&self, p: Point2) -> Option<usize> {
        self.world_to_cell(p)
            .map(|(col, row)| row as usize * self.width as usize + col as usize)
    }

    /// World position of the centre of cell `(col, row)`.
    ///
    /// Does not check bounds.
    pub fn cell_center(&self, col: u32, row: u32) -> Point2 {
        Point2::new(
            self.origin.x + (col as f64 + 0.5) * self.resolution,
            self.origin.y + (row as f64 + 0.5) * self.resolution,
        )
    }

    /// `true` if `p` falls inside the grid.
    pub fn contains(&self, p: Point2) -> bool {
        self.world_to_cell(p).is_some()
    }
}

/// Floor one world coordinate to a cell index on an axis of `len` cells.
fn resolve_axis(value: f64, origin: f64, resolution: f64, len: u32) -> Option<u32> {
    let cell = ((value - origin) / resolution).floor();
    // NaN fails both comparisons.
    if cell >= 0.0 && cell < len as f64 {
        Some(cell as u32)
    } else {
        None
    }
}
