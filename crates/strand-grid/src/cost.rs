//! Cost scale constants and the shared cost buffer handle.

use std::fmt;
use std::sync::Arc;

/// Cell known to be free of obstacles.
pub const FREE: u8 = 0;
/// Cell within the robot's inscribed radius of an obstacle.
pub const INSCRIBED: u8 = 253;
/// Cell occupied by an obstacle.
pub const LETHAL: u8 = 254;
/// Cell with no sensor information.
pub const NO_INFORMATION: u8 = 255;
/// Cost reported for queries outside the grid: maximal hazard.
pub const OUT_OF_BOUNDS_COST: f64 = NO_INFORMATION as f64;

/// A read-only, row-major cost buffer owned by the grid provider.
///
/// Cloning is a reference-count bump. The planner keeps a handle only
/// until the provider installs the next buffer.
#[derive(Clone)]
pub struct CostBuffer {
    cells: Arc<[u8]>,
}

impl CostBuffer {
    /// Wrap a shared byte buffer.
    pub fn new(cells: Arc<[u8]>) -> Self {
        Self { cells }
    }

    /// A buffer of `len` cells all set to `value`.
    pub fn filled(len: usize, value: u8) -> Self {
        Self::new(vec![value; len].into())
    }

    /// The raw bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if the buffer holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `true` if both handles share the same allocation.
    pub fn ptr_eq(&self, other: &CostBuffer) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }
}

impl From<Arc<[u8]>> for CostBuffer {
    fn from(cells: Arc<[u8]>) -> Self {
        Self::new(cells)
    }
}

impl From<Vec<u8>> for CostBuffer {
    fn from(cells: Vec<u8>) -> Self {
        Self::new(cells.into())
    }
}

impl fmt::Debug for CostBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CostBuffer")
            .field("len", &self.cells.len())
            .finish()
    }
}
