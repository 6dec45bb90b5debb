//! The cell grid: occupancy, ground decoration, and the world<->cell
//! affine transform.
//!
//! The grid is the single source of truth for occupancy. Out-of-range cell
//! access is a programming error and panics; callers that produce candidate
//! coordinates from continuous input (see [`Grid::world_to_cell`]) must
//! filter them through a permitted set before touching cells.

use serde::{Deserialize, Serialize};

use crate::dweller::DwellerKind;
use crate::id::{DwellerId, SceneHandle};
use crate::rng::SimRng;

// ---------------------------------------------------------------------------
// Coordinate types
// ---------------------------------------------------------------------------

/// A discrete grid position. Signed so that [`Grid::world_to_cell`] can
/// represent candidates outside the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A continuous world-space position on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Cell state
// ---------------------------------------------------------------------------

/// What occupies a cell.
///
/// `Environ` marks permanent terrain (buildings, fences); such cells are
/// never empty and never qualify as a drag destination, regardless of any
/// kind-based permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Occupancy {
    #[default]
    Empty,
    Environ,
    Dweller { id: DwellerId, kind: DwellerKind },
}

impl Occupancy {
    /// The dweller occupying the cell, if any.
    pub fn dweller(&self) -> Option<DwellerId> {
        match self {
            Occupancy::Dweller { id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// One grid cell: at most one occupant plus optional ground decoration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Cell {
    pub occupant: Occupancy,
    pub ground: Option<SceneHandle>,
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A fixed-size 2D grid of cells, centered on the world origin.
///
/// The affine transform places cell pivots symmetrically around the origin:
/// `world = -half_extent + half_cell + coord * cell_size`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cell_size: f32,
    /// Column-major storage, indexed `x * height + y`.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid. Panics if a dimension is zero or the cell size
    /// is not positive -- a grid that cannot hold a cell is a config bug.
    pub fn new(width: u32, height: u32, cell_size: f32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            width,
            height,
            cell_size,
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Whether a coordinate lies inside the configured bounds.
    pub fn in_bounds(&self, coord: CellCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
    }

    fn index(&self, coord: CellCoord) -> usize {
        assert!(
            self.in_bounds(coord),
            "cell ({}, {}) outside {}x{} grid",
            coord.x,
            coord.y,
            self.width,
            self.height
        );
        (coord.x as u32 * self.height + coord.y as u32) as usize
    }

    // -- Cell access (bounds-checked, panics on out-of-range) --

    pub fn cell_at(&self, coord: CellCoord) -> &Cell {
        &self.cells[self.index(coord)]
    }

    pub fn cell_at_mut(&mut self, coord: CellCoord) -> &mut Cell {
        let idx = self.index(coord);
        &mut self.cells[idx]
    }

    pub fn occupant(&self, coord: CellCoord) -> Occupancy {
        self.cell_at(coord).occupant
    }

    pub fn set_occupant(&mut self, coord: CellCoord, occupant: Occupancy) {
        self.cell_at_mut(coord).occupant = occupant;
    }

    pub fn ground(&self, coord: CellCoord) -> Option<SceneHandle> {
        self.cell_at(coord).ground
    }

    pub fn set_ground(&mut self, coord: CellCoord, ground: Option<SceneHandle>) {
        self.cell_at_mut(coord).ground = ground;
    }

    /// Copy the occupant from `src` to `dst` and clear `src`.
    ///
    /// No validation: callers must pre-validate the destination via
    /// [`Grid::empty_cells`]. The source is always cleared; whatever was at
    /// `dst` is overwritten.
    pub fn move_occupant(&mut self, src: CellCoord, dst: CellCoord) {
        let occupant = self.occupant(src);
        self.set_occupant(dst, occupant);
        self.set_occupant(src, Occupancy::Empty);
    }

    /// Mark a rectangular block of cells as permanent terrain. Such cells
    /// are excluded from emptiness and permission queries forever.
    pub fn mark_environ(&mut self, origin: CellCoord, size: (u32, u32)) {
        for dx in 0..size.0 as i32 {
            for dy in 0..size.1 as i32 {
                self.set_occupant(
                    CellCoord::new(origin.x + dx, origin.y + dy),
                    Occupancy::Environ,
                );
            }
        }
    }

    // -- Emptiness queries --

    /// Cells that qualify as drag destinations: no occupant, or an occupant
    /// whose kind is in `permitted`. Environ cells never qualify.
    ///
    /// Iteration order is column-major (x outer, y inner) and deterministic.
    pub fn empty_cells(&self, permitted: &[DwellerKind]) -> Vec<CellCoord> {
        let mut result = Vec::new();
        self.for_each_cell(|cell, coord| {
            let qualifies = match cell.occupant {
                Occupancy::Empty => true,
                Occupancy::Environ => false,
                Occupancy::Dweller { kind, .. } => permitted.contains(&kind),
            };
            if qualifies {
                result.push(coord);
            }
        });
        result
    }

    /// Uniform choice over `empty_cells(&[])`. `None` when the grid is full.
    pub fn random_empty_cell(&self, rng: &mut SimRng) -> Option<CellCoord> {
        let empty = self.empty_cells(&[]);
        if empty.is_empty() {
            None
        } else {
            Some(empty[rng.pick_index(empty.len())])
        }
    }

    /// Visit every cell with its coordinate.
    pub fn for_each_cell(&self, mut action: impl FnMut(&Cell, CellCoord)) {
        for x in 0..self.width as i32 {
            for y in 0..self.height as i32 {
                action(self.cell_at(CellCoord::new(x, y)), CellCoord::new(x, y));
            }
        }
    }

    // -- Coordinate transform --

    /// World-space pivot of a cell. Panics on out-of-range coordinates.
    pub fn cell_to_world(&self, coord: CellCoord) -> WorldPoint {
        assert!(
            self.in_bounds(coord),
            "cell_to_world on out-of-range cell ({}, {})",
            coord.x,
            coord.y
        );
        let half_cell = self.cell_size / 2.0;
        WorldPoint {
            x: -(self.width as f32) * half_cell + half_cell + coord.x as f32 * self.cell_size,
            y: -(self.height as f32) * half_cell + half_cell + coord.y as f32 * self.cell_size,
        }
    }

    /// Inverse of [`Grid::cell_to_world`]: truncating division after
    /// re-centering. The result may be out of range for world points beyond
    /// the grid edge; callers filter candidates against a permitted set
    /// rather than relying on bounds here.
    pub fn world_to_cell(&self, point: WorldPoint) -> CellCoord {
        let half_cell = self.cell_size / 2.0;
        CellCoord {
            x: ((point.x + self.width as f32 * half_cell) / self.cell_size).trunc() as i32,
            y: ((point.y + self.height as f32 * half_cell) / self.cell_size).trunc() as i32,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
