//! # Footprint
//!
//! The vehicle footprint is a polygon in the body frame. To check it against the cost map it is
//! placed at a pose and rasterised onto the grid, either as its outline (the cells touched by
//! each edge) or as its filled interior.
//!
//! Lines are traced with Bresenham's algorithm: the major axis advances one cell per step while
//! an integer error term decides when the minor axis steps, so no cell is more than half a cell
//! off the ideal line.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::{
    loc::Pose2,
    map::{GridCell, GridGeometry},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The vehicle footprint polygon, expressed in the body frame (origin at the rear axle centre,
/// +ve X forwards).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintSpec {
    points_m: Vec<Vector2<f64>>,
}

/// A set of grid cells covered by a footprint.
///
/// Cells are unique and ordered by row (Y) then column (X).
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintCells {
    pub kind: FootprintCellsKind,
    pub cells: Vec<GridCell>,
}

/// Iterator over the cells of a Bresenham line between two cells, endpoints included.
///
/// Cells are yielded starting from the lower (by X then Y) endpoint so that the cell set does
/// not depend on the order the endpoints are given in.
#[derive(Debug, Clone)]
pub struct LineCells {
    x: i64,
    y: i64,
    x_major: bool,
    x_step: i64,
    y_step: i64,
    num: i64,
    num_add: i64,
    den: i64,
    remaining: i64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Which part of the footprint a [`FootprintCells`] covers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FootprintCellsKind {
    /// Only the cells touched by the polygon edges
    Outline,

    /// The outline plus all interior cells
    Filled,
}

/// Errors in constructing a footprint.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FootprintError {
    #[error("A footprint needs at least 3 points, found {0}")]
    TooFewPoints(usize),

    #[error("Footprint point {0} is not finite")]
    NonFinitePoint(usize),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FootprintSpec {
    /// Create a new footprint from the polygon's vertices in the body frame.
    pub fn new(points_m: Vec<Vector2<f64>>) -> Result<Self, FootprintError> {
        if points_m.len() < 3 {
            return Err(FootprintError::TooFewPoints(points_m.len()));
        }

        if let Some(i) = points_m
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(FootprintError::NonFinitePoint(i));
        }

        Ok(Self { points_m })
    }

    /// Create a footprint from `[x, y]` pairs, as found in parameter files.
    pub fn from_pairs(points_m: &[[f64; 2]]) -> Result<Self, FootprintError> {
        Self::new(points_m.iter().map(|p| Vector2::new(p[0], p[1])).collect())
    }

    /// A rectangular footprint reaching `front_m` ahead of and `rear_m` behind the origin, and
    /// `half_width_m` either side of it.
    pub fn rectangle(front_m: f64, rear_m: f64, half_width_m: f64) -> Result<Self, FootprintError> {
        Self::new(vec![
            Vector2::new(front_m, half_width_m),
            Vector2::new(-rear_m, half_width_m),
            Vector2::new(-rear_m, -half_width_m),
            Vector2::new(front_m, -half_width_m),
        ])
    }

    /// The polygon vertices in the body frame.
    pub fn points_m(&self) -> &[Vector2<f64>] {
        &self.points_m
    }

    /// The polygon vertices placed at the given pose, in the map frame.
    pub fn transform<'a>(&'a self, pose: &'a Pose2) -> impl Iterator<Item = Vector2<f64>> + 'a {
        self.points_m.iter().map(move |p| pose.transform_point(p))
    }

    /// Distance from the body origin to the furthest vertex.
    pub fn circumscribed_radius_m(&self) -> f64 {
        self.points_m.iter().map(|p| p.norm()).fold(0.0, f64::max)
    }
}

impl FootprintCells {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &GridCell) -> bool {
        self.cells
            .binary_search_by_key(&(cell.y, cell.x), |c| (c.y, c.x))
            .is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridCell> {
        self.cells.iter()
    }

    /// Build a cell set, sorting and removing duplicates.
    fn from_unsorted(kind: FootprintCellsKind, mut cells: Vec<GridCell>) -> Self {
        cells.sort_unstable_by_key(|c| (c.y, c.x));
        cells.dedup();

        Self { kind, cells }
    }
}

impl Iterator for LineCells {
    type Item = GridCell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining <= 0 {
            return None;
        }
        self.remaining -= 1;

        let cell = GridCell::new(self.x, self.y);

        // Step the minor axis once the error term passes a whole cell
        self.num += self.num_add;
        if self.num >= self.den {
            self.num -= self.den;
            if self.x_major {
                self.y += self.y_step;
            } else {
                self.x += self.x_step;
            }
        }

        // Always step the major axis
        if self.x_major {
            self.x += self.x_step;
        } else {
            self.y += self.y_step;
        }

        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.max(0) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for LineCells {}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Trace the cells on the line between two cells, both endpoints included.
pub fn line_cells(a: GridCell, b: GridCell) -> LineCells {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };

    let dx = (end.x - start.x).abs();
    let dy = (end.y - start.y).abs();
    let x_step = if end.x >= start.x { 1 } else { -1 };
    let y_step = if end.y >= start.y { 1 } else { -1 };

    let x_major = dx >= dy;
    let (den, num_add) = if x_major { (dx, dy) } else { (dy, dx) };

    LineCells {
        x: start.x,
        y: start.y,
        x_major,
        x_step,
        y_step,
        num: den / 2,
        num_add,
        den,
        remaining: den + 1,
    }
}

/// Iterate over the cells touched by the footprint's edges when placed at the given pose.
///
/// Cells may be repeated (vertices are shared by two edges) and may lie outside the grid.
pub fn outline_iter(
    pose: &Pose2,
    footprint: &FootprintSpec,
    geometry: &GridGeometry,
) -> impl Iterator<Item = GridCell> {
    let vertices: Vec<GridCell> = footprint
        .transform(pose)
        .map(|p| geometry.world_to_cell(&p))
        .collect();
    let n = vertices.len();

    (0..n).flat_map(move |i| line_cells(vertices[i], vertices[(i + 1) % n]))
}

/// Get the set of cells touched by the footprint's edges when placed at the given pose.
pub fn outline_cells(pose: &Pose2, footprint: &FootprintSpec, geometry: &GridGeometry) -> FootprintCells {
    FootprintCells::from_unsorted(
        FootprintCellsKind::Outline,
        outline_iter(pose, footprint, geometry).collect(),
    )
}

/// Fill an outline row by row, adding every cell between the leftmost and rightmost outline
/// cell of each row.
pub fn fill_cells(outline: &FootprintCells) -> FootprintCells {
    let mut cells = Vec::with_capacity(outline.len() * 2);

    // The outline is ordered by row so each row's extent is a contiguous run
    let mut iter = outline.cells.iter().peekable();
    while let Some(first) = iter.next() {
        let mut max_x = first.x;
        let mut min_x = first.x;
        while let Some(next) = iter.peek() {
            if next.y != first.y {
                break;
            }
            min_x = min_x.min(next.x);
            max_x = max_x.max(next.x);
            iter.next();
        }

        cells.extend((min_x..=max_x).map(|x| GridCell::new(x, first.y)));
    }

    FootprintCells::from_unsorted(FootprintCellsKind::Filled, cells)
}

/// Rasterise the footprint at the given pose, optionally filling its interior.
pub fn footprint_cells(
    pose: &Pose2,
    footprint: &FootprintSpec,
    geometry: &GridGeometry,
    fill: bool,
) -> FootprintCells {
    let outline = outline_cells(pose, footprint, geometry);

    if fill {
        fill_cells(&outline)
    } else {
        outline
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
