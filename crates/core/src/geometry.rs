//! Planar geometry helpers.
//!
//! Provides the small set of geometric primitives the clustering core needs:
//! - Coordinate pairs and Euclidean distance
//! - Grid cells obtained by flooring coordinates divided by the cell size
//! - The 3x3 block of cells around a cell, in a fixed scan order
//! - Incremental mean update for centroids

use std::ops::RangeInclusive;

use itertools::{Itertools, iproduct};

/// A 2D coordinate pair (x, y).
pub type Coords = (f64, f64);

/// Euclidean distance between two coordinate pairs.
#[inline]
pub fn distance(a: Coords, b: Coords) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Returns true when both coordinates are finite.
#[inline]
pub fn is_finite(coords: Coords) -> bool {
    coords.0.is_finite() && coords.1.is_finite()
}

/// Moves a mean over `count` samples to include one more sample.
///
/// Computed as `(mean * count + sample) / (count + 1)` on each axis. When
/// the intermediate sum overflows, the axis is stepped as
/// `mean + (sample - mean) / (count + 1)` instead.
#[inline]
pub fn extend_mean(mean: Coords, count: usize, sample: Coords) -> Coords {
    let n = count as f64;
    (
        extend_axis(mean.0, n, sample.0),
        extend_axis(mean.1, n, sample.1),
    )
}

fn extend_axis(mean: f64, n: f64, sample: f64) -> f64 {
    let moved = (mean * n + sample) / (n + 1.0);
    if moved.is_finite() {
        moved
    } else {
        mean + (sample - mean) / (n + 1.0)
    }
}

/// Discrete cell of a uniform square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub x: i64,
    pub y: i64,
}

impl GridCell {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Cell containing `coords` on a grid with square cells of edge `cell_size`.
    ///
    /// Coordinates are floor-divided by the cell size. Values beyond the
    /// `i64` range saturate.
    pub fn containing(coords: Coords, cell_size: f64) -> Self {
        Self {
            x: coords.0.div_euclid(cell_size) as i64,
            y: coords.1.div_euclid(cell_size) as i64,
        }
    }

    /// The 3x3 block of cells centered on this one.
    ///
    /// Cells are yielded x-major: for each column from `x - 1` to `x + 1`,
    /// rows from `y - 1` to `y + 1`. At the edges of the `i64` range the
    /// block is clipped, so no cell is yielded twice.
    pub fn neighborhood(self) -> impl Iterator<Item = GridCell> {
        iproduct!(span(self.x), span(self.y)).map(|(x, y)| GridCell::new(x, y))
    }
}

fn span(v: i64) -> RangeInclusive<i64> {
    v.saturating_sub(1)..=v.saturating_add(1)
}

/// Arithmetic mean of a non-empty sequence of coordinates.
///
/// Returns `None` for an empty sequence.
pub fn mean(coords: impl IntoIterator<Item = Coords>) -> Option<Coords> {
    let (count, (sx, sy)) = coords
        .into_iter()
        .fold((0usize, (0.0, 0.0)), |(n, (sx, sy)), (x, y)| {
            (n + 1, (sx + x, sy + y))
        });
    (count > 0).then(|| (sx / count as f64, sy / count as f64))
}

/// Returns true if every pair of coordinates is strictly closer than `limit`.
pub fn all_pairs_within(coords: &[Coords], limit: f64) -> bool {
    coords
        .iter()
        .tuple_combinations()
        .all(|(a, b)| distance(*a, *b) < limit)
}
