//! Grid bucketing of clusters by centroid.
//!
//! Clusters are identified by stable ids (id == allocation order), never by
//! their centroid value, so two clusters that land on bit-identical centroids
//! stay distinct. The centroid is only used to pick the cell.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

use crate::geometry::{Coords, GridCell};

/// Stable identifier of a cluster within one [`GridIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(usize);

impl ClusterId {
    /// Position of the cluster in allocation order.
    pub const fn index(self) -> usize {
        self.0
    }
}

type CellIds = SmallVec<[ClusterId; 4]>;

/// Mapping from grid cell to the clusters whose centroid falls in it.
///
/// Cells keep the order in which they were first occupied, and ids within a
/// cell keep the order in which they were placed there. A cell that empties
/// keeps its position, so iteration order only depends on the sequence of
/// operations.
#[derive(Debug, Clone)]
pub struct GridIndex {
    cell_size: f64,
    cells: IndexMap<GridCell, CellIds, FxBuildHasher>,
    /// Cell currently holding each id, `None` while detached.
    locations: Vec<Option<GridCell>>,
    attached: usize,
}

impl GridIndex {
    /// Creates an empty index with square cells of edge `cell_size`.
    ///
    /// The caller guarantees `cell_size` is finite and positive.
    pub fn new(cell_size: f64) -> Self {
        debug_assert!(cell_size.is_finite() && cell_size > 0.0);
        Self {
            cell_size,
            cells: IndexMap::default(),
            locations: Vec::new(),
            attached: 0,
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell containing `coords` on this index's grid.
    pub fn cell_for(&self, coords: Coords) -> GridCell {
        GridCell::containing(coords, self.cell_size)
    }

    /// Allocates a new id and files it under the cell of `centroid`.
    pub fn insert(&mut self, centroid: Coords) -> ClusterId {
        let id = ClusterId(self.locations.len());
        self.locations.push(None);
        self.attach(id, centroid);
        id
    }

    /// Detaches `id` from its cell. The id stays allocated.
    ///
    /// Returns false if the id is unknown or already detached.
    pub fn remove(&mut self, id: ClusterId) -> bool {
        let Some(cell) = self.locations.get_mut(id.0).and_then(Option::take) else {
            return false;
        };
        if let Some(ids) = self.cells.get_mut(&cell) {
            if let Some(pos) = ids.iter().position(|&other| other == id) {
                ids.remove(pos);
            }
        }
        self.attached -= 1;
        true
    }

    /// Files a detached `id` under the cell of `centroid`.
    ///
    /// Returns false if the id is unknown or still attached.
    pub fn place(&mut self, id: ClusterId, centroid: Coords) -> bool {
        match self.locations.get(id.0) {
            Some(None) => {
                self.attach(id, centroid);
                true
            }
            _ => false,
        }
    }

    /// Moves `id` to the cell of its new centroid, appending it there.
    pub fn relocate(&mut self, id: ClusterId, centroid: Coords) -> bool {
        self.remove(id) && self.place(id, centroid)
    }

    fn attach(&mut self, id: ClusterId, centroid: Coords) {
        let cell = self.cell_for(centroid);
        self.cells.entry(cell).or_default().push(id);
        self.locations[id.0] = Some(cell);
        self.attached += 1;
    }

    /// Cell currently holding `id`.
    pub fn cell_of(&self, id: ClusterId) -> Option<GridCell> {
        self.locations.get(id.0).copied().flatten()
    }

    /// Ids stored in the 3x3 block of cells around `cell`.
    ///
    /// Cells are visited in [`GridCell::neighborhood`] order, ids within a
    /// cell in storage order.
    pub fn neighbors(&self, cell: GridCell) -> impl Iterator<Item = ClusterId> + '_ {
        cell.neighborhood()
            .filter_map(|c| self.cells.get(&c))
            .flat_map(|ids| ids.iter().copied())
    }

    /// Every attached id, by cell in first-occupied order, then by storage
    /// order within the cell.
    pub fn iter(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.cells.values().flat_map(|ids| ids.iter().copied())
    }

    /// Number of attached ids.
    pub fn len(&self) -> usize {
        self.attached
    }

    pub fn is_empty(&self) -> bool {
        self.attached == 0
    }
}
