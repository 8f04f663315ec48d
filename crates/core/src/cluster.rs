//! Incremental assignment of points to clusters.
//!
//! [`Clusterer`] owns the grid index and the cluster arena for a single
//! clustering run. Each pushed point either joins the nearest cluster whose
//! centroid lies strictly within the threshold, or starts a new one.

use tracing::trace;

use crate::error::{ClusterError, Result};
use crate::geometry::{Coords, distance, extend_mean, is_finite};
use crate::index::{ClusterId, GridIndex};
use crate::params::ClusterParams;

/// A labeled input point.
///
/// `id` is an opaque caller token; it is stored and returned, never inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<T> {
    pub coords: Coords,
    pub id: T,
}

impl<T> Point<T> {
    pub const fn new(coords: Coords, id: T) -> Self {
        Self { coords, id }
    }
}

impl<T> From<(Coords, T)> for Point<T> {
    fn from((coords, id): (Coords, T)) -> Self {
        Self { coords, id }
    }
}

/// A group of points and the mean of their coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster<T> {
    /// Arithmetic mean of the members' coordinates.
    pub centroid: Coords,
    /// Member ids in the order they joined.
    pub members: Vec<T>,
}

impl<T> Cluster<T> {
    fn singleton(coords: Coords, id: T) -> Self {
        Self {
            centroid: coords,
            members: vec![id],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Clusters always hold at least one member.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    pub fn into_parts(self) -> (Coords, Vec<T>) {
        (self.centroid, self.members)
    }
}

/// Online clustering state.
///
/// Results depend on the order points are pushed in; earlier assignments are
/// never revisited.
#[derive(Debug, Clone)]
pub struct Clusterer<T> {
    params: ClusterParams,
    index: GridIndex,
    /// Arena of clusters, indexed by `ClusterId::index()`.
    clusters: Vec<Cluster<T>>,
    points_seen: usize,
}

impl<T> Clusterer<T> {
    /// Creates an empty clusterer, validating the threshold up front.
    pub fn new(threshold: f64) -> Result<Self> {
        Ok(Self::with_params(ClusterParams::new(threshold)?))
    }

    pub fn with_params(params: ClusterParams) -> Self {
        Self {
            params,
            index: GridIndex::new(params.cell_size()),
            clusters: Vec::new(),
            points_seen: 0,
        }
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    /// Adds one point and returns the id of the cluster it ended up in.
    ///
    /// Fails with [`ClusterError::InvalidPoint`] for non-finite coordinates;
    /// the state is left untouched in that case.
    pub fn push(&mut self, point: impl Into<Point<T>>) -> Result<ClusterId> {
        let Point { coords, id } = point.into();
        let position = self.points_seen;
        if !is_finite(coords) {
            return Err(ClusterError::InvalidPoint {
                index: position,
                x: coords.0,
                y: coords.1,
            });
        }
        self.points_seen += 1;

        let Some(target) = self.nearest(coords) else {
            let created = self.index.insert(coords);
            debug_assert_eq!(created.index(), self.clusters.len());
            self.clusters.push(Cluster::singleton(coords, id));
            trace!(
                point = position,
                cluster = created.index(),
                cell = ?self.index.cell_of(created),
                "new cluster"
            );
            return Ok(created);
        };

        let cluster = &mut self.clusters[target.index()];
        cluster.centroid = extend_mean(cluster.centroid, cluster.members.len(), coords);
        cluster.members.push(id);
        let centroid = cluster.centroid;
        let moved = self.index.relocate(target, centroid);
        debug_assert!(moved, "cluster {target:?} missing from index");
        trace!(
            point = position,
            cluster = target.index(),
            size = self.clusters[target.index()].len(),
            "merged"
        );
        Ok(target)
    }

    /// Nearest cluster strictly within the threshold, searching the 3x3 cell
    /// block around `coords`. Equal distances keep the first one scanned.
    fn nearest(&self, coords: Coords) -> Option<ClusterId> {
        let threshold = self.params.threshold;
        self.index
            .neighbors(self.index.cell_for(coords))
            .filter_map(|id| {
                let d = distance(coords, self.clusters[id.index()].centroid);
                (d < threshold).then_some((id, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Cluster by id.
    pub fn get(&self, id: ClusterId) -> Option<&Cluster<T>> {
        self.clusters.get(id.index())
    }

    /// Number of clusters formed so far.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of points accepted so far.
    pub fn points_seen(&self) -> usize {
        self.points_seen
    }

    /// Clusters in output order: by grid cell in first-occupied order, then
    /// by position within the cell.
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster<T>> + '_ {
        self.index.iter().map(|id| &self.clusters[id.index()])
    }

    /// Consumes the clusterer, returning clusters in [`Self::clusters`] order.
    pub fn into_clusters(self) -> Vec<Cluster<T>> {
        let mut slots: Vec<Option<Cluster<T>>> =
            self.clusters.into_iter().map(Some).collect();
        self.index
            .iter()
            .filter_map(|id| slots[id.index()].take())
            .collect()
    }
}
