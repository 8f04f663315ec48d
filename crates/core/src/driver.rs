//! Batch clustering entry points.

use std::collections::hash_map::Entry;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::cluster::{Cluster, Clusterer, Point};
use crate::error::{ClusterError, Result};
use crate::params::ClusterParams;

/// Clusters points so that each point is strictly closer than `threshold` to
/// the centroid it joined at the time it joined.
///
/// Points are processed in the given order and the result depends on it.
/// For a fixed input order the output, including cluster order, is
/// deterministic; callers should not rely on cluster order beyond that.
///
/// Every input id appears in exactly one output cluster. Ids are expected to
/// be unique; duplicates are not detected here and are stored as independent
/// members (see [`ensure_unique_ids`]).
///
/// Fails before processing any point if `threshold` is not finite and
/// positive, and fails without a partial result on the first non-finite
/// coordinate.
pub fn cluster<T, I>(points: I, threshold: f64) -> Result<Vec<Cluster<T>>>
where
    I: IntoIterator,
    I::Item: Into<Point<T>>,
{
    cluster_with_params(points, ClusterParams::new(threshold)?)
}

/// Same as [`cluster`] with pre-built parameters.
pub fn cluster_with_params<T, I>(points: I, params: ClusterParams) -> Result<Vec<Cluster<T>>>
where
    I: IntoIterator,
    I::Item: Into<Point<T>>,
{
    params.validate()?;
    debug!(threshold = params.threshold, "clustering started");

    let clusterer = points
        .into_iter()
        .try_fold(Clusterer::with_params(params), |mut clusterer, point| {
            clusterer.push(point)?;
            Ok::<_, ClusterError>(clusterer)
        })?;

    debug!(
        points = clusterer.points_seen(),
        clusters = clusterer.len(),
        "clustering finished"
    );
    Ok(clusterer.into_clusters())
}

/// Checks that no two points share an id.
///
/// Returns [`ClusterError::DuplicateId`] with the positions of the first
/// repeated id and its earlier occurrence.
pub fn ensure_unique_ids<'a, T, I>(points: I) -> Result<()>
where
    T: Hash + Eq + 'a,
    I: IntoIterator<Item = &'a Point<T>>,
{
    let mut seen: FxHashMap<&T, usize> = FxHashMap::default();
    for (position, point) in points.into_iter().enumerate() {
        match seen.entry(&point.id) {
            Entry::Occupied(first) => {
                return Err(ClusterError::DuplicateId {
                    first: *first.get(),
                    second: position,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
        }
    }
    Ok(())
}
