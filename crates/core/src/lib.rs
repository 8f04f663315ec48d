//! yacluster - online distance-based clustering of labeled 2-D points.
//!
//! Points are consumed one at a time. Each joins the nearest existing cluster
//! whose centroid is strictly closer than the threshold, or starts a new
//! cluster. Clusters are bucketed on a grid with cells as wide as the
//! threshold, so each point is only compared against clusters in the 3x3
//! block of cells around it.
//!
//! ```
//! use yacluster_core::cluster;
//!
//! let points = vec![((0.0, 0.0), "a"), ((1.0, 0.0), "b"), ((50.0, 50.0), "c")];
//! let clusters = cluster(points, 5.0).unwrap();
//! assert_eq!(clusters.len(), 2);
//! assert_eq!(clusters[0].members, vec!["a", "b"]);
//! assert_eq!(clusters[0].centroid, (0.5, 0.0));
//! ```

pub mod cluster;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod index;
pub mod params;

pub use cluster::{Cluster, Clusterer, Point};
pub use driver::{cluster, cluster_with_params, ensure_unique_ids};
pub use error::{ClusterError, Result};
pub use geometry::{Coords, GridCell};
pub use index::{ClusterId, GridIndex};
pub use params::ClusterParams;
