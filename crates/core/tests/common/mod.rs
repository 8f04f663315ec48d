//! Shared helpers for clustering tests: a seeded generator and input builders.

#![allow(dead_code)]

use yacluster_core::geometry::{self, Coords};
use yacluster_core::{Cluster, Point};

#[path = "../../benches/common/rng.rs"]
mod rng;

pub use rng::XorShift64;

pub const TRIALS: u64 = 200;

impl XorShift64 {
    /// A coordinate in [-100, 100], either fractional or a whole number.
    pub fn coordinate(&mut self) -> f64 {
        if self.next_u64() % 2 == 0 {
            self.gen_f64(-100.0, 100.0)
        } else {
            self.gen_index(201) as f64 - 100.0
        }
    }

    pub fn coords(&mut self) -> Coords {
        (self.coordinate(), self.coordinate())
    }

    /// A threshold, either a whole number in [1, 1000] or spread
    /// log-uniformly over [1e-6, 1e6].
    pub fn threshold(&mut self) -> f64 {
        if self.gen_index(4) == 0 {
            (1 + self.gen_index(1000)) as f64
        } else {
            10f64.powf(self.gen_f64(-6.0, 6.0))
        }
    }

    /// Between `min` and `max` points (inclusive) with unique ids.
    pub fn points(&mut self, min: usize, max: usize) -> Vec<Point<String>> {
        let len = min + self.gen_index(max - min + 1);
        (0..len)
            .map(|i| Point::new(self.coords(), format!("p{i}")))
            .collect()
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.gen_index(i + 1);
            items.swap(i, j);
        }
    }
}

/// Coordinates of the point carrying `id`.
pub fn coords_of(id: &str, points: &[Point<String>]) -> Coords {
    points
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.coords)
        .unwrap_or_else(|| panic!("unknown id {id}"))
}

pub fn member_coords(cluster: &Cluster<String>, points: &[Point<String>]) -> Vec<Coords> {
    cluster
        .members
        .iter()
        .map(|id| coords_of(id, points))
        .collect()
}

pub fn mean_of(coords: &[Coords]) -> Coords {
    geometry::mean(coords.iter().copied()).expect("cluster without members")
}

/// Member sets sorted for order-independent comparison.
pub fn grouping<T: Clone + Ord>(clusters: &[Cluster<T>]) -> Vec<Vec<T>> {
    let mut groups: Vec<Vec<T>> = clusters
        .iter()
        .map(|c| {
            let mut members = c.members.clone();
            members.sort();
            members
        })
        .collect();
    groups.sort();
    groups
}
