//! A dense adjacency-matrix `Graph` implementation for fixtures and tests.

use tspkit_core::{Graph, GraphPath};

#[derive(Debug, Clone)]
pub struct CompleteGraph {
    n: usize,
    weights: Vec<Vec<f64>>,
}

impl CompleteGraph {
    pub fn new(weights: Vec<Vec<f64>>) -> Self {
        let n = weights.len();
        debug_assert!(weights.iter().all(|row| row.len() == n));
        Self { n, weights }
    }

    pub fn from_points(points: &[(f64, f64)]) -> Self {
        euclidean_graph(points)
    }
}

impl Graph for CompleteGraph {
    fn vertex_count(&self) -> usize {
        self.n
    }

    fn weight(&self, a: usize, b: usize) -> f64 {
        self.weights[a][b]
    }

    fn into_path(&self, tour: Vec<usize>) -> GraphPath {
        let length = tspkit_core::closed_tour_length(&tour, |a, b| self.weight(a, b));
        GraphPath::new(tour, length)
    }
}

/// Builds a `CompleteGraph` from 2-D points using Euclidean distance.
pub fn euclidean_graph(points: &[(f64, f64)]) -> CompleteGraph {
    let n = points.len();
    let mut weights = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let (xi, yi) = points[i];
            let (xj, yj) = points[j];
            weights[i][j] = ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt();
        }
    }
    CompleteGraph::new(weights)
}

/// A graph where every edge has weight 1, used to sweep coverage of
/// `get_tour` across a range of instance sizes and k values.
pub fn unit_weight_graph(n: usize) -> CompleteGraph {
    let mut weights = vec![vec![1.0; n]; n];
    for i in 0..n {
        weights[i][i] = 0.0;
    }
    CompleteGraph::new(weights)
}
