//! Tour representation (TR): the dense distance matrix and the shared,
//! read-only state an improver consults while searching.

use tspkit_core::{closed_tour_length, Graph, Result, TspError};

/// `(n, D, min_improvement)` bundled into a single value, built once
/// from a graph and shared by reference across a sequence of improvers —
/// the composition-based replacement for the inheritance chain a 2-opt /
/// k-opt class hierarchy would otherwise use.
pub struct TourState {
    n: usize,
    distances: Vec<Vec<f64>>,
    min_improvement: f64,
}

impl TourState {
    /// Validates `graph` (undirected-complete is assumed of the trait;
    /// here we validate vertex count and weight finiteness) and builds the
    /// dense distance matrix once.
    pub fn from_graph(graph: &dyn Graph, min_improvement: f64) -> Result<Self> {
        if min_improvement < 0.0 {
            return Err(TspError::InvalidParameter(format!(
                "min_improvement must be >= 0, got {min_improvement}"
            )));
        }

        let n = graph.vertex_count();
        if n == 0 {
            return Err(TspError::InvalidInput("graph has no vertices".into()));
        }

        let mut distances = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let w = graph.weight(i, j);
                if !w.is_finite() || w < 0.0 {
                    return Err(TspError::InvalidInput(format!(
                        "edge weight ({i}, {j}) = {w} is not a finite non-negative number"
                    )));
                }
                let back = graph.weight(j, i);
                if (w - back).abs() > 1e-9 {
                    return Err(TspError::InvalidInput(format!(
                        "graph is not undirected: weight({i},{j})={w} != weight({j},{i})={back}"
                    )));
                }
                distances[i][j] = w;
            }
        }

        Ok(Self {
            n,
            distances,
            min_improvement,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn min_improvement(&self) -> f64 {
        self.min_improvement
    }

    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.distances[a][b]
    }

    /// Validates that `tour` is a well-formed closed Hamiltonian cycle of
    /// this instance: length n+1, first == last, interior a permutation of
    /// `0..n`.
    pub fn validate_tour(&self, tour: &[usize]) -> Result<()> {
        if tour.len() != self.n + 1 {
            return Err(TspError::InvalidInput(format!(
                "tour has length {}, expected {}",
                tour.len(),
                self.n + 1
            )));
        }
        if tour.first() != tour.last() {
            return Err(TspError::InvalidInput(
                "tour is not closed: first != last".into(),
            ));
        }
        let mut seen = vec![false; self.n];
        for &v in &tour[..self.n] {
            if v >= self.n || std::mem::replace(&mut seen[v], true) {
                return Err(TspError::InvalidInput(format!(
                    "tour is not a Hamiltonian cycle: vertex {v} missing or duplicated"
                )));
            }
        }
        Ok(())
    }

    /// Total weight of the closed tour's consecutive edges.
    pub fn cost(&self, tour: &[usize]) -> f64 {
        closed_tour_length(tour, |a, b| self.distance(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Square;
    impl Graph for Square {
        fn vertex_count(&self) -> usize {
            4
        }
        fn weight(&self, a: usize, b: usize) -> f64 {
            const W: [[f64; 4]; 4] = [
                [0.0, 1.0, 2.0, 1.0],
                [1.0, 0.0, 1.0, 2.0],
                [2.0, 1.0, 0.0, 1.0],
                [1.0, 2.0, 1.0, 0.0],
            ];
            W[a][b]
        }
    }

    #[test]
    fn cost_sums_consecutive_edges() {
        let state = TourState::from_graph(&Square, 1e-8).unwrap();
        assert_eq!(state.cost(&[0, 1, 2, 3, 0]), 4.0);
    }

    #[test]
    fn rejects_negative_min_improvement() {
        assert!(matches!(
            TourState::from_graph(&Square, -1.0),
            Err(TspError::InvalidParameter(_))
        ));
    }

    #[test]
    fn validate_tour_rejects_non_hamiltonian() {
        let state = TourState::from_graph(&Square, 1e-8).unwrap();
        assert!(state.validate_tour(&[0, 1, 1, 3, 0]).is_err());
        assert!(state.validate_tour(&[0, 1, 2, 0]).is_err());
        assert!(state.validate_tour(&[0, 1, 2, 3, 0]).is_ok());
    }

    struct NonFinite;
    impl Graph for NonFinite {
        fn vertex_count(&self) -> usize {
            2
        }
        fn weight(&self, _a: usize, _b: usize) -> f64 {
            f64::NAN
        }
    }

    #[test]
    fn rejects_non_finite_weights() {
        assert!(matches!(
            TourState::from_graph(&NonFinite, 1e-8),
            Err(TspError::InvalidInput(_))
        ));
    }
}
