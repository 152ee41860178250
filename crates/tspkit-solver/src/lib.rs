//! tspkit-solver — k-opt local search for the symmetric Traveling
//! Salesperson Problem.
//!
//! This crate provides:
//! - the tour representation (`tour`) and distance-matrix ownership model
//! - the combination catalog (`catalog`), memoized through
//!   `tspkit-cache`'s concurrent computation cache
//! - the cut-index enumerator (`cut`)
//! - the k-opt improver (`improver`)
//! - reference initializers (`init`) and the incremental 2-opt..k-opt
//!   driver (`driver`)
//! - the top-level `Solver` builder, the entry point most callers use

pub mod catalog;
pub mod cut;
pub mod driver;
pub mod improver;
pub mod init;
pub mod tour;

pub use catalog::{catalog as combination_catalog, normalized_combinations, pure_combinations, Catalog, Combination};
pub use cut::CutIndexIterator;
pub use driver::IncrementalDriver;
pub use improver::{CatalogMode, KOpt};
pub use init::{Initializer, NearestNeighbor, RandomTour};
pub use tour::TourState;

use tspkit_core::{Graph, GraphPath, Result, TspError};

/// The solver surface consumed by callers: constructed with
/// k, a number of independent passes, an initializer, and a minimum
/// cost-improvement threshold; `get_tour` runs all passes and returns the
/// best result.
pub struct Solver<I: Initializer> {
    k: usize,
    passes: usize,
    min_cost_improvement: f64,
    initializer: I,
}

impl<I: Initializer> Solver<I> {
    pub fn new(k: usize, passes: usize, min_cost_improvement: f64, initializer: I) -> Result<Self> {
        if k < 2 {
            return Err(TspError::InvalidParameter(format!(
                "k must be >= 2, got {k}"
            )));
        }
        if passes < 1 {
            return Err(TspError::InvalidParameter(format!(
                "passes must be >= 1, got {passes}"
            )));
        }
        if min_cost_improvement < 0.0 {
            return Err(TspError::InvalidParameter(format!(
                "min_cost_improvement must be >= 0, got {min_cost_improvement}"
            )));
        }
        Ok(Self {
            k,
            passes,
            min_cost_improvement,
            initializer,
        })
    }

    /// Validates `graph`, runs `passes` independent initializations, runs
    /// k-opt on each, and returns the best resulting `GraphPath`.
    pub fn get_tour(&mut self, graph: &dyn Graph) -> Result<GraphPath> {
        let state = TourState::from_graph(graph, self.min_cost_improvement)?;
        let koi = KOpt::new(&state, self.k)?;

        let mut best: Option<(Vec<usize>, f64)> = None;
        for pass in 0..self.passes {
            let initial = self.initializer.tour(graph)?;
            let improved = koi.improve_tour(&initial)?;
            let cost = state.cost(&improved);
            tracing::debug!(pass, cost, "pass complete");
            if best.as_ref().map_or(true, |(_, best_cost)| cost < *best_cost) {
                best = Some((improved, cost));
            }
        }

        let (tour, cost) = best.expect("passes >= 1 guarantees at least one result");
        tracing::info!(k = self.k, passes = self.passes, cost, "getTour finished");
        Ok(graph.into_path(tour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Grid4;
    impl Graph for Grid4 {
        fn vertex_count(&self) -> usize {
            4
        }
        fn weight(&self, a: usize, b: usize) -> f64 {
            const W: [[f64; 4]; 4] = [
                [0.0, 20.0, 42.0, 35.0],
                [20.0, 0.0, 30.0, 34.0],
                [42.0, 30.0, 0.0, 12.0],
                [35.0, 34.0, 12.0, 0.0],
            ];
            W[a][b]
        }
    }

    #[test]
    fn solver_rejects_bad_constructor_arguments() {
        assert!(Solver::new(1, 1, 1e-8, NearestNeighbor::from_start(0)).is_err());
        assert!(Solver::new(2, 0, 1e-8, NearestNeighbor::from_start(0)).is_err());
        assert!(Solver::new(2, 1, -1.0, NearestNeighbor::from_start(0)).is_err());
    }

    #[test]
    fn get_tour_returns_hamiltonian_path_with_optimum_cost() {
        let mut solver = Solver::new(2, 4, 1e-8, NearestNeighbor::from_starts([0, 1, 2, 3])).unwrap();
        let path = solver.get_tour(&Grid4).unwrap();
        assert_eq!(path.vertices.len(), 5);
        assert_eq!(path.vertices.first(), path.vertices.last());
        assert!((path.length - 97.0).abs() < 1e-6);
    }
}
