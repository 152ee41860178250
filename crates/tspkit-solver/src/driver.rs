//! The "incremental" driver: runs 2-opt, 3-opt, ..., k-opt in sequence
//! over the same tour, each stage seeded with the previous stage's result.
//!
//! Every improver in the chain borrows the same [`TourState`] by
//! reference rather than owning a copy, so it is built once by the
//! driver and shared across stages instead of being reconstructed per
//! stage.

use tspkit_core::Result;

use crate::improver::{CatalogMode, KOpt};
use crate::tour::TourState;

/// Runs a k=2..=k_max chain of k-opt improvers over one [`TourState`].
///
/// The first stage (k=2) searches the full normalized catalog; every
/// later stage searches only the pure catalog, so it never rediscovers
/// a move a lower-k stage already made.
pub struct IncrementalDriver<'a> {
    state: &'a TourState,
    k_max: usize,
}

impl<'a> IncrementalDriver<'a> {
    pub fn new(state: &'a TourState, k_max: usize) -> Self {
        Self { state, k_max }
    }

    pub fn run(&self, initial: &[usize]) -> Result<Vec<usize>> {
        let mut current = initial.to_vec();
        for k in 2..=self.k_max {
            let mode = if k == 2 {
                CatalogMode::Normalized
            } else {
                CatalogMode::Pure
            };
            let improver = KOpt::with_mode(self.state, k, mode)?;
            current = improver.improve_tour(&current)?;
            tracing::info!(k, cost = self.state.cost(&current), "incremental stage complete");
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tspkit_core::Graph;

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
    fn incremental_chain_never_increases_cost() {
        let state = TourState::from_graph(&Grid4, 1e-8).unwrap();
        let driver = IncrementalDriver::new(&state, 3);
        let start = vec![0, 2, 1, 3, 0];
        let before = state.cost(&start);
        let result = driver.run(&start).unwrap();
        state.validate_tour(&result).unwrap();
        assert!(state.cost(&result) <= before + 1e-9);
    }
}
