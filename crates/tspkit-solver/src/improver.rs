//! The k-opt improver (KOI): repeatedly scans all edge-cut choices,
//! consults the combination catalog for recombinations, and applies the
//! best-improving move until none exists.
//!
//! # Example
//!
//! ```
//! use tspkit_core::Graph;
//! use tspkit_solver::{KOpt, TourState};
//!
//! struct Square;
//! impl Graph for Square {
//!     fn vertex_count(&self) -> usize { 4 }
//!     fn weight(&self, a: usize, b: usize) -> f64 {
//!         const W: [[f64; 4]; 4] = [
//!             [0.0, 1.0, 2.0, 1.0],
//!             [1.0, 0.0, 1.0, 2.0],
//!             [2.0, 1.0, 0.0, 1.0],
//!             [1.0, 2.0, 1.0, 0.0],
//!         ];
//!         W[a][b]
//!     }
//! }
//!
//! let state = TourState::from_graph(&Square, 1e-8).unwrap();
//! let koi = KOpt::new(&state, 2).unwrap();
//!
//! // The crossing tour 0-2-1-3-0 uncrosses to cost 4.0 under 2-opt.
//! let result = koi.improve_tour(&[0, 2, 1, 3, 0]).unwrap();
//! assert_eq!(state.cost(&result), 4.0);
//! ```

use std::sync::Arc;

use tspkit_core::{Result, TspError};

use crate::catalog::{normalized_combinations, pure_combinations, Combination};
use crate::cut::CutIndexIterator;
use crate::tour::TourState;

/// Which combination catalog an improver consults.
///
/// `Normalized` is the default: every recombination, including moves that
/// happen to reuse an original edge. `Pure` is used by [`crate::driver`]'s
/// incremental chain so that a k-opt stage never rediscovers a move a
/// lower-k stage already made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogMode {
    Normalized,
    Pure,
}

/// A single k-opt improver bound to a borrowed [`TourState`].
///
/// One instance handles one value of k; [`crate::driver::IncrementalDriver`]
/// composes several of these over the same `TourState` rather than using
/// an inheritance chain between a 2-opt class and its k-opt descendants.
pub struct KOpt<'a> {
    state: &'a TourState,
    k: usize,
    mode: CatalogMode,
    combinations: Arc<Vec<Combination>>,
}

impl<'a> KOpt<'a> {
    /// Builds an improver for `k` over a borrowed [`TourState`], fetching
    /// (and, on first use for this `k`, building) the normalized
    /// combination catalog.
    ///
    /// # Example
    ///
    /// ```
    /// use tspkit_core::Graph;
    /// use tspkit_solver::{KOpt, TourState};
    ///
    /// struct Triangle;
    /// impl Graph for Triangle {
    ///     fn vertex_count(&self) -> usize { 3 }
    ///     fn weight(&self, a: usize, b: usize) -> f64 {
    ///         const W: [[f64; 3]; 3] = [[0.0, 1.0, 2.0], [1.0, 0.0, 3.0], [2.0, 3.0, 0.0]];
    ///         W[a][b]
    ///     }
    /// }
    ///
    /// let state = TourState::from_graph(&Triangle, 1e-8).unwrap();
    /// let koi = KOpt::new(&state, 2).unwrap();
    /// assert_eq!(koi.k(), 2);
    ///
    /// // k must be at least 2.
    /// assert!(KOpt::new(&state, 1).is_err());
    /// ```
    pub fn new(state: &'a TourState, k: usize) -> Result<Self> {
        Self::with_mode(state, k, CatalogMode::Normalized)
    }

    pub(crate) fn with_mode(state: &'a TourState, k: usize, mode: CatalogMode) -> Result<Self> {
        if k < 2 {
            return Err(TspError::InvalidParameter(format!(
                "k must be >= 2, got {k}"
            )));
        }
        if state.n() < k {
            return Err(TspError::InvalidInput(format!(
                "graph has {} vertices, fewer than k={k}",
                state.n()
            )));
        }
        let combinations = match mode {
            CatalogMode::Normalized => normalized_combinations(k)?,
            CatalogMode::Pure => pure_combinations(k)?,
        };
        Ok(Self {
            state,
            k,
            mode,
            combinations,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Runs the improvement loop once from `initial` to a k-opt local
    /// optimum and returns the resulting tour.
    ///
    /// # Example
    ///
    /// ```
    /// use tspkit_core::Graph;
    /// use tspkit_solver::{KOpt, TourState};
    ///
    /// struct FourCity;
    /// impl Graph for FourCity {
    ///     fn vertex_count(&self) -> usize { 4 }
    ///     fn weight(&self, a: usize, b: usize) -> f64 {
    ///         const W: [[f64; 4]; 4] = [
    ///             [0.0, 20.0, 42.0, 35.0],
    ///             [20.0, 0.0, 30.0, 34.0],
    ///             [42.0, 30.0, 0.0, 12.0],
    ///             [35.0, 34.0, 12.0, 0.0],
    ///         ];
    ///         W[a][b]
    ///     }
    /// }
    ///
    /// let state = TourState::from_graph(&FourCity, 1e-8).unwrap();
    /// let koi = KOpt::new(&state, 2).unwrap();
    /// let result = koi.improve_tour(&[0, 2, 1, 3, 0]).unwrap();
    /// assert_eq!(state.cost(&result), 97.0);
    /// ```
    pub fn improve_tour(&self, initial: &[usize]) -> Result<Vec<usize>> {
        self.state.validate_tour(initial)?;

        let mut current = initial.to_vec();
        let mut pass = 0usize;
        while let Some(mv) = self.find_best_move(&current) {
            current = apply_move(&current, self.k, &mv.combination, &mv.cut);
            pass += 1;
            tracing::debug!(
                k = self.k,
                pass,
                delta = mv.delta,
                "applied k-opt move"
            );
        }
        tracing::info!(
            k = self.k,
            cost = self.state.cost(&current),
            moves_applied = pass,
            "k-opt pass reached local optimum"
        );
        Ok(current)
    }

    /// Scans all strictly increasing k-subsets of cut positions and every
    /// non-identity combination, returning the single most-improving move
    /// (or `None` if the tour is already a k-opt local optimum).
    fn find_best_move(&self, tour: &[usize]) -> Option<BestMove> {
        let mut best: Option<BestMove> = None;
        let mut best_delta = -self.state.min_improvement();

        for cut in CutIndexIterator::new(self.state.n(), self.k) {
            let bounds = self.segment_bounds(tour, &cut);
            let base_cost = self.combination_cost(&bounds, &identity(self.k));

            let skip = if self.mode == CatalogMode::Normalized { 1 } else { 0 };
            for combination in self.combinations.iter().skip(skip) {
                let cost = self.combination_cost(&bounds, combination);
                let delta = cost - base_cost;
                if delta < best_delta {
                    best_delta = delta;
                    best = Some(BestMove {
                        combination: combination.clone(),
                        cut: cut.clone(),
                        delta,
                    });
                }
            }
        }

        best
    }

    fn segment_bounds(&self, tour: &[usize], cut: &[usize]) -> Vec<usize> {
        let mut bounds = vec![0usize; 2 * self.k];
        for j in 0..self.k {
            bounds[2 * j] = tour[cut[j]];
            bounds[2 * j + 1] = tour[cut[j] + 1];
        }
        bounds
    }

    fn combination_cost(&self, bounds: &[usize], combination: &[usize]) -> f64 {
        (0..self.k)
            .map(|i| self.state.distance(bounds[combination[2 * i]], bounds[combination[2 * i + 1]]))
            .sum()
    }
}

struct BestMove {
    combination: Combination,
    cut: Vec<usize>,
    delta: f64,
}

fn identity(k: usize) -> Vec<usize> {
    (0..2 * k).collect()
}

/// Applies a recombination: translates each canonical bound index to a
/// tour position, splits the tour into k+1 closed-interval segments, and
/// rebuilds it by copying each segment forward or reversed.
fn apply_move(tour: &[usize], k: usize, combination: &[usize], cut: &[usize]) -> Vec<usize> {
    let n = tour.len() - 1;
    let pos = |b: usize| cut[b >> 1] + (b & 1);

    let mut segments = Vec::with_capacity(k + 1);
    segments.push((0, pos(combination[0])));
    for i in 0..k - 1 {
        segments.push((pos(combination[2 * i + 1]), pos(combination[2 * i + 2])));
    }
    segments.push((pos(combination[2 * k - 1]), n));

    let mut new_tour = Vec::with_capacity(n + 1);
    for (a, b) in segments {
        if a <= b {
            new_tour.extend_from_slice(&tour[a..=b]);
        } else {
            new_tour.extend(tour[b..=a].iter().rev());
        }
    }
    debug_assert_eq!(new_tour.len(), n + 1);
    *new_tour.last_mut().expect("tour is non-empty") = new_tour[0];
    new_tour
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
            // A(0) B(1) C(2) D(3): AB=20 AC=42 AD=35 BC=30 BD=34 CD=12
            const W: [[f64; 4]; 4] = [
                [0.0, 20.0, 42.0, 35.0],
                [20.0, 0.0, 30.0, 34.0],
                [42.0, 30.0, 0.0, 12.0],
                [35.0, 34.0, 12.0, 0.0],
            ];
            W[a][b]
        }
    }

    /// A 4-city symmetric instance with optimum cost 97 via A-B-C-D-A,
    /// reached from every starting tour.
    #[test]
    fn four_city_two_opt_finds_optimum() {
        let state = TourState::from_graph(&Grid4, 1e-8).unwrap();
        let koi = KOpt::new(&state, 2).unwrap();
        for start in [
            vec![0, 1, 2, 3, 0],
            vec![0, 2, 1, 3, 0],
            vec![0, 3, 1, 2, 0],
        ] {
            let result = koi.improve_tour(&start).unwrap();
            state.validate_tour(&result).unwrap();
            assert!((state.cost(&result) - 97.0).abs() < 1e-6, "{result:?}");
        }
    }

    #[test]
    fn rejects_k_below_two() {
        let state = TourState::from_graph(&Grid4, 1e-8).unwrap();
        assert!(matches!(KOpt::new(&state, 1), Err(TspError::InvalidParameter(_))));
    }

    #[test]
    fn rejects_k_greater_than_n() {
        let state = TourState::from_graph(&Grid4, 1e-8).unwrap();
        assert!(matches!(KOpt::new(&state, 5), Err(TspError::InvalidInput(_))));
    }

    #[test]
    fn improvement_never_increases_cost() {
        let state = TourState::from_graph(&Grid4, 1e-8).unwrap();
        let koi = KOpt::new(&state, 3).unwrap();
        let start = vec![0, 1, 2, 3, 0];
        let before = state.cost(&start);
        let after = koi.improve_tour(&start).unwrap();
        assert!(state.cost(&after) <= before + 1e-9);
    }

    #[test]
    fn output_is_valid_hamiltonian_cycle() {
        let state = TourState::from_graph(&Grid4, 1e-8).unwrap();
        let koi = KOpt::new(&state, 2).unwrap();
        let result = koi.improve_tour(&[0, 1, 2, 3, 0]).unwrap();
        assert!(state.validate_tour(&result).is_ok());
    }
}
