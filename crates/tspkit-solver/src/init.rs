//! Initializer collaborators: producers of an initial Hamiltonian cycle
//! for the solver to improve. Only the `Initializer` interface the
//! solver consumes is pinned; the implementations here are the reference
//! ones a complete crate ships.

use rand::seq::SliceRandom;
use rand::Rng;

use tspkit_core::{closed_tour_length, Graph, Result, TspError};

/// Produces an initial Hamiltonian cycle of a graph.
pub trait Initializer {
    fn tour(&mut self, graph: &dyn Graph) -> Result<Vec<usize>>;
}

/// Uniformly random Hamiltonian cycle, via a Fisher-Yates shuffle of the
/// vertex set.
pub struct RandomTour<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomTour<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Initializer for RandomTour<R> {
    fn tour(&mut self, graph: &dyn Graph) -> Result<Vec<usize>> {
        let n = graph.vertex_count();
        if n == 0 {
            return Err(TspError::InvalidInput("graph has no vertices".into()));
        }
        let mut vertices = graph.vertices();
        vertices.shuffle(&mut self.rng);
        vertices.push(vertices[0]);
        Ok(vertices)
    }
}

enum Starts {
    One(usize),
    Many(Vec<usize>),
}

/// Greedy nearest-neighbor tour from one or more candidate start vertices,
/// keeping the cheapest. Ties between equidistant neighbors are broken in
/// favor of whichever appears first in the graph's iteration order.
pub struct NearestNeighbor {
    starts: Starts,
}

impl NearestNeighbor {
    pub fn from_start(start: usize) -> Self {
        Self {
            starts: Starts::One(start),
        }
    }

    pub fn from_starts(starts: impl IntoIterator<Item = usize>) -> Self {
        Self {
            starts: Starts::Many(starts.into_iter().collect()),
        }
    }

    pub fn from_rng(rng: &mut impl Rng, graph: &dyn Graph) -> Result<Self> {
        let n = graph.vertex_count();
        if n == 0 {
            return Err(TspError::InvalidInput("graph has no vertices".into()));
        }
        Ok(Self::from_start(rng.random_range(0..n)))
    }

    fn greedy_from(&self, graph: &dyn Graph, start: usize) -> Result<Vec<usize>> {
        let n = graph.vertex_count();
        if start >= n {
            return Err(TspError::InvalidParameter(format!(
                "start vertex {start} out of range for a graph with {n} vertices"
            )));
        }
        let order = graph.vertices();

        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n + 1);
        tour.push(start);
        visited[start] = true;
        let mut current = start;

        for _ in 1..n {
            let mut nearest = None;
            let mut nearest_distance = f64::INFINITY;
            for &candidate in &order {
                if visited[candidate] {
                    continue;
                }
                let distance = graph.weight(current, candidate);
                // Strict `<` keeps whichever candidate came first in
                // iteration order on a tie.
                if distance < nearest_distance {
                    nearest_distance = distance;
                    nearest = Some(candidate);
                }
            }
            let next = nearest.expect("an unvisited vertex must exist");
            visited[next] = true;
            tour.push(next);
            current = next;
        }

        tour.push(start);
        Ok(tour)
    }
}

impl Initializer for NearestNeighbor {
    fn tour(&mut self, graph: &dyn Graph) -> Result<Vec<usize>> {
        let starts: Vec<usize> = match &self.starts {
            Starts::One(s) => vec![*s],
            Starts::Many(v) => v.clone(),
        };
        if starts.is_empty() {
            return Err(TspError::InvalidParameter(
                "NearestNeighbor requires at least one start vertex".into(),
            ));
        }

        let mut best: Option<Vec<usize>> = None;
        let mut best_cost = f64::INFINITY;
        for start in starts {
            let candidate = self.greedy_from(graph, start)?;
            let cost = closed_tour_length(&candidate, |a, b| graph.weight(a, b));
            if cost < best_cost {
                best_cost = cost;
                best = Some(candidate);
            }
        }

        Ok(best.expect("at least one start was validated above"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Triangle;
    impl Graph for Triangle {
        fn vertex_count(&self) -> usize {
            3
        }
        fn weight(&self, a: usize, b: usize) -> f64 {
            const W: [[f64; 3]; 3] = [[0.0, 1.0, 2.0], [1.0, 0.0, 3.0], [2.0, 3.0, 0.0]];
            W[a][b]
        }
    }

    #[test]
    fn random_tour_is_hamiltonian() {
        let mut init = RandomTour::new(ChaCha8Rng::seed_from_u64(7));
        let tour = init.tour(&Triangle).unwrap();
        assert_eq!(tour.len(), 4);
        assert_eq!(tour.first(), tour.last());
        let mut sorted = tour[..3].to_vec();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn nearest_neighbor_ties_prefer_lower_iteration_order() {
        // From 0: both 1 (dist 1) and 2 (dist 2) are candidates, 1 wins
        // outright (no tie) — exercise multi-start picking the cheapest.
        let mut init = NearestNeighbor::from_starts([0, 1, 2]);
        let tour = init.tour(&Triangle).unwrap();
        assert_eq!(tour.first(), tour.last());
        assert_eq!(tour.len(), 4);
    }

    #[test]
    fn nearest_neighbor_rejects_out_of_range_start() {
        let mut init = NearestNeighbor::from_start(10);
        assert!(init.tour(&Triangle).is_err());
    }
}
