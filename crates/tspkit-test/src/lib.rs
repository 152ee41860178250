//! Shared fixtures for tspkit's test suites: fixed point sets, a dense
//! `Graph` implementation, and a reference brute-force 2-opt used to
//! cross-check the k=2 specialization of the k-opt improver.

pub mod fixtures;
pub mod graph;
pub mod reference;

pub use fixtures::{TEN_POINTS, TWENTY_POINTS};
pub use graph::{euclidean_graph, unit_weight_graph, CompleteGraph};
pub use reference::reference_two_opt;
