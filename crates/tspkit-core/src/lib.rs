//! tspkit-core — the `Graph` interface, `GraphPath`, and the shared error
//! type consumed by the rest of the `tspkit` workspace.

pub mod error;
pub mod graph;

pub use error::{Result, TspError};
pub use graph::{closed_tour_length, Graph, GraphPath};
