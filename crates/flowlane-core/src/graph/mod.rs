//! Flow graph module: validation, indexing, layering and decomposition.
//!
//! # Overview
//!
//! This module turns a flat node list into the structures layout code needs:
//! a nested branch tree for lane-based flow diagrams, and topological layers
//! for depth-based placement.
//!
//! ## Pipeline
//!
//! ```text
//! Vec<GraphNode>
//!        ↓  build::FlowGraph::from_nodes()
//! FlowGraph (validated ids, positional successors, petgraph mirror)
//!        ↓  index::build_index()
//! ReachabilityIndex + DegreeIndex (fails on cycles)
//!        ↓  decompose::Decomposer::walk_from(source)
//! Walk { branch, outgoing }
//!        ↓  transform::transform_graph()
//! Branch (no pending outgoing)
//!
//! FlowGraph ── layers::topological_layers() ──→ Layering
//! FlowGraph ── cycles::find_all_cycles()    ──→ diagnostics
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use flowlane_core::graph::{GraphNode, transform};
//!
//! let nodes = vec![
//!     GraphNode::new("1", ["2", "3"]),
//!     GraphNode::new("2", ["4"]),
//!     GraphNode::new("3", ["4"]),
//!     GraphNode::sink("4"),
//! ];
//! let branch = transform(&nodes)?;
//! assert_eq!(branch.to_string(), "1 → [2 | 3] → 4");
//! # Ok::<(), flowlane_core::FlowError>(())
//! ```

pub mod build;
pub mod cycles;
pub mod decompose;
pub mod index;
pub mod layers;
pub mod node;
pub mod transform;

// Re-export primary types at module level for convenience.
pub use build::FlowGraph;
pub use cycles::find_all_cycles;
pub use decompose::{Decomposer, Walk};
pub use index::{DegreeIndex, ReachabilityIndex, build_index};
pub use layers::{LayerOrder, Layering, topological_layers};
pub use node::GraphNode;
pub use transform::{transform, transform_graph};
