//! Entry point: node list in, nested [`Branch`] out.

use tracing::{debug, instrument};

use crate::branch::Branch;
use crate::error::{FlowError, FlowResult};
use crate::graph::build::FlowGraph;
use crate::graph::decompose::Decomposer;
use crate::graph::index::build_index;
use crate::graph::node::GraphNode;

/// Decompose `nodes` into a nested branch tree.
///
/// # Errors
///
/// Returns the first [`FlowError`] met while validating the node list,
/// indexing it, checking for a unique source, walking it, or checking that
/// every divergence reconverged.
pub fn transform(nodes: &[GraphNode]) -> FlowResult<Branch> {
    let graph = FlowGraph::from_nodes(nodes.iter().cloned())?;
    transform_graph(&graph)
}

/// Decompose an already validated graph.
///
/// Cycles are checked while building the indexes, before the source count,
/// so any cyclic graph fails with [`FlowError::CycleDetected`].
///
/// # Errors
///
/// - [`FlowError::CycleDetected`] if the graph is cyclic.
/// - [`FlowError::InvalidSourceCount`] unless exactly one node has no
///   incoming edges.
/// - [`FlowError::AmbiguousReconvergence`] from the walk.
/// - [`FlowError::UnresolvedDivergence`] if the walk ends with pending
///   boundary nodes.
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn transform_graph(graph: &FlowGraph) -> FlowResult<Branch> {
    let (reach, degrees) = build_index(graph)?;

    let sources = degrees.sources();
    let [source] = sources.as_slice() else {
        return Err(FlowError::InvalidSourceCount {
            sources: sources
                .iter()
                .map(|&pos| graph.id_at(pos).to_string())
                .collect(),
        });
    };

    let walk = Decomposer::new(graph, &reach, &degrees).walk_from(*source)?;
    if !walk.outgoing.is_empty() {
        let mut pending: Vec<String> = Vec::new();
        for id in walk.outgoing_ids(graph) {
            if !pending.iter().any(|p| p == id) {
                pending.push(id.to_string());
            }
        }
        return Err(FlowError::UnresolvedDivergence { pending });
    }

    debug!(
        steps = walk.branch.step_count(),
        depth = walk.branch.depth(),
        "decomposition complete"
    );
    Ok(walk.branch)
}
