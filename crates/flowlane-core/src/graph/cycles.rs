//! Cycle reporting for flow graphs.
//!
//! Decomposition and layering only need to know *that* a graph is cyclic;
//! diagnostics want to know *where*. Cycles are reported as strongly
//! connected components found with Tarjan's algorithm.

#![allow(clippy::module_name_repetitions)]

use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;

use crate::graph::build::FlowGraph;

/// Find all cycles currently present in `graph`.
///
/// Each entry is a sorted list of node ids in one strongly connected
/// component. Self-loops are reported as a one-element cycle. Entries are
/// sorted so the output is deterministic.
#[must_use]
pub fn find_all_cycles(graph: &FlowGraph) -> Vec<Vec<String>> {
    let g = graph.graph();
    let mut cycles: Vec<Vec<String>> = tarjan_scc(g)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || component.first().is_some_and(|&node| has_self_loop(graph, node))
        })
        .map(|component| {
            let mut ids: Vec<String> = component
                .into_iter()
                .map(|idx| graph.id_at(idx.index()).to_string())
                .collect();
            ids.sort_unstable();
            ids
        })
        .collect();

    cycles.sort_unstable();
    cycles
}

/// Smallest id of the first reported cycle, if any.
#[must_use]
pub fn first_cycle_node(graph: &FlowGraph) -> Option<String> {
    find_all_cycles(graph)
        .into_iter()
        .next()
        .and_then(|members| members.into_iter().next())
}

fn has_self_loop(graph: &FlowGraph, node: NodeIndex) -> bool {
    graph.graph().find_edge(node, node).is_some()
}
