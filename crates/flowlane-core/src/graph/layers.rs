//! Topological layering for depth-based placement.
//!
//! Layer 0 holds every source. Each following layer holds the nodes whose
//! predecessors have all been placed in earlier layers, so every edge points
//! from a lower layer to a strictly higher one. This is independent of the
//! branch nesting and is consumed by layout code that positions nodes by
//! depth.
//!
//! Within a layer nodes keep their input order unless
//! [`LayerOrder::Lexical`] is requested.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::error::{FlowError, FlowResult};
use crate::graph::build::FlowGraph;
use crate::graph::cycles::first_cycle_node;

/// Ordering of ids inside one layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerOrder {
    /// Keep the order the nodes had in the input list.
    #[default]
    Input,
    /// Sort ids lexicographically.
    Lexical,
}

impl fmt::Display for LayerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Lexical => f.write_str("lexical"),
        }
    }
}

/// Ordered layers of node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layering {
    layers: Vec<Vec<String>>,
}

impl Layering {
    /// The layers, sources first.
    #[must_use]
    pub fn layers(&self) -> &[Vec<String>] {
        &self.layers
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// `true` for the layering of an empty graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Index of the layer containing `id`.
    #[must_use]
    pub fn depth_of(&self, id: &str) -> Option<usize> {
        self.layers
            .iter()
            .position(|layer| layer.iter().any(|member| member == id))
    }
}

/// Group every node of `graph` into topological layers.
///
/// # Errors
///
/// Returns [`FlowError::CycleDetected`] when some nodes can never be
/// placed. The reported node is the smallest id of the first strongly
/// connected component.
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn topological_layers(graph: &FlowGraph, order: LayerOrder) -> FlowResult<Layering> {
    let n = graph.node_count();

    let mut remaining: Vec<usize> = vec![0; n];
    for pos in 0..n {
        for &succ in graph.successors_at(pos) {
            remaining[succ] += 1;
        }
    }

    let mut ready: Vec<usize> = (0..n).filter(|&pos| remaining[pos] == 0).collect();
    let mut placed = 0;
    let mut layers: Vec<Vec<String>> = Vec::new();

    while !ready.is_empty() {
        let current = std::mem::take(&mut ready);
        for &pos in &current {
            for &succ in graph.successors_at(pos) {
                remaining[succ] -= 1;
                if remaining[succ] == 0 {
                    ready.push(succ);
                }
            }
        }
        // Input order: positions, not the order successors were released in.
        ready.sort_unstable();

        placed += current.len();
        let mut layer: Vec<String> = current
            .into_iter()
            .map(|pos| graph.id_at(pos).to_string())
            .collect();
        if order == LayerOrder::Lexical {
            layer.sort_unstable();
        }
        trace!(depth = layers.len(), width = layer.len(), "layer placed");
        layers.push(layer);
    }

    if placed < n {
        let node = first_cycle_node(graph).unwrap_or_else(|| {
            let pos = (0..n).find(|&pos| remaining[pos] > 0).unwrap_or(0);
            graph.id_at(pos).to_string()
        });
        return Err(FlowError::CycleDetected { node });
    }

    Ok(Layering { layers })
}
