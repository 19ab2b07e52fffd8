//! Validated, indexed graph construction from a node list.
//!
//! # Overview
//!
//! Callers hand the core a flat list of [`GraphNode`]s. [`FlowGraph`] checks
//! that list once and then serves every later stage (indexing, layering,
//! decomposition) from positional lookups instead of repeated id scans.
//!
//! ## Positions
//!
//! Each node keeps the position it had in the input list. The petgraph
//! mirror is built in the same order, so `NodeIndex::new(pos)` always names
//! the node at `pos`. Successor lists are stored as positions in their
//! original order.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means B is listed in A's `nextIds`.
//!
//! ## Cache Invalidation
//!
//! The graph carries a BLAKE3 hash of its ids and successor lists. Layout
//! collaborators can compare it against a stored value to skip recomputing
//! a decomposition for an unchanged graph.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::instrument;

use crate::error::{FlowError, FlowResult};
use crate::graph::node::GraphNode;

// ---------------------------------------------------------------------------
// FlowGraph
// ---------------------------------------------------------------------------

/// A validated directed graph over the input nodes.
///
/// Guarantees after construction:
/// - node ids are unique,
/// - every successor names a node in the graph,
/// - no node lists the same successor twice.
///
/// Cycles are *not* rejected here; they surface as
/// [`FlowError::CycleDetected`] from indexing, layering, or decomposition.
#[derive(Debug, Clone)]
pub struct FlowGraph {
    nodes: Vec<GraphNode>,
    positions: HashMap<String, usize>,
    successors: Vec<Vec<usize>>,
    graph: DiGraph<String, ()>,
    content_hash: String,
}

impl FlowGraph {
    /// Validate `nodes` and build the positional index and petgraph mirror.
    ///
    /// # Errors
    ///
    /// - [`FlowError::DuplicateNode`] if two nodes share an id.
    /// - [`FlowError::UnknownSuccessor`] if a successor id has no node.
    /// - [`FlowError::DuplicateSuccessor`] if a node lists a successor twice.
    #[instrument(skip(nodes))]
    pub fn from_nodes(nodes: impl IntoIterator<Item = GraphNode>) -> FlowResult<Self> {
        let nodes: Vec<GraphNode> = nodes.into_iter().collect();

        let mut graph = DiGraph::<String, ()>::with_capacity(nodes.len(), nodes.len());
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(nodes.len());

        // Step 1: register every node so successors can be resolved in any order.
        for (pos, node) in nodes.iter().enumerate() {
            if positions.insert(node.id.clone(), pos).is_some() {
                return Err(FlowError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
            graph.add_node(node.id.clone());
        }

        // Step 2: resolve successor ids to positions and mirror the edges.
        let mut successors: Vec<Vec<usize>> = Vec::with_capacity(nodes.len());
        for (pos, node) in nodes.iter().enumerate() {
            let mut listed: HashSet<&str> = HashSet::with_capacity(node.next_ids.len());
            let mut next = Vec::with_capacity(node.next_ids.len());

            for succ in &node.next_ids {
                if !listed.insert(succ.as_str()) {
                    return Err(FlowError::DuplicateSuccessor {
                        node: node.id.clone(),
                        successor: succ.clone(),
                    });
                }
                let Some(&target) = positions.get(succ) else {
                    return Err(FlowError::UnknownSuccessor {
                        node: node.id.clone(),
                        successor: succ.clone(),
                    });
                };
                graph.add_edge(NodeIndex::new(pos), NodeIndex::new(target), ());
                next.push(target);
            }

            successors.push(next);
        }

        let content_hash = compute_content_hash(&nodes);

        Ok(Self {
            nodes,
            positions,
            successors,
            graph,
            content_hash,
        })
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// `true` when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Input nodes, in input order.
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.position(id).map(|pos| &self.nodes[pos])
    }

    /// Input position of a node id.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Id of the node at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range; positions come from this graph.
    #[must_use]
    pub fn id_at(&self, pos: usize) -> &str {
        &self.nodes[pos].id
    }

    /// Successor positions of the node at `pos`, in `nextIds` order.
    #[must_use]
    pub fn successors_at(&self, pos: usize) -> &[usize] {
        self.successors.get(pos).map(Vec::as_slice).unwrap_or_default()
    }

    /// The petgraph mirror (node index == input position).
    #[must_use]
    pub const fn graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    /// BLAKE3 hash of ids and successor lists, `"blake3:<hex>"`.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Hash node ids and their successor lists in input order.
fn compute_content_hash(nodes: &[GraphNode]) -> String {
    let mut hasher = blake3::Hasher::new();
    for node in nodes {
        hasher.update(node.id.as_bytes());
        hasher.update(b"\x00");
        for succ in &node.next_ids {
            hasher.update(succ.as_bytes());
            hasher.update(b"\x1f");
        }
        hasher.update(b"\x1e");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
