//! Reachability and in-degree indexes over a [`FlowGraph`].
//!
//! Both indexes are built once per decomposition and are read-only
//! afterwards.
//!
//! # Reachability
//!
//! Nodes are visited in reverse topological order, so every successor's row
//! is final before its predecessors read it:
//!
//! ```text
//! reach(v) = ⋃ { {s} ∪ reach(s) : s ∈ next(v) }
//! ```
//!
//! Rows are [`FixedBitSet`]s keyed by input position. Construction fails
//! with [`FlowError::CycleDetected`] when no topological order exists, so a
//! cyclic graph can never yield a silently empty row.
//!
//! # In-degree
//!
//! Counted from successor lists. [`FlowGraph`] rejects repeated successors,
//! so the count equals the number of distinct predecessors.

#![allow(clippy::module_name_repetitions)]

use fixedbitset::FixedBitSet;
use petgraph::algo::toposort;
use tracing::{debug, instrument};

use crate::error::{FlowError, FlowResult};
use crate::graph::build::FlowGraph;

// ---------------------------------------------------------------------------
// ReachabilityIndex
// ---------------------------------------------------------------------------

/// Transitive successors of every node.
#[derive(Debug, Clone)]
pub struct ReachabilityIndex {
    rows: Vec<FixedBitSet>,
}

impl ReachabilityIndex {
    /// Build the index for `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::CycleDetected`] naming a node on a cycle when
    /// `graph` is not acyclic (self-loops included).
    #[instrument(skip(graph), fields(nodes = graph.node_count()))]
    pub fn build(graph: &FlowGraph) -> FlowResult<Self> {
        let n = graph.node_count();
        let order = toposort(graph.graph(), None).map_err(|cycle| FlowError::CycleDetected {
            node: graph.id_at(cycle.node_id().index()).to_string(),
        })?;

        let mut rows = vec![FixedBitSet::with_capacity(n); n];
        for idx in order.into_iter().rev() {
            let pos = idx.index();
            let mut row = FixedBitSet::with_capacity(n);
            for &succ in graph.successors_at(pos) {
                row.insert(succ);
                row.union_with(&rows[succ]);
            }
            rows[pos] = row;
        }

        debug!(nodes = n, "reachability index built");
        Ok(Self { rows })
    }

    /// Row of positions reachable from `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a position of the indexed graph.
    #[must_use]
    pub fn row(&self, pos: usize) -> &FixedBitSet {
        &self.rows[pos]
    }

    /// `true` if `to` can be reached from `from` by following edges.
    #[must_use]
    pub fn reaches(&self, from: usize, to: usize) -> bool {
        self.rows.get(from).is_some_and(|row| row.contains(to))
    }

    /// Id-level form of [`Self::reaches`]; unknown ids are never reachable.
    #[must_use]
    pub fn is_reachable(&self, graph: &FlowGraph, from: &str, to: &str) -> bool {
        match (graph.position(from), graph.position(to)) {
            (Some(from), Some(to)) => self.reaches(from, to),
            _ => false,
        }
    }

    /// Ids reachable from `id`, in input order. Empty for unknown ids.
    #[must_use]
    pub fn reachable<'g>(&self, graph: &'g FlowGraph, id: &str) -> Vec<&'g str> {
        graph
            .position(id)
            .and_then(|pos| self.rows.get(pos))
            .map(|row| row.ones().map(|p| graph.id_at(p)).collect())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// DegreeIndex
// ---------------------------------------------------------------------------

/// Incoming edge counts per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeIndex {
    in_degrees: Vec<usize>,
}

impl DegreeIndex {
    /// Count incoming edges from every successor list in `graph`.
    #[must_use]
    pub fn build(graph: &FlowGraph) -> Self {
        let mut in_degrees = vec![0; graph.node_count()];
        for pos in 0..graph.node_count() {
            for &succ in graph.successors_at(pos) {
                in_degrees[succ] += 1;
            }
        }
        Self { in_degrees }
    }

    /// In-degree of the node at `pos` (0 when out of range).
    #[must_use]
    pub fn at(&self, pos: usize) -> usize {
        self.in_degrees.get(pos).copied().unwrap_or(0)
    }

    /// In-degree of `id`; unknown ids count as zero.
    #[must_use]
    pub fn in_degree(&self, graph: &FlowGraph, id: &str) -> usize {
        graph.position(id).map_or(0, |pos| self.at(pos))
    }

    /// Positions with no incoming edges, in input order.
    #[must_use]
    pub fn sources(&self) -> Vec<usize> {
        self.in_degrees
            .iter()
            .enumerate()
            .filter_map(|(pos, &deg)| (deg == 0).then_some(pos))
            .collect()
    }

    /// Sum of all in-degrees; equals the edge count.
    #[must_use]
    pub fn total(&self) -> usize {
        self.in_degrees.iter().sum()
    }
}

/// Positions with no outgoing edges, in input order.
#[must_use]
pub fn sinks(graph: &FlowGraph) -> Vec<usize> {
    (0..graph.node_count())
        .filter(|&pos| graph.successors_at(pos).is_empty())
        .collect()
}

/// Build both indexes in one call.
///
/// # Errors
///
/// Returns [`FlowError::CycleDetected`] if `graph` has a cycle.
pub fn build_index(graph: &FlowGraph) -> FlowResult<(ReachabilityIndex, DegreeIndex)> {
    let reachability = ReachabilityIndex::build(graph)?;
    let degrees = DegreeIndex::build(graph);
    Ok((reachability, degrees))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
