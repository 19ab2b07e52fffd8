//! Branch decomposition: nested parallel lanes from a single-source DAG.
//!
//! # Overview
//!
//! A walk starts at one node and follows single successors inline. At a
//! divergence (more than one successor) every successor is walked as its own
//! lane, and each lane is fenced off from its siblings by a *boundary*:
//!
//! ```text
//! boundary(lane) = other successors
//!                ∪ everything reachable from the other successors
//!                ∪ the boundary inherited from the enclosing walk
//! ```
//!
//! A lane that runs into its boundary stops there and reports the node as
//! *outgoing* instead of consuming it. After all lanes have run, the
//! divergence looks for a node that has been reported once per incoming
//! edge: every path into it has arrived, so the walk continues from it. This
//! is how the join of a diamond is emitted exactly once.
//!
//! ```text
//!      ┌─→ 2 ─┐
//! 1 ───┤      ├─→ 4        ⇒   [1, [[2], [3]], 4]
//!      └─→ 3 ─┘
//! ```
//!
//! Outgoing nodes that are not yet complete bubble up to the enclosing walk,
//! whose own lanes may supply the missing edges.
//!
//! # State
//!
//! `seen` is shared by the whole decomposition and borrowed mutably by each
//! recursive walk; any revisit is a cycle. `outgoing` is returned by value
//! and merged by the caller.

#![allow(clippy::module_name_repetitions)]

use fixedbitset::FixedBitSet;
use tracing::{debug, trace};

use crate::branch::Branch;
use crate::error::{FlowError, FlowResult};
use crate::graph::build::FlowGraph;
use crate::graph::index::{DegreeIndex, ReachabilityIndex};

/// Result of one walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    /// Steps and groups emitted by the walk.
    pub branch: Branch,
    /// Boundary nodes the walk stopped at, one entry per stopping edge.
    pub outgoing: Vec<usize>,
}

impl Walk {
    /// Outgoing positions as ids.
    #[must_use]
    pub fn outgoing_ids<'g>(&self, graph: &'g FlowGraph) -> Vec<&'g str> {
        self.outgoing.iter().map(|&pos| graph.id_at(pos)).collect()
    }
}

/// Walks a [`FlowGraph`] using prebuilt indexes.
#[derive(Debug, Clone, Copy)]
pub struct Decomposer<'a> {
    graph: &'a FlowGraph,
    reach: &'a ReachabilityIndex,
    degrees: &'a DegreeIndex,
}

impl<'a> Decomposer<'a> {
    #[must_use]
    pub const fn new(
        graph: &'a FlowGraph,
        reach: &'a ReachabilityIndex,
        degrees: &'a DegreeIndex,
    ) -> Self {
        Self {
            graph,
            reach,
            degrees,
        }
    }

    /// Walk from `start` with nothing seen and no boundary.
    ///
    /// # Errors
    ///
    /// See [`Self::walk`].
    pub fn walk_from(&self, start: usize) -> FlowResult<Walk> {
        let n = self.graph.node_count();
        let mut seen = FixedBitSet::with_capacity(n);
        let stop_on = FixedBitSet::with_capacity(n);
        self.walk(start, &mut seen, &stop_on)
    }

    /// Walk from `start`, consuming nodes until a sink or the boundary.
    ///
    /// Nodes in `stop_on` are never consumed; each arrival at one is recorded
    /// in [`Walk::outgoing`]. Every consumed node is added to `seen`.
    ///
    /// # Errors
    ///
    /// - [`FlowError::CycleDetected`] when a node already in `seen` is
    ///   reached again.
    /// - [`FlowError::AmbiguousReconvergence`] when more than one outgoing
    ///   node completes after the same divergence.
    pub fn walk(
        &self,
        start: usize,
        seen: &mut FixedBitSet,
        stop_on: &FixedBitSet,
    ) -> FlowResult<Walk> {
        let mut branch = Branch::new();
        let mut outgoing: Vec<usize> = Vec::new();
        let mut current = start;

        loop {
            if seen.contains(current) {
                return Err(FlowError::CycleDetected {
                    node: self.graph.id_at(current).to_string(),
                });
            }
            if stop_on.contains(current) {
                outgoing.push(current);
                break;
            }

            branch.push_step(self.graph.id_at(current));
            seen.insert(current);

            let next = self.graph.successors_at(current);
            match next {
                [] => break,
                [only] => {
                    current = *only;
                    continue;
                }
                _ => {}
            }

            trace!(
                node = self.graph.id_at(current),
                lanes = next.len(),
                "divergence"
            );

            let mut lanes: Vec<Branch> = Vec::with_capacity(next.len());
            for &succ in next {
                if stop_on.contains(succ) {
                    outgoing.push(succ);
                    continue;
                }
                let boundary = self.sibling_boundary(next, succ, stop_on);
                let lane = self.walk(succ, seen, &boundary)?;
                outgoing.extend(lane.outgoing);
                lanes.push(lane.branch);
            }

            branch.push_group(lanes);

            let Some(join) = self.resolvable(&outgoing)? else {
                break;
            };
            debug!(join = self.graph.id_at(join), "reconvergence resolved");
            outgoing.retain(|&pos| pos != join);
            current = join;
        }

        Ok(Walk { branch, outgoing })
    }

    /// Boundary for the lane starting at `lane` among `siblings`.
    fn sibling_boundary(
        &self,
        siblings: &[usize],
        lane: usize,
        inherited: &FixedBitSet,
    ) -> FixedBitSet {
        let mut boundary = inherited.clone();
        boundary.grow(self.graph.node_count());
        for &other in siblings.iter().filter(|&&other| other != lane) {
            boundary.insert(other);
            boundary.union_with(self.reach.row(other));
        }
        boundary
    }

    /// The single outgoing node whose every incoming edge is accounted for.
    fn resolvable(&self, outgoing: &[usize]) -> FlowResult<Option<usize>> {
        let mut distinct: Vec<usize> = Vec::new();
        for &pos in outgoing {
            if !distinct.contains(&pos) {
                distinct.push(pos);
            }
        }

        let complete: Vec<usize> = distinct
            .into_iter()
            .filter(|&pos| {
                outgoing.iter().filter(|&&hit| hit == pos).count() == self.degrees.at(pos)
            })
            .collect();

        match complete.as_slice() {
            [] => Ok(None),
            [join] => Ok(Some(*join)),
            _ => Err(FlowError::AmbiguousReconvergence {
                candidates: complete
                    .iter()
                    .map(|&pos| self.graph.id_at(pos).to_string())
                    .collect(),
            }),
        }
    }
}
