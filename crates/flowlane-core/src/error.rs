//! Error taxonomy for graph validation and branch decomposition.
//!
//! Every failure is fatal: a decomposition either returns a complete
//! [`Branch`](crate::branch::Branch) or a [`FlowError`] naming the cause and
//! the offending node ids. [`ErrorCode`] is the stable, machine-readable tag
//! attached to each variant.

use std::fmt;

/// Machine-readable cause tags for decomposition failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DuplicateNode,
    UnknownSuccessor,
    DuplicateSuccessor,
    CycleDetected,
    InvalidSourceCount,
    UnresolvedDivergence,
    AmbiguousReconvergence,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DuplicateNode => "E1001",
            Self::UnknownSuccessor => "E1002",
            Self::DuplicateSuccessor => "E1003",
            Self::CycleDetected => "E2001",
            Self::InvalidSourceCount => "E2002",
            Self::UnresolvedDivergence => "E2003",
            Self::AmbiguousReconvergence => "E2004",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DuplicateNode => "Duplicate node id",
            Self::UnknownSuccessor => "Successor references an unknown node",
            Self::DuplicateSuccessor => "Successor listed twice",
            Self::CycleDetected => "Graph has cycles",
            Self::InvalidSourceCount => "Invalid start nodes",
            Self::UnresolvedDivergence => "Unresolved outgoing branches",
            Self::AmbiguousReconvergence => "Multiple outgoing branches",
        }
    }

    /// Optional remediation hint that can be surfaced to users.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::DuplicateNode => Some("Give every node a unique id."),
            Self::UnknownSuccessor => Some("Add the missing node or drop it from nextIds."),
            Self::DuplicateSuccessor => Some("List each successor at most once per node."),
            Self::CycleDetected => Some("Remove an edge on the reported cycle."),
            Self::InvalidSourceCount => {
                Some("Exactly one node may have no incoming edges; add a common start node.")
            }
            Self::UnresolvedDivergence => {
                Some("Make every divergent path reconverge into a single downstream node.")
            }
            Self::AmbiguousReconvergence => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Result alias used throughout the core.
pub type FlowResult<T> = Result<T, FlowError>;

/// A fatal validation or decomposition failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// Two nodes share the same id.
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    /// A node lists a successor that is not in the node list.
    #[error("node {node} references unknown successor {successor}")]
    UnknownSuccessor { node: String, successor: String },

    /// A node lists the same successor more than once.
    #[error("node {node} lists successor {successor} more than once")]
    DuplicateSuccessor { node: String, successor: String },

    /// The graph is not acyclic; `node` lies on (or was revisited through) a cycle.
    #[error("cycle at {node}")]
    CycleDetected { node: String },

    /// Zero or several nodes have no incoming edges.
    #[error("invalid start nodes: expected exactly one, found {} ({})", .sources.len(), .sources.join(", "))]
    InvalidSourceCount { sources: Vec<String> },

    /// The top-level walk finished with boundary hits that never resolved.
    #[error("unresolved outgoing: {}", .pending.join(", "))]
    UnresolvedDivergence { pending: Vec<String> },

    /// More than one join became resolvable after the same divergence.
    #[error("multiple outgoing branches: {}", .candidates.join(", "))]
    AmbiguousReconvergence { candidates: Vec<String> },
}

impl FlowError {
    /// The cause tag for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateNode { .. } => ErrorCode::DuplicateNode,
            Self::UnknownSuccessor { .. } => ErrorCode::UnknownSuccessor,
            Self::DuplicateSuccessor { .. } => ErrorCode::DuplicateSuccessor,
            Self::CycleDetected { .. } => ErrorCode::CycleDetected,
            Self::InvalidSourceCount { .. } => ErrorCode::InvalidSourceCount,
            Self::UnresolvedDivergence { .. } => ErrorCode::UnresolvedDivergence,
            Self::AmbiguousReconvergence { .. } => ErrorCode::AmbiguousReconvergence,
        }
    }

    /// Remediation text, falling back to the generic code message.
    #[must_use]
    pub fn suggestion(&self) -> String {
        self.code()
            .hint()
            .unwrap_or_else(|| self.code().message())
            .to_string()
    }
}
