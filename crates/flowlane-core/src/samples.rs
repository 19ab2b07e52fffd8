//! Reference graphs used by tests, benches and `flowlane sample`.
//!
//! ```text
//! diamonds:
//!        ┌─→ 2a ─→ 2b ──────────────┐
//!  1 ─→ 2┤                          ├─→ 4 ─→ 5
//!        └─→ 3 ┬─→ 3a ──────────────┤
//!              ├─→ 3b ─→ 3d ─→ 3f ──┤
//!              └─→ 3c ─→ 3e ────────┘
//! ```
//!
//! `nested` extends the same shape: the upper lane holds two diamonds in a
//! row, the lower lane a three-way fan-in followed by an uneven diamond, and
//! both close at `4`, which fans out once more before the sink `5`.

use crate::graph::GraphNode;

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 2] = ["diamonds", "nested"];

/// Look up a sample graph by name.
#[must_use]
pub fn by_name(name: &str) -> Option<Vec<GraphNode>> {
    match name {
        "diamonds" => Some(diamonds()),
        "nested" => Some(nested()),
        _ => None,
    }
}

/// A two-level diamond with a three-way inner fan-out.
#[must_use]
pub fn diamonds() -> Vec<GraphNode> {
    vec![
        GraphNode::new("1", ["2"]),
        GraphNode::new("2", ["2a", "3"]),
        GraphNode::new("2a", ["2b"]),
        GraphNode::new("2b", ["4"]),
        GraphNode::new("3", ["3a", "3b", "3c"]),
        GraphNode::new("3a", ["4"]),
        GraphNode::new("3b", ["3d"]),
        GraphNode::new("3c", ["3e"]),
        GraphNode::new("3d", ["3f"]),
        GraphNode::new("3e", ["4"]),
        GraphNode::new("3f", ["4"]),
        GraphNode::new("4", ["5"]),
        GraphNode::sink("5"),
    ]
}

/// Diamonds nested inside diamonds, closing at `4` before a final fan-out.
#[must_use]
pub fn nested() -> Vec<GraphNode> {
    vec![
        GraphNode::new("1", ["2"]),
        GraphNode::new("2", ["2a", "3"]),
        GraphNode::new("2a", ["2b"]),
        GraphNode::new("2b", ["2c", "2d"]),
        GraphNode::new("2c", ["2e"]),
        GraphNode::new("2d", ["2f"]),
        GraphNode::new("2e", ["2g"]),
        GraphNode::new("2f", ["2g"]),
        GraphNode::new("2g", ["2h", "2i"]),
        GraphNode::new("2h", ["2j"]),
        GraphNode::new("2i", ["2k"]),
        GraphNode::new("2j", ["4"]),
        GraphNode::new("2k", ["4"]),
        GraphNode::new("3", ["3a", "3b", "3c"]),
        GraphNode::new("3a", ["3g"]),
        GraphNode::new("3b", ["3d"]),
        GraphNode::new("3c", ["3e"]),
        GraphNode::new("3d", ["3f"]),
        GraphNode::new("3e", ["3g"]),
        GraphNode::new("3f", ["3g"]),
        GraphNode::new("3g", ["3h", "3i"]),
        GraphNode::new("3h", ["4"]),
        GraphNode::new("3i", ["3j"]),
        GraphNode::new("3j", ["3k"]),
        GraphNode::new("3k", ["4"]),
        GraphNode::new("4", ["4a", "4b"]),
        GraphNode::new("4a", ["4c"]),
        GraphNode::new("4b", ["4d"]),
        GraphNode::new("4c", ["5"]),
        GraphNode::new("4d", ["5"]),
        GraphNode::sink("5"),
    ]
}
