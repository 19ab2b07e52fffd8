//! The nested branch tree produced by decomposition.
//!
//! A [`Branch`] is an ordered run of [`Segment`]s. A segment is either a
//! single node id (a sequential step) or a group of sibling branches that
//! leave a common divergence node and rejoin afterwards.
//!
//! # Wire shape
//!
//! Branches serialize as plain nested JSON arrays, so a diamond becomes:
//!
//! ```text
//! ["1", [["2"], ["3"]], "4"]
//! ```
//!
//! Strings are steps; an array in step position is a group whose elements
//! are the sibling branches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One element of a [`Branch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    /// A single node, visited in sequence.
    Step(String),
    /// Parallel lanes leaving the preceding step, in successor order.
    Group(Vec<Branch>),
}

/// An ordered sequence of steps and parallel groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Branch {
    segments: Vec<Segment>,
}

impl Branch {
    /// Create an empty branch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Append a sequential step.
    pub fn push_step(&mut self, id: impl Into<String>) {
        self.segments.push(Segment::Step(id.into()));
    }

    /// Append a group of parallel lanes.
    pub fn push_group(&mut self, lanes: Vec<Self>) {
        self.segments.push(Segment::Group(lanes));
    }

    /// The top-level segments of this branch.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of top-level segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// `true` when the branch has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every step id in the tree, depth-first in emission order.
    #[must_use]
    pub fn step_ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_steps(&mut out);
        out
    }

    fn collect_steps<'a>(&'a self, out: &mut Vec<&'a str>) {
        for segment in &self.segments {
            match segment {
                Segment::Step(id) => out.push(id.as_str()),
                Segment::Group(lanes) => {
                    for lane in lanes {
                        lane.collect_steps(out);
                    }
                }
            }
        }
    }

    /// Total number of steps in the tree.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Step(_) => 1,
                Segment::Group(lanes) => lanes.iter().map(Self::step_count).sum(),
            })
            .sum()
    }

    /// Deepest group nesting. A purely sequential branch has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Step(_) => None,
                Segment::Group(lanes) => {
                    Some(1 + lanes.iter().map(Self::depth).max().unwrap_or(0))
                }
            })
            .max()
            .unwrap_or(0)
    }
}

impl From<Vec<Segment>> for Branch {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

/// Renders `1 → [2 | 3] → 4`.
impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" → ")?;
            }
            match segment {
                Segment::Step(id) => f.write_str(id)?,
                Segment::Group(lanes) => {
                    f.write_str("[")?;
                    for (j, lane) in lanes.iter().enumerate() {
                        if j > 0 {
                            f.write_str(" | ")?;
                        }
                        write!(f, "{lane}")?;
                    }
                    f.write_str("]")?;
                }
            }
        }
        Ok(())
    }
}
