use flowlane_core::branch::{Branch, Segment};
use flowlane_core::graph::GraphNode;
use proptest::prelude::*;

/// A series-parallel shape with explicit split and join nodes.
#[derive(Debug, Clone)]
pub enum Shape {
    Node,
    Series(Vec<Shape>),
    Parallel(Vec<Shape>),
}

pub fn arb_shape() -> impl Strategy<Value = Shape> {
    Just(Shape::Node).prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..4).prop_map(Shape::Series),
            prop::collection::vec(inner, 2..4).prop_map(Shape::Parallel),
        ]
    })
}

/// Node list for `shape` plus the branch the decomposition must produce.
pub fn compile(shape: &Shape) -> (Vec<GraphNode>, Branch) {
    let mut builder = Builder::default();
    let (_, _, segments) = builder.compile(shape);
    (builder.nodes, Branch::from(segments))
}

#[derive(Default)]
struct Builder {
    nodes: Vec<GraphNode>,
}

impl Builder {
    fn fresh(&mut self) -> usize {
        let pos = self.nodes.len();
        self.nodes.push(GraphNode::sink(format!("n{pos}")));
        pos
    }

    fn edge(&mut self, from: usize, to: usize) {
        let target = self.nodes[to].id.clone();
        self.nodes[from].next_ids.push(target);
    }

    fn step(&self, pos: usize) -> Segment {
        Segment::Step(self.nodes[pos].id.clone())
    }

    /// Returns (entry, exit, segments).
    fn compile(&mut self, shape: &Shape) -> (usize, usize, Vec<Segment>) {
        match shape {
            Shape::Node => {
                let pos = self.fresh();
                (pos, pos, vec![self.step(pos)])
            }
            Shape::Series(parts) => {
                let mut entry = None;
                let mut exit: Option<usize> = None;
                let mut segments = Vec::new();
                for part in parts {
                    let (e, x, segs) = self.compile(part);
                    match exit {
                        Some(prev) => self.edge(prev, e),
                        None => entry = Some(e),
                    }
                    exit = Some(x);
                    segments.extend(segs);
                }
                (
                    entry.expect("series has parts"),
                    exit.expect("series has parts"),
                    segments,
                )
            }
            Shape::Parallel(lanes) => {
                let split = self.fresh();
                let mut compiled = Vec::with_capacity(lanes.len());
                for lane in lanes {
                    compiled.push(self.compile(lane));
                }
                let join = self.fresh();

                let mut group = Vec::with_capacity(compiled.len());
                for (e, x, segs) in compiled {
                    self.edge(split, e);
                    self.edge(x, join);
                    group.push(Branch::from(segs));
                }
                (
                    split,
                    join,
                    vec![self.step(split), Segment::Group(group), self.step(join)],
                )
            }
        }
    }
}

/// Random DAG over `n0..n{k}` with forward edges only.
pub fn arb_dag(max_nodes: usize) -> impl Strategy<Value = Vec<GraphNode>> {
    (1..=max_nodes).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), n), n).prop_map(move |matrix| {
            (0..n)
                .map(|i| {
                    let next: Vec<String> = ((i + 1)..n)
                        .filter(|&j| matrix[i][j])
                        .map(|j| format!("v{j}"))
                        .collect();
                    GraphNode::new(format!("v{i}"), next)
                })
                .collect()
        })
    })
}

/// Ids with no incoming edge, in input order.
pub fn source_ids(nodes: &[GraphNode]) -> Vec<String> {
    nodes
        .iter()
        .filter(|candidate| {
            !nodes
                .iter()
                .any(|n| n.next_ids.iter().any(|s| *s == candidate.id))
        })
        .map(|n| n.id.clone())
        .collect()
}
