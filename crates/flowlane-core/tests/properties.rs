use std::collections::HashMap;

use flowlane_core::error::{ErrorCode, FlowError};
use flowlane_core::graph::{FlowGraph, GraphNode, LayerOrder, topological_layers, transform};
use proptest::prelude::*;

#[path = "generators.rs"]
mod generators;
use generators::*;

fn sorted_ids(nodes: &[GraphNode]) -> Vec<String> {
    let mut ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
    ids.sort_unstable();
    ids
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    // Series-parallel graphs

    #[test]
    fn series_parallel_decomposes_to_its_shape(shape in arb_shape()) {
        let (nodes, expected) = compile(&shape);
        let branch = transform(&nodes).expect("series-parallel graphs decompose");
        prop_assert_eq!(branch, expected);
    }

    #[test]
    fn input_order_does_not_change_the_tree(shape in arb_shape(), rotation in any::<usize>()) {
        let (mut nodes, expected) = compile(&shape);
        let len = nodes.len();
        nodes.rotate_left(rotation % len);
        let branch = transform(&nodes).expect("series-parallel graphs decompose");
        prop_assert_eq!(branch, expected);
    }

    // Random DAGs

    #[test]
    fn success_covers_every_node_once(nodes in arb_dag(10)) {
        if let Ok(branch) = transform(&nodes) {
            let mut steps: Vec<String> = branch.step_ids().into_iter().map(String::from).collect();
            steps.sort_unstable();
            prop_assert_eq!(steps, sorted_ids(&nodes));
        }
    }

    #[test]
    fn source_count_other_than_one_is_rejected(nodes in arb_dag(10)) {
        let sources = source_ids(&nodes);
        let result = transform(&nodes);
        if sources.len() == 1 {
            prop_assert!(
                !matches!(result, Err(FlowError::InvalidSourceCount { .. })),
                "single source rejected: {:?}",
                result
            );
        } else {
            prop_assert_eq!(result, Err(FlowError::InvalidSourceCount { sources }));
        }
    }

    #[test]
    fn decomposition_is_deterministic(nodes in arb_dag(10)) {
        prop_assert_eq!(transform(&nodes), transform(&nodes));
    }

    #[test]
    fn self_loop_always_reports_cycle(nodes in arb_dag(10), pick in any::<usize>()) {
        let mut nodes = nodes;
        let at = pick % nodes.len();
        let id = nodes[at].id.clone();
        nodes[at].next_ids.push(id);

        let err = transform(&nodes).expect_err("self loop is a cycle");
        prop_assert_eq!(err.code(), ErrorCode::CycleDetected);
    }

    #[test]
    fn layers_respect_every_edge(nodes in arb_dag(12), lexical in any::<bool>()) {
        let order = if lexical { LayerOrder::Lexical } else { LayerOrder::Input };
        let graph = FlowGraph::from_nodes(nodes.clone()).expect("valid");
        let layering = topological_layers(&graph, order).expect("acyclic");

        let mut depth: HashMap<&str, usize> = HashMap::new();
        for (d, layer) in layering.layers().iter().enumerate() {
            for id in layer {
                prop_assert!(depth.insert(id.as_str(), d).is_none(), "{} placed twice", id);
            }
        }
        prop_assert_eq!(depth.len(), nodes.len());

        for node in &nodes {
            for succ in &node.next_ids {
                prop_assert!(depth[node.id.as_str()] < depth[succ.as_str()]);
            }
        }
    }

    #[test]
    fn every_layer_after_the_first_has_a_parent_just_above(nodes in arb_dag(12)) {
        let graph = FlowGraph::from_nodes(nodes.clone()).expect("valid");
        let layering = topological_layers(&graph, LayerOrder::Input).expect("acyclic");

        for node in &nodes {
            let d = layering.depth_of(&node.id).expect("every node is placed");
            let parents: Vec<usize> = nodes
                .iter()
                .filter(|p| p.next_ids.contains(&node.id))
                .filter_map(|p| layering.depth_of(&p.id))
                .collect();
            if d == 0 {
                prop_assert!(parents.is_empty());
            } else {
                prop_assert_eq!(parents.iter().max().copied(), Some(d - 1));
            }
        }
    }
}
