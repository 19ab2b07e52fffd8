//! `flowlane check`: structural report for a node list.
//!
//! Reports counts, sources, sinks, cycles (Tarjan SCCs), the content hash and
//! whether the graph decomposes. Exits non-zero when it does not.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use flowlane_core::graph::index::{DegreeIndex, sinks};
use flowlane_core::graph::{find_all_cycles, transform_graph};
use flowlane_core::FlowGraph;
use serde::Serialize;
use tracing::info;

use crate::input::read_nodes;
use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};

/// Arguments for `flowlane check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Node list (JSON, or YAML by extension); `-` reads JSON from stdin.
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Outcome {
    Ok {
        steps: usize,
        depth: usize,
    },
    Failed {
        error_code: String,
        message: String,
        suggestion: String,
    },
}

#[derive(Debug, Serialize)]
struct CheckReport {
    nodes: usize,
    edges: usize,
    sources: Vec<String>,
    sinks: Vec<String>,
    cycles: Vec<Vec<String>>,
    content_hash: String,
    decomposition: Outcome,
}

impl CheckReport {
    fn build(graph: &FlowGraph) -> Self {
        let ids = |positions: Vec<usize>| -> Vec<String> {
            positions
                .into_iter()
                .map(|pos| graph.id_at(pos).to_string())
                .collect()
        };

        let decomposition = match transform_graph(graph) {
            Ok(branch) => Outcome::Ok {
                steps: branch.step_count(),
                depth: branch.depth(),
            },
            Err(err) => Outcome::Failed {
                error_code: err.code().code().to_string(),
                message: err.to_string(),
                suggestion: err.suggestion(),
            },
        };

        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            sources: ids(DegreeIndex::build(graph).sources()),
            sinks: ids(sinks(graph)),
            cycles: find_all_cycles(graph),
            content_hash: graph.content_hash().to_string(),
            decomposition,
        }
    }

    fn failure(&self) -> Option<&str> {
        match &self.decomposition {
            Outcome::Ok { .. } => None,
            Outcome::Failed { message, .. } => Some(message.as_str()),
        }
    }
}

fn render_text(report: &CheckReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "nodes={} edges={} sources={} sinks={} cycles={}",
        report.nodes,
        report.edges,
        report.sources.len(),
        report.sinks.len(),
        report.cycles.len()
    )?;
    match &report.decomposition {
        Outcome::Ok { steps, depth } => writeln!(w, "ok steps={steps} depth={depth}"),
        Outcome::Failed {
            error_code,
            message,
            ..
        } => writeln!(w, "failed {error_code} {message}"),
    }
}

fn render_pretty(report: &CheckReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Graph check")?;
    pretty_kv(w, "Nodes", report.nodes.to_string())?;
    pretty_kv(w, "Edges", report.edges.to_string())?;
    pretty_kv(w, "Sources", report.sources.join(", "))?;
    pretty_kv(w, "Sinks", report.sinks.join(", "))?;
    pretty_kv(w, "Hash", &report.content_hash)?;

    if report.cycles.is_empty() {
        pretty_kv(w, "Cycles", "none")?;
    } else {
        pretty_kv(w, "Cycles", report.cycles.len().to_string())?;
        for cycle in &report.cycles {
            writeln!(w, "  ⟳ {}", cycle.join(" → "))?;
        }
    }

    writeln!(w)?;
    match &report.decomposition {
        Outcome::Ok { steps, depth } => {
            writeln!(w, "✓ decomposes ({steps} steps, depth {depth})")
        }
        Outcome::Failed {
            error_code,
            message,
            suggestion,
        } => {
            writeln!(w, "✗ {message} [{error_code}]")?;
            writeln!(w, "  suggestion: {suggestion}")
        }
    }
}

pub fn run_check(args: &CheckArgs, output: OutputMode) -> anyhow::Result<()> {
    let nodes = read_nodes(&args.file)?;

    let graph = match FlowGraph::from_nodes(nodes) {
        Ok(graph) => graph,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            anyhow::bail!("{err}");
        }
    };

    let report = CheckReport::build(&graph);
    info!(
        nodes = report.nodes,
        cycles = report.cycles.len(),
        ok = report.failure().is_none(),
        "graph checked"
    );
    render_mode(output, &report, render_text, render_pretty)?;

    if let Some(message) = report.failure() {
        anyhow::bail!("graph cannot be decomposed: {message}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowlane_core::{FlowError, GraphNode, samples};

    fn check_nodes(nodes: Vec<GraphNode>) -> Result<CheckReport, FlowError> {
        FlowGraph::from_nodes(nodes).map(|graph| CheckReport::build(&graph))
    }

    #[test]
    fn sample_report_is_clean() {
        let report = check_nodes(samples::diamonds()).expect("valid");
        assert_eq!(report.nodes, 13);
        assert_eq!(report.edges, 15);
        assert_eq!(report.sources, vec!["1".to_string()]);
        assert_eq!(report.sinks, vec!["5".to_string()]);
        assert!(report.cycles.is_empty());
        assert!(report.content_hash.starts_with("blake3:"));
        assert!(report.failure().is_none());
    }

    #[test]
    fn cycle_is_listed_and_fails() {
        let report = check_nodes(vec![
            GraphNode::new("s", ["a"]),
            GraphNode::new("a", ["b"]),
            GraphNode::new("b", ["a", "t"]),
            GraphNode::sink("t"),
        ])
        .expect("valid");
        assert_eq!(report.cycles, vec![vec!["a".to_string(), "b".to_string()]]);
        let value = serde_json::to_value(&report).expect("json");
        assert_eq!(value["decomposition"]["status"], "failed");
        assert_eq!(value["decomposition"]["error_code"], "E2001");
    }

    #[test]
    fn text_summary_line() {
        let report = check_nodes(vec![
            GraphNode::new("a", ["c"]),
            GraphNode::new("b", ["c"]),
            GraphNode::sink("c"),
        ])
        .expect("valid");
        let mut buf = Vec::new();
        render_text(&report, &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("nodes=3 edges=2 sources=2 sinks=1 cycles=0\n"));
        assert!(text.contains("failed E2002"));
    }

    #[test]
    fn malformed_input_is_rejected_before_report() {
        let err = check_nodes(vec![GraphNode::new("a", ["missing"])]).expect_err("unknown");
        assert!(matches!(err, FlowError::UnknownSuccessor { .. }));
    }
}
