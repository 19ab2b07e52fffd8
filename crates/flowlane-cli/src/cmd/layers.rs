//! `flowlane layers`: topological layers for depth-based placement.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use flowlane_core::{FlowGraph, LayerOrder, Layering, topological_layers};
use serde::Serialize;

use crate::input::read_nodes;
use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};

/// Clap mirror of [`LayerOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Keep input order within a layer.
    Input,
    /// Sort ids within a layer.
    Lexical,
}

impl From<OrderArg> for LayerOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Input => Self::Input,
            OrderArg::Lexical => Self::Lexical,
        }
    }
}

/// Arguments for `flowlane layers`.
#[derive(Args, Debug)]
pub struct LayersArgs {
    /// Node list (JSON, or YAML by extension); `-` reads JSON from stdin.
    pub file: PathBuf,

    /// Ordering within a layer. Defaults to `[layers] order` from config.
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,
}

#[derive(Debug, Serialize)]
struct LayersReport {
    order: LayerOrder,
    depth: usize,
    layers: Layering,
}

fn render_text(report: &LayersReport, w: &mut dyn Write) -> io::Result<()> {
    for (depth, layer) in report.layers.layers().iter().enumerate() {
        writeln!(w, "{depth}\t{}", layer.join(" "))?;
    }
    Ok(())
}

fn render_pretty(report: &LayersReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Layers")?;
    pretty_kv(w, "Order", report.order.to_string())?;
    pretty_kv(w, "Depth", report.depth.to_string())?;
    writeln!(w)?;
    for (depth, layer) in report.layers.layers().iter().enumerate() {
        writeln!(w, "{depth:>3}  {}", layer.join(", "))?;
    }
    Ok(())
}

pub fn run_layers(
    args: &LayersArgs,
    default_order: LayerOrder,
    output: OutputMode,
) -> anyhow::Result<()> {
    let nodes = read_nodes(&args.file)?;
    let order = args.order.map_or(default_order, LayerOrder::from);

    let result = FlowGraph::from_nodes(nodes).and_then(|graph| topological_layers(&graph, order));
    let layers = match result {
        Ok(layers) => layers,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            anyhow::bail!("{err}");
        }
    };

    let report = LayersReport {
        order,
        depth: layers.len(),
        layers,
    };
    render_mode(output, &report, render_text, render_pretty)
}
