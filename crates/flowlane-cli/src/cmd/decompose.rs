//! `flowlane decompose`: nested parallel lanes for a node list.
//!
//! Pretty output is an indented outline, one line per step, with a header
//! line for every lane:
//!
//! ```text
//! 1
//! ├─ lane 1/2
//! │  2
//! ├─ lane 2/2
//! │  3
//! 4
//! ```
//!
//! Text output is the one-line `1 → [2 | 3] → 4` form; JSON is the nested
//! array shape.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use flowlane_core::{Branch, Segment, transform};

use crate::input::read_nodes;
use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};

/// Arguments for `flowlane decompose`.
#[derive(Args, Debug)]
pub struct DecomposeArgs {
    /// Node list (JSON, or YAML by extension); `-` reads JSON from stdin.
    pub file: PathBuf,
}

fn write_outline(w: &mut dyn Write, branch: &Branch, prefix: &str) -> io::Result<()> {
    for segment in branch.segments() {
        match segment {
            Segment::Step(id) => writeln!(w, "{prefix}{id}")?,
            Segment::Group(lanes) => {
                let nested = format!("{prefix}│  ");
                for (i, lane) in lanes.iter().enumerate() {
                    writeln!(w, "{prefix}├─ lane {}/{}", i + 1, lanes.len())?;
                    write_outline(w, lane, &nested)?;
                }
            }
        }
    }
    Ok(())
}

fn render_pretty(branch: &Branch, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Decomposition")?;
    pretty_kv(w, "Steps", branch.step_count().to_string())?;
    pretty_kv(w, "Depth", branch.depth().to_string())?;
    writeln!(w)?;
    write_outline(w, branch, "")
}

pub fn run_decompose(args: &DecomposeArgs, output: OutputMode) -> anyhow::Result<()> {
    let nodes = read_nodes(&args.file)?;

    let branch = match transform(&nodes) {
        Ok(branch) => branch,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            anyhow::bail!("{err}");
        }
    };

    render_mode(output, &branch, |b, w| writeln!(w, "{b}"), render_pretty)
}
