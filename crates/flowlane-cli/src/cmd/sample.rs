//! `flowlane sample`: print a built-in graph as a node list.
//!
//! The output is always JSON so it can be piped back into the other
//! commands with `-`. Text mode emits it on a single line.

use std::io::{self, Write};

use clap::Args;
use flowlane_core::samples;

use crate::output::{CliError, OutputMode, render_error};

/// Arguments for `flowlane sample`.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Sample to print.
    #[arg(value_parser = samples::NAMES)]
    pub name: String,
}

pub fn run_sample(args: &SampleArgs, output: OutputMode) -> anyhow::Result<()> {
    let Some(nodes) = samples::by_name(&args.name) else {
        let msg = format!("unknown sample: {}", args.name);
        render_error(output, &CliError::new(&msg))?;
        anyhow::bail!("{msg}");
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match output {
        OutputMode::Text => serde_json::to_writer(&mut out, &nodes)?,
        OutputMode::Pretty | OutputMode::Json => serde_json::to_writer_pretty(&mut out, &nodes)?,
    }
    writeln!(out)?;
    Ok(())
}
