#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use flowlane_core::config::resolve_config;
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "flowlane: nested parallel lanes for flow diagrams",
    long_about = None
)]
struct Cli {
    /// Enable debug logging for flowlane crates.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty, text or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file to use instead of `flowlane.toml` discovery.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Layout",
        about = "Decompose a graph into nested lanes",
        long_about = "Decompose a single-source DAG into sequential steps and parallel lane groups.",
        after_help = "EXAMPLES:\n    # Decompose a JSON node list\n    flowlane decompose graph.json\n\n    # Pipe a sample through\n    flowlane sample diamonds | flowlane decompose -\n\n    # Emit machine-readable output\n    flowlane decompose graph.yaml --format json"
    )]
    Decompose(cmd::decompose::DecomposeArgs),

    #[command(
        next_help_heading = "Layout",
        about = "Group nodes into topological layers",
        long_about = "Group every node into layers so that each edge points to a strictly later layer.",
        after_help = "EXAMPLES:\n    # Layers in input order\n    flowlane layers graph.json\n\n    # Sort ids inside each layer\n    flowlane layers graph.json --order lexical"
    )]
    Layers(cmd::layers::LayersArgs),

    #[command(
        next_help_heading = "Diagnostics",
        about = "Report graph structure and decomposability",
        long_about = "Report node and edge counts, sources, sinks, cycles and whether the graph decomposes.",
        after_help = "EXAMPLES:\n    # Check a graph; exits non-zero if it cannot be decomposed\n    flowlane check graph.json\n\n    # Emit machine-readable output\n    flowlane check graph.json --json"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Diagnostics",
        about = "Print a built-in sample graph",
        after_help = "EXAMPLES:\n    # Print the nested sample\n    flowlane sample nested"
    )]
    Sample(cmd::sample::SampleArgs),

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    flowlane completions bash\n\n    # Generate zsh completions\n    flowlane completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("FLOWLANE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "flowlane=debug,flowlane_core=debug,info"
        } else {
            "flowlane=info,flowlane_core=info,warn"
        })
    });

    let format = env::var("FLOWLANE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let cwd = env::current_dir()?;
    let effective = resolve_config(cli.config.as_deref(), &cwd)?;
    debug!(source = %effective.source, "using config");

    let output = output::resolve_output_mode(
        cli.format,
        cli.json,
        effective.config.output.format.as_deref(),
    );

    match cli.command {
        Commands::Decompose(ref args) => cmd::decompose::run_decompose(args, output),
        Commands::Layers(ref args) => {
            cmd::layers::run_layers(args, effective.config.layers.order, output)
        }
        Commands::Check(ref args) => cmd::check::run_check(args, output),
        Commands::Sample(ref args) => cmd::sample::run_sample(args, output),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn format_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["flowlane", "decompose", "g.json", "--format", "json"]);
        assert_eq!(cli.format, Some(OutputMode::Json));
    }

    #[test]
    fn json_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["flowlane", "--json", "check", "g.json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["flowlane", "layers", "g.json", "--config", "x.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn layers_order_parses() {
        let cli = Cli::parse_from(["flowlane", "layers", "g.json", "--order", "lexical"]);
        let Commands::Layers(args) = cli.command else {
            panic!("expected layers");
        };
        assert_eq!(args.order, Some(cmd::layers::OrderArg::Lexical));
    }

    #[test]
    fn sample_rejects_unknown_name() {
        assert!(Cli::try_parse_from(["flowlane", "sample", "triangle"]).is_err());
        assert!(Cli::try_parse_from(["flowlane", "sample", "nested"]).is_ok());
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["flowlane", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["flowlane", "decompose", "g.json"],
            vec!["flowlane", "layers", "g.json"],
            vec!["flowlane", "check", "-"],
            vec!["flowlane", "sample", "diamonds"],
            vec!["flowlane", "completions", "zsh"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse: {:?}, error: {:?}",
                args,
                result.err()
            );
        }
    }
}
