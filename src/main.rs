use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flowgraph::engine::Pipeline;
use flowgraph::nodes::builtin_registry;
use flowgraph::registry::Builder;
use std::path::PathBuf;

/// Build and run dataflow graphs described in JSON.
#[derive(Parser)]
#[command(name = "flowgraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a graph description and run it
    Run {
        /// Path to the graph description
        file: PathBuf,

        /// Number of passes to execute
        #[arg(short, long, default_value = "1")]
        passes: usize,
    },

    /// Print the derived dependency graph in Graphviz format
    Dot {
        /// Path to the graph description
        file: PathBuf,
    },

    /// Print the schema of every built-in node type
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = builtin_registry();

    match cli.command {
        Commands::Run { file, passes } => {
            let mut pipeline = Pipeline::from_path(&registry, &file)
                .with_context(|| format!("failed to build {}", file.display()))?;
            for pass in 0..passes {
                let report = pipeline
                    .execute_once()
                    .with_context(|| format!("pass {} failed", pass + 1))?;
                eprintln!("{}", report.summary());
            }
        }
        Commands::Dot { file } => {
            let (graph, _) = Builder::new(&registry)
                .build_path(&file)
                .with_context(|| format!("failed to build {}", file.display()))?
                .into_graph();
            graph.write_dot(std::io::stdout().lock())?;
        }
        Commands::Schema => {
            let schema = registry.schema()?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
