use clap::{Parser, Subcommand};
use log::{error, info};
use multiplex::config::LoaderOptions;
use multiplex::exports::{write_json, GraphRecord};
use multiplex::fusion::{fuse_layers, FusionError};
use multiplex::graph::LayerGraph;
use multiplex::imports::{
    read_communities, read_labels, read_multiplex, read_options, ImportError,
};
use multiplex::multiplex::{build_layers_with, LayerId, MultiplexError};
use multiplex::partition::{labels_from_communities, normalized_mutual_info, PartitionError};
use multiplex::progress_bar::{get_hidden_bar, get_progress_bar};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build one weighted graph per layer of a multiplex edge list
    #[command(arg_required_else_help(true))]
    Layers {
        /// Multiplex JSON file: {"<layer>": [[u, v], ...], ...}
        #[clap(index = 1)]
        input: PathBuf,
        /// Loader options JSON file
        #[arg(long)]
        options: Option<PathBuf>,
        /// Keep self-loop edges instead of dropping them
        #[arg(long, action)]
        keep_self_loops: bool,
    },
    /// Fuse the layers of a multiplex edge list into one weighted graph
    #[command(arg_required_else_help(true))]
    Fuse {
        /// Multiplex JSON file: {"<layer>": [[u, v], ...], ...}
        #[clap(index = 1)]
        input: PathBuf,
        /// One coefficient per layer, in ascending layer order
        #[arg(
            short,
            long,
            value_delimiter = ',',
            required = true,
            allow_negative_numbers = true
        )]
        coefficients: Vec<f64>,
        /// Loader options JSON file
        #[arg(long)]
        options: Option<PathBuf>,
        /// Keep self-loop edges instead of dropping them
        #[arg(long, action)]
        keep_self_loops: bool,
    },
    /// Turn a community list into one label per node, in node order
    #[command(arg_required_else_help(true))]
    Labels {
        /// Community list JSON file: [[node, ...], ...]
        #[clap(index = 1)]
        input: PathBuf,
    },
    /// Normalized mutual information of two label lists
    #[command(arg_required_else_help(true))]
    Nmi {
        #[clap(index = 1)]
        first: PathBuf,
        #[clap(index = 2)]
        second: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Multiplex(#[from] MultiplexError),
    #[error(transparent)]
    Fusion(#[from] FusionError),
    #[error(transparent)]
    Partition(#[from] PartitionError),
    #[error("Unable to write output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("Unable to write output: {0}")]
    Io(#[from] io::Error),
}

fn loader_options(
    options: Option<&Path>,
    keep_self_loops: bool,
) -> Result<LoaderOptions, ImportError> {
    let options = match options {
        Some(path) => read_options(path)?,
        None => LoaderOptions::default(),
    };
    if keep_self_loops {
        Ok(LoaderOptions::keep_self_loops())
    } else {
        Ok(options)
    }
}

fn load_layers(
    input: &Path,
    options: &LoaderOptions,
) -> Result<Vec<(LayerId, LayerGraph)>, CommandError> {
    let raw = read_multiplex(input)?;
    info!("Read {} layer(s) from {}", raw.len(), input.display());
    Ok(build_layers_with(&raw, options)?)
}

fn run(command: Commands) -> Result<(), CommandError> {
    let mut stdout = io::stdout().lock();
    match command {
        Commands::Layers {
            input,
            options,
            keep_self_loops,
        } => {
            let options = loader_options(options.as_deref(), keep_self_loops)?;
            let layers = load_layers(&input, &options)?;

            let bar = if io::stderr().is_terminal() {
                get_progress_bar(layers.len() as u64)
            } else {
                get_hidden_bar(layers.len() as u64)
            };
            bar.set_message("Exporting layers");
            let records = layers
                .iter()
                .map(|(layer, graph)| {
                    bar.inc(1);
                    GraphRecord::from_graph(graph, Some(*layer))
                })
                .collect::<Vec<_>>();
            bar.finish_and_clear();
            write_json(&mut stdout, &records)?;
        }
        Commands::Fuse {
            input,
            coefficients,
            options,
            keep_self_loops,
        } => {
            let options = loader_options(options.as_deref(), keep_self_loops)?;
            let graphs = load_layers(&input, &options)?
                .into_iter()
                .map(|(_, graph)| graph)
                .collect::<Vec<_>>();
            let fused = fuse_layers(&graphs, &coefficients)?;
            info!(
                "Fused graph has {} node(s) and {} edge(s)",
                fused.node_count(),
                fused.edge_count()
            );
            write_json(&mut stdout, &GraphRecord::from_graph(&fused, None))?;
        }
        Commands::Labels { input } => {
            let communities = read_communities(&input)?;
            write_json(&mut stdout, &labels_from_communities(&communities))?;
        }
        Commands::Nmi { first, second } => {
            let first = read_labels(&first)?;
            let second = read_labels(&second)?;
            write!(stdout, "{}", normalized_mutual_info(&first, &second)?)?;
        }
    }
    writeln!(stdout)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
