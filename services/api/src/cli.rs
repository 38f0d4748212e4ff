use crate::commands::{
    run_classify, run_map, run_sankey, run_story, MapArgs, SankeyArgs, StoryArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use listing_audit::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Listing Audit",
    about = "Classify short-term rental listings by legality and serve the sankey geometry",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print per-category counts for a listing snapshot
    Classify(ClassifyArgs),
    /// Print the laid-out sankey diagram as JSON
    Sankey(SankeyArgs),
    /// Walk the guided reveal, or print a single frame as JSON
    Story(StoryArgs),
    /// Print map points coloured by the chosen rule as JSON
    Map(MapArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Listing snapshot to serve (CSV or JSON). Falls back to APP_LISTINGS_PATH.
    #[arg(long)]
    pub(crate) listings: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Listing snapshot (CSV or JSON). Falls back to APP_LISTINGS_PATH.
    #[arg(long)]
    pub(crate) listings: Option<PathBuf>,
    /// Emit the classification summary as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Classify(args) => run_classify(args),
        Command::Sankey(args) => run_sankey(args),
        Command::Story(args) => run_story(args),
        Command::Map(args) => run_map(args),
    }
}
