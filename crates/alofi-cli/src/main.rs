use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use alofi_cli::commands::nearest::{handle_nearest_command, NearestCommandArgs};
use alofi_cli::commands::networks::handle_networks_command;
use alofi_cli::commands::route::{handle_route_command, RouteCommandArgs};
use alofi_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Diverse, sustainability-scored routing on road networks")]
struct Cli {
    /// Override the dataset directory or file path.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the network variants stored in the dataset.
    Networks,
    /// Snap a coordinate to the closest node of a network.
    Nearest(NearestCommandArgs),
    /// Plan diverse routes between two coordinates and score them.
    Route(RouteCommandArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let target = cli.data_dir.as_deref();

    match &cli.command {
        Command::Networks => handle_networks_command(target, cli.format),
        Command::Nearest(args) => handle_nearest_command(target, cli.format, args),
        Command::Route(args) => handle_route_command(target, cli.format, args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
