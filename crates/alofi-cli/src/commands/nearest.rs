//! Nearest command handler snapping a coordinate onto a network.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use alofi_lib::{nearest_node, Coordinate};

use crate::commands::load_catalog;
use crate::output::{render_nearest, OutputFormat};
use crate::terminal::ColorPalette;

/// Arguments for the nearest command.
#[derive(Args, Debug, Clone)]
pub struct NearestCommandArgs {
    /// Network variant name or label (e.g. G_base).
    #[arg(long)]
    pub network: String,
    /// Latitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    /// Longitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
}

/// Handle the nearest subcommand.
pub fn handle_nearest_command(
    target: Option<&Path>,
    format: OutputFormat,
    args: &NearestCommandArgs,
) -> Result<()> {
    let catalog = load_catalog(target)?;
    let network = catalog.get(&args.network)?;
    let snapped = nearest_node(&network.graph, Coordinate::new(args.lat, args.lon))
        .with_context(|| {
            format!(
                "failed to snap ({}, {}) onto {}",
                args.lat, args.lon, network.name
            )
        })?;

    let rendered = render_nearest(network, &snapped, format, ColorPalette::detect())?;
    print!("{rendered}");
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
