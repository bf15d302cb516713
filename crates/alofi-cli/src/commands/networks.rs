//! Networks command handler listing the variants in a dataset.

use std::path::Path;

use anyhow::Result;

use crate::commands::load_catalog;
use crate::output::{render_networks, OutputFormat};
use crate::terminal::ColorPalette;

/// Handle the networks subcommand.
pub fn handle_networks_command(target: Option<&Path>, format: OutputFormat) -> Result<()> {
    let catalog = load_catalog(target)?;
    let rendered = render_networks(catalog.networks(), format, ColorPalette::detect())?;
    print!("{rendered}");
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
