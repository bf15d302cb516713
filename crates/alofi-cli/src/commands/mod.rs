// Module exports for CLI subcommands
//
// Each module handles one subcommand. main.rs parses arguments and dispatches
// to these handlers.

pub mod nearest;
pub mod networks;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use alofi_lib::{load_networks, resolve_dataset, NetworkCatalog};

/// Resolve the dataset location and load every network variant it holds.
pub fn load_catalog(target: Option<&Path>) -> Result<NetworkCatalog> {
    let dataset_path =
        resolve_dataset(target).context("failed to locate the Alofi network dataset")?;
    let catalog = load_networks(&dataset_path)
        .with_context(|| format!("failed to load dataset from {}", dataset_path.display()))?;
    debug!(networks = catalog.len(), "catalog ready");
    Ok(catalog)
}
