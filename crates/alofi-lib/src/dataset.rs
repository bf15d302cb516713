use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the network dataset.
pub const DATASET_FILENAME: &str = "networks.db";

/// Environment variable overriding the dataset location.
pub const DATA_PATH_ENV: &str = "ALOFI_DATA_PATH";

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "alofi", "alofi").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Locate an existing dataset file.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `ALOFI_DATA_PATH` environment variable.
/// 3. Platform-specific project data directory.
///
/// Directories (or paths without an extension) resolve to
/// `<dir>/networks.db`. Datasets are never created or downloaded here.
pub fn resolve_dataset(target: Option<&Path>) -> Result<PathBuf> {
    let candidate = if let Some(explicit) = target {
        canonical_dataset_path(explicit)
    } else if let Some(env_path) = env::var_os(DATA_PATH_ENV) {
        canonical_dataset_path(Path::new(&env_path))
    } else {
        default_dataset_path()?
    };

    debug!(path = %candidate.display(), "resolved dataset path");
    if candidate.is_file() {
        Ok(candidate)
    } else {
        Err(Error::DatasetNotFound { path: candidate })
    }
}

fn canonical_dataset_path(path: &Path) -> PathBuf {
    if path.is_dir() || path.extension().is_none() {
        return path.join(DATASET_FILENAME);
    }
    path.to_path_buf()
}
