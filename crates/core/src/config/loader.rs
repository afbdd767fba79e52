//! Config path resolution
//!
//! The host decides the base directory (usually its data folder); this
//! module only lays out the files beneath it.

use std::path::{Path, PathBuf};

/// Returns the configs directory under `base`.
///
/// Path: `<base>/configs/`
pub fn configs_dir(base: &Path) -> PathBuf {
    base.join("configs")
}

/// Returns the core config path under `base`.
///
/// Path: `<base>/configs/core.toml`
pub fn core_config_path(base: &Path) -> PathBuf {
    configs_dir(base).join("core.toml")
}
