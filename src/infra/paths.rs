// src/infra/paths.rs — Config file resolution
//
// CACHESWEEP_HOME overrides the user-level config directory. A
// `cachesweep.toml` in the working directory takes precedence over both.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_NAME: &str = "cachesweep.toml";

/// Returns the CACHESWEEP_HOME override, if set.
fn cachesweep_home() -> Option<PathBuf> {
    std::env::var_os("CACHESWEEP_HOME").map(PathBuf::from)
}

/// User-level config directory: $CACHESWEEP_HOME/ or the platform config dir.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(home) = cachesweep_home() {
        return Some(home);
    }
    ProjectDirs::from("", "", "cachesweep").map(|dirs| dirs.config_dir().to_path_buf())
}

/// User-level config file path.
pub fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// First existing config file: `<cwd>/cachesweep.toml`, then the user-level file.
pub fn find_config(cwd: &Path) -> Option<PathBuf> {
    let local = cwd.join(LOCAL_CONFIG_NAME);
    if local.is_file() {
        return Some(local);
    }
    user_config_path().filter(|p| p.is_file())
}
