use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;

/// Default location of the engine configuration bundle, relative to the
/// repository root.
pub static CONFIG_PATH: Lazy<&'static Path> = Lazy::new(|| {
    Path::new(option_env!("PASSMARK_CONFIG_PATH").unwrap_or("share/config.bundle.json"))
});

/// Reads the engine configuration bundle as an opaque JSON string.
///
/// The contents are handed to the engine's own configuration entry point
/// and not interpreted here. With no explicit path, the default bundle is
/// located by walking up from the current directory.
pub fn read_config(path: Option<&Path>) -> Result<String> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => resolve_path(&CONFIG_PATH)
            .with_context(|| format!("locating {}", CONFIG_PATH.display()))?,
    };
    std::fs::read_to_string(&path).with_context(|| format!("reading config at {}", path.display()))
}

/// Locates a repository-relative path by walking up from the current
/// directory until the path exists under an ancestor.
pub fn resolve_path(relative: &Path) -> Option<PathBuf> {
    let base = std::env::current_dir().ok()?;
    for dir in base.ancestors() {
        let candidate = dir.join(relative);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}
