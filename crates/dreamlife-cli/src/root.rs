use dreamlife_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the data root.
///
/// Priority:
/// 1. `--root` flag / `DREAMLIFE_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.dreamlife/`
/// 3. The user's home directory
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if let Some(found) = paths::find_root(&cwd) {
        return found;
    }

    match paths::home_root() {
        Ok(home) => home,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to the working directory");
            cwd
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }
}
