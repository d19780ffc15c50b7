//! Path helper functions

use std::path::{Path, PathBuf};

use crate::config::Profiles;

/// Return the root of the workspace.
pub fn get_workspace_path() -> PathBuf {
    let runner_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    match runner_manifest.parent() {
        Some(root) => root.to_owned(),
        None => runner_manifest,
    }
}

/// Return the target directory for the given triple and profile.
pub fn get_target_dir_path(triple: &str, profile: Profiles) -> PathBuf {
    let mut path = get_workspace_path();
    path.push("target");
    path.push(triple);
    match profile {
        Profiles::Debug => path.push("debug"),
        Profiles::Release => path.push("release"),
    }
    path
}

/// Return the path to the linker script.
pub fn get_linker_script_path() -> PathBuf {
    let mut path = get_workspace_path();
    path.push("misc");
    path.push("linker-script.x");
    path
}

/// Return true if `a` is older than `b`
pub fn is_older(a: &Path, b: &Path) -> bool {
    let Ok(a_meta) = a.metadata() else {
        return false;
    };
    let Ok(b_meta) = b.metadata() else {
        return false;
    };

    match (a_meta.modified(), b_meta.modified()) {
        (Ok(a), Ok(b)) => a <= b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_dir() {
        let path = get_target_dir_path("armv4t-none-eabi", Profiles::Release);
        assert!(path.starts_with(get_workspace_path()));
        assert!(path.ends_with("target/armv4t-none-eabi/release"));
    }

    #[test]
    fn missing_files_are_never_older() {
        let missing = Path::new("/this/file/does/not/exist");
        assert!(!is_older(missing, &get_linker_script_path()));
    }
}
