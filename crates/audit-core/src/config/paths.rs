use std::path::{Path, PathBuf};

/// Directory holding the running executable, or the working directory when it
/// cannot be resolved.
pub(super) fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
