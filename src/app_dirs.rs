use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Run log location under `$HOME/.local/state/stride`, with a
    /// platform-specific fallback when `HOME` is unset.
    pub fn runs_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("stride");
            Some(state_dir.join("runs.json"))
        } else {
            ProjectDirs::from("", "", "stride")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("runs.json"))
        }
    }
}
