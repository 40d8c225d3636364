use std::path::PathBuf;

/// Install names or paths containing any of these are never launched.
pub const DEFAULT_IGNORE_KEYWORDS: &[&str] = &["server", "debug", "prerelease", "beta"];

pub const DEFAULT_APPLICATIONS_DIR: &str = "/Applications";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub ignore_keywords: Vec<String>,
    /// Root scanned for `Adobe InDesign <NAME>` folders on macOS.
    pub applications_dir: PathBuf,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            ignore_keywords: DEFAULT_IGNORE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            applications_dir: PathBuf::from(DEFAULT_APPLICATIONS_DIR),
        }
    }
}
