pub mod folder;
pub mod registry;

pub use folder::AppFolderFinder;
pub use registry::RegistryFinder;

use crate::config::LauncherConfig;
use crate::error::{LauncherError, Result};
use crate::selector::InstalledVersions;

/// Enumerates the application versions installed on this host.
pub trait InstalledVersionFinder {
    fn find_installed(&self) -> Result<InstalledVersions>;
}

/// Case-insensitive substring filter over install names and paths.
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter {
    keywords: Vec<String>,
}

impl IgnoreFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn is_ignored(&self, candidate: &str) -> bool {
        let lower = candidate.to_lowercase();
        match self.keywords.iter().find(|k| lower.contains(k.as_str())) {
            Some(keyword) => {
                log::warn!("Ignoring {candidate} (matches '{keyword}')");
                true
            }
            None => false,
        }
    }
}

/// Finder for targets with no discovery strategy.
#[derive(Debug, Default)]
pub struct UnsupportedFinder;

impl InstalledVersionFinder for UnsupportedFinder {
    fn find_installed(&self) -> Result<InstalledVersions> {
        Err(LauncherError::UnsupportedPlatform(std::env::consts::OS))
    }
}

/// Returns the discovery strategy for the platform this was built for.
pub fn platform_finder(config: &LauncherConfig) -> Box<dyn InstalledVersionFinder> {
    let filter = IgnoreFilter::new(&config.ignore_keywords);
    if cfg!(target_os = "macos") {
        Box::new(AppFolderFinder::new(&config.applications_dir, filter))
    } else if cfg!(windows) {
        Box::new(RegistryFinder::new(filter))
    } else {
        Box::new(UnsupportedFinder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keywords_match_case_insensitively() {
        let filter = IgnoreFilter::new(LauncherConfig::default().ignore_keywords);
        assert!(filter.is_ignored("Adobe InDesign Server 2024"));
        assert!(filter.is_ignored(r"C:\Adobe\InDesign (BETA)\InDesign.exe"));
        assert!(filter.is_ignored("InDesign 2025 Prerelease"));
        assert!(filter.is_ignored("indesign-DEBUG"));
        assert!(!filter.is_ignored("Adobe InDesign 2024"));
    }

    #[test]
    fn custom_keywords_replace_defaults() {
        let filter = IgnoreFilter::new(["Trial", " ", ""]);
        assert!(filter.is_ignored("Adobe InDesign 2024 trial"));
        assert!(!filter.is_ignored("Adobe InDesign Server 2024"));
    }

    #[test]
    fn empty_filter_ignores_nothing() {
        assert!(!IgnoreFilter::default().is_ignored("anything beta"));
    }
}
