use crate::catalog::version_for_name;
use crate::discovery::{IgnoreFilter, InstalledVersionFinder};
use crate::error::{LauncherError, Result};
use crate::selector::InstalledVersions;
use std::path::{Path, PathBuf};

const FOLDER_PREFIX: &str = "Adobe InDesign ";

/// Scans an applications folder for `Adobe InDesign <NAME>/<same>.app` bundles.
#[derive(Debug)]
pub struct AppFolderFinder {
    root: PathBuf,
    filter: IgnoreFilter,
}

impl AppFolderFinder {
    pub fn new<P: AsRef<Path>>(root: P, filter: IgnoreFilter) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            filter,
        }
    }

    fn probe(&self, dir_name: &str) -> Option<(u32, PathBuf)> {
        let name = dir_name.strip_prefix(FOLDER_PREFIX)?;
        if self.filter.is_ignored(dir_name) {
            return None;
        }
        let Some(major) = version_for_name(name) else {
            log::debug!("Skipping {dir_name}: unknown version name '{name}'");
            return None;
        };

        let app = self.root.join(dir_name).join(format!("{dir_name}.app"));
        if app.exists() {
            Some((major, app))
        } else {
            log::debug!("Skipping {dir_name}: {} not found", app.display());
            None
        }
    }
}

impl InstalledVersionFinder for AppFolderFinder {
    fn find_installed(&self) -> Result<InstalledVersions> {
        let entries =
            std::fs::read_dir(&self.root).map_err(|e| LauncherError::io(&self.root, e))?;

        let mut found = InstalledVersions::new();
        for entry in entries.flatten() {
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let dir_name = entry.file_name();
            let Some(dir_name) = dir_name.to_str() else {
                continue;
            };
            if let Some((major, app)) = self.probe(dir_name) {
                log::info!("Found version {major} at {}", app.display());
                found.insert(major, app);
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_IGNORE_KEYWORDS;
    use std::fs;

    fn install(root: &Path, dir_name: &str) -> PathBuf {
        let app = root.join(dir_name).join(format!("{dir_name}.app"));
        fs::create_dir_all(&app).unwrap();
        app
    }

    fn finder(root: &Path) -> AppFolderFinder {
        AppFolderFinder::new(root, IgnoreFilter::new(DEFAULT_IGNORE_KEYWORDS))
    }

    #[test]
    fn finds_named_bundles() {
        let dir = tempfile::tempdir().unwrap();
        let a = install(dir.path(), "Adobe InDesign 2024");
        let b = install(dir.path(), "Adobe InDesign CC 2018");

        let found = finder(dir.path()).find_installed().unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[&19], a);
        assert_eq!(found[&13], b);
    }

    #[test]
    fn skips_ignored_unknown_and_incomplete_installs() {
        let dir = tempfile::tempdir().unwrap();
        install(dir.path(), "Adobe InDesign Server 2024");
        install(dir.path(), "Adobe InDesign 2016");
        install(dir.path(), "Adobe Photoshop 2024");
        fs::create_dir(dir.path().join("Adobe InDesign 2023")).unwrap();
        fs::write(dir.path().join("Adobe InDesign 2022"), b"").unwrap();

        assert!(finder(dir.path()).find_installed().unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = finder(&dir.path().join("nope")).find_installed().unwrap_err();
        assert!(matches!(err, LauncherError::Io { .. }));
    }
}
