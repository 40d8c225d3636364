use crate::catalog::version_name;
use crate::error::{LauncherError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Installed application versions keyed by major version.
pub type InstalledVersions = BTreeMap<u32, PathBuf>;

/// Which installed application to open a document with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub app_path: PathBuf,
    pub chosen: u32,
    pub required: u32,
}

impl Resolution {
    /// False when every installed version predates the document and the
    /// newest one was picked as a best effort.
    pub fn is_compatible(&self) -> bool {
        self.chosen >= self.required
    }

    pub fn chosen_name(&self) -> Option<&'static str> {
        version_name(self.chosen)
    }

    pub fn required_name(&self) -> Option<&'static str> {
        version_name(self.required)
    }
}

/// Picks the oldest installed version that can open a `required` document.
///
/// Newer releases are assumed to open anything an older release saved, never
/// the other way round. When nothing installed is new enough the newest
/// install is returned instead and [`Resolution::is_compatible`] is false.
/// An empty `installed` set is reported as [`LauncherError::NoInstalledVersions`].
/// Reporting the fallback is left to the caller.
pub fn select_version(required: u32, installed: &InstalledVersions) -> Result<Resolution> {
    let (&chosen, app_path) = installed
        .range(required..)
        .next()
        .or_else(|| installed.last_key_value())
        .ok_or(LauncherError::NoInstalledVersions)?;

    Ok(Resolution {
        app_path: app_path.clone(),
        chosen,
        required,
    })
}
