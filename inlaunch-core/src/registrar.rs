pub mod applescript;
#[cfg(windows)]
pub mod windows;

pub use applescript::AppleScriptRegistrar;

use crate::error::{LauncherError, Result};
use std::path::Path;

/// Outcome of a (un)registration, for the caller to print.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistrationReport {
    pub messages: Vec<String>,
    /// Steps that failed without aborting the operation.
    pub warnings: Vec<String>,
}

impl RegistrationReport {
    pub(crate) fn message(&mut self, line: impl Into<String>) {
        self.messages.push(line.into());
    }

    pub(crate) fn warn(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::warn!("{line}");
        self.warnings.push(line);
    }
}

/// Makes this launcher available as a handler for `.indd` files.
pub trait HandlerRegistrar {
    fn register(&self) -> Result<RegistrationReport>;
    fn unregister(&self) -> Result<RegistrationReport>;
}

#[derive(Debug, Default)]
pub struct UnsupportedRegistrar;

impl HandlerRegistrar for UnsupportedRegistrar {
    fn register(&self) -> Result<RegistrationReport> {
        Err(LauncherError::UnsupportedPlatform(std::env::consts::OS))
    }

    fn unregister(&self) -> Result<RegistrationReport> {
        Err(LauncherError::UnsupportedPlatform(std::env::consts::OS))
    }
}

#[cfg(any(windows, target_os = "macos"))]
fn current_exe() -> Result<std::path::PathBuf> {
    std::env::current_exe()
        .map_err(|e| LauncherError::Registration(format!("could not find own executable path: {e}")))
}

/// Returns the registrar for the platform this was built for. `script_dir` is
/// where the macOS helper script is written.
#[cfg(windows)]
pub fn platform_registrar(_script_dir: &Path) -> Result<Box<dyn HandlerRegistrar>> {
    Ok(Box::new(windows::ShellRegistrar::new(current_exe()?)))
}

#[cfg(target_os = "macos")]
pub fn platform_registrar(script_dir: &Path) -> Result<Box<dyn HandlerRegistrar>> {
    Ok(Box::new(AppleScriptRegistrar::new(current_exe()?, script_dir)))
}

#[cfg(not(any(windows, target_os = "macos")))]
pub fn platform_registrar(_script_dir: &Path) -> Result<Box<dyn HandlerRegistrar>> {
    Ok(Box::new(UnsupportedRegistrar))
}
