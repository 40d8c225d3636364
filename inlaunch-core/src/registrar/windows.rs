use crate::error::{LauncherError, Result};
use crate::registrar::{HandlerRegistrar, RegistrationReport};
use std::io;
use std::path::PathBuf;
use winreg::enums::{RegType, HKEY_CURRENT_USER, KEY_SET_VALUE};
use winreg::{RegKey, RegValue};

const PROG_ID: &str = "InDesignLauncher.indd";
const PROG_ID_KEY: &str = r"Software\Classes\InDesignLauncher.indd";
const OPEN_WITH_KEY: &str =
    r"Software\Microsoft\Windows\CurrentVersion\Explorer\FileExts\.indd\OpenWithProgids";

/// Adds the launcher to Explorer's "Open with" list for `.indd` under HKCU.
#[derive(Debug)]
pub struct ShellRegistrar {
    exe: PathBuf,
}

impl ShellRegistrar {
    pub fn new(exe: PathBuf) -> Self {
        Self { exe }
    }

    fn open_command(&self) -> String {
        format!("\"{}\" \"%1\"", self.exe.display())
    }
}

fn registration_error(what: &str, e: io::Error) -> LauncherError {
    LauncherError::Registration(format!("{what}: {e}"))
}

impl HandlerRegistrar for ShellRegistrar {
    fn register(&self) -> Result<RegistrationReport> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);

        let (command_key, _) = hkcu
            .create_subkey(format!(r"{PROG_ID_KEY}\shell\open\command"))
            .map_err(|e| registration_error("could not create shell command key", e))?;
        command_key
            .set_value("", &self.open_command())
            .map_err(|e| registration_error("could not set shell command", e))?;

        let (open_with, _) = hkcu
            .create_subkey(OPEN_WITH_KEY)
            .map_err(|e| registration_error("could not create/open OpenWithProgids key", e))?;
        let marker = RegValue {
            bytes: Vec::new(),
            vtype: RegType::REG_NONE,
        };
        open_with
            .set_raw_value(PROG_ID, &marker)
            .map_err(|e| registration_error("could not add entry to OpenWithProgids", e))?;

        notify_shell();

        let mut report = RegistrationReport::default();
        report.message("Successfully added 'InDesign Launcher' to the 'Open With' list.");
        report.message("To set as default:");
        report.message("  1. Right-click an .indd file");
        report.message("  2. Select 'Open with' > 'Choose another app'");
        report.message("  3. Select 'InDesign Launcher' and check 'Always use this app...'");
        Ok(report)
    }

    fn unregister(&self) -> Result<RegistrationReport> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let mut report = RegistrationReport::default();

        match hkcu.open_subkey_with_flags(OPEN_WITH_KEY, KEY_SET_VALUE) {
            Ok(key) => {
                if let Err(e) = key.delete_value(PROG_ID) {
                    if e.kind() != io::ErrorKind::NotFound {
                        report.warn(format!("could not delete OpenWithProgids value: {e}"));
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => report.warn(format!("could not open OpenWithProgids key: {e}")),
        }

        // Innermost first; delete_subkey refuses keys that still have children.
        for (suffix, label) in [
            (r"\shell\open\command", "command"),
            (r"\shell\open", "open"),
            (r"\shell", "shell"),
            ("", "main ProgID"),
        ] {
            if let Err(e) = hkcu.delete_subkey(format!("{PROG_ID_KEY}{suffix}")) {
                if e.kind() != io::ErrorKind::NotFound {
                    report.warn(format!("could not delete {label} key: {e}"));
                }
            }
        }

        notify_shell();

        if report.warnings.is_empty() {
            report.message("Successfully unregistered.");
        } else {
            report.message("Unregister complete with warnings.");
        }
        Ok(report)
    }
}

fn notify_shell() {
    use windows_sys::Win32::UI::Shell::{SHChangeNotify, SHCNE_ASSOCCHANGED, SHCNF_IDLIST};
    // SAFETY: both item pointers may be null for SHCNE_ASSOCCHANGED.
    unsafe {
        SHChangeNotify(
            SHCNE_ASSOCCHANGED,
            SHCNF_IDLIST,
            std::ptr::null(),
            std::ptr::null(),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_command_quotes_exe_and_argument() {
        let registrar = ShellRegistrar::new(PathBuf::from(r"C:\Tools\inlaunch.exe"));
        assert_eq!(registrar.open_command(), r#""C:\Tools\inlaunch.exe" "%1""#);
    }
}
