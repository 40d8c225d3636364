use crate::error::{LauncherError, Result};
use crate::registrar::{HandlerRegistrar, RegistrationReport};
use std::path::{Path, PathBuf};

pub const SCRIPT_NAME: &str = "indesign_launcher.applescript";

/// macOS cannot register a plain executable as a document handler, so this
/// writes a droplet script and tells the user how to export it as an app.
#[derive(Debug)]
pub struct AppleScriptRegistrar {
    exe: PathBuf,
    out_dir: PathBuf,
}

impl AppleScriptRegistrar {
    pub fn new<P: AsRef<Path>>(exe: PathBuf, out_dir: P) -> Self {
        Self {
            exe,
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    pub fn script_path(&self) -> PathBuf {
        self.out_dir.join(SCRIPT_NAME)
    }

    /// Runs the launcher once per file dropped on the exported app.
    pub fn script(&self) -> String {
        let exe = self.exe.display().to_string().replace('\\', "\\\\").replace('"', "\\\"");
        format!(
            "on open dropped_files\n    \
             repeat with f in dropped_files\n        \
             do shell script (quoted form of \"{exe}\") & \" \" & (quoted form of (POSIX path of f))\n    \
             end repeat\n\
             end open\n"
        )
    }
}

impl HandlerRegistrar for AppleScriptRegistrar {
    fn register(&self) -> Result<RegistrationReport> {
        let path = self.script_path();
        std::fs::write(&path, self.script()).map_err(|e| {
            LauncherError::Registration(format!("failed to create {}: {e}", path.display()))
        })?;
        log::info!("Wrote {}", path.display());

        let mut report = RegistrationReport::default();
        report.message(format!("Success! A helper file was created at: {}", path.display()));
        report.message("To complete registration, you MUST do this manually:");
        report.message("  1. Open 'Script Editor' (it's in your Utilities folder).");
        report.message(format!("  2. Drag the '{SCRIPT_NAME}' file into it."));
        report.message("  3. Go to 'File' > 'Export...'.");
        report.message("  4. Set 'File Format' to 'Application'.");
        report.message("  5. Save it as 'InDesignLauncher.app' in your Applications folder.");
        report.message("You can now right-click any .indd file, choose 'Get Info',");
        report.message("and set 'InDesignLauncher.app' as the new default.");
        Ok(report)
    }

    fn unregister(&self) -> Result<RegistrationReport> {
        let mut report = RegistrationReport::default();
        report.message("To unregister, simply reset the default handler in Finder:");
        report.message("  1. Right-click any .indd file.");
        report.message("  2. Select 'Get Info'.");
        report.message("  3. In the 'Open with:' section, select 'Adobe InDesign' (or another app).");
        report.message("  4. Click 'Change All...'.");
        Ok(report)
    }
}
