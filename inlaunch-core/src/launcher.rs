use crate::error::{LauncherError, Result};
use std::path::Path;
use std::process::Command;

/// Starts an application on a document without waiting for it to exit.
pub trait Launcher {
    fn launch(&self, app: &Path, file: &Path) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    /// The command used to open `file` with `app` on the current target.
    pub fn command(app: &Path, file: &Path) -> Result<Command> {
        if cfg!(windows) {
            let mut cmd = Command::new(app);
            cmd.arg(file);
            Ok(cmd)
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg("-a").arg(app).arg(file);
            Ok(cmd)
        } else {
            Err(LauncherError::UnsupportedPlatform(std::env::consts::OS))
        }
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, app: &Path, file: &Path) -> Result<()> {
        let mut cmd = Self::command(app, file)?;
        log::debug!("Spawning {cmd:?}");
        let child = cmd.spawn().map_err(|source| LauncherError::LaunchFailure {
            app: app.to_path_buf(),
            source,
        })?;
        log::info!("Started {} (pid {})", app.display(), child.id());
        Ok(())
    }
}
