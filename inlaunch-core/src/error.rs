use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::header::indd::HEADER_SIZE;

pub type Result<T> = std::result::Result<T, LauncherError>;

/// Every failure the launcher core can surface. None of these are retried;
/// the caller decides how to report them and which exit status to use.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// The source ended before a full header could be read.
    #[error("file is too short to hold a document header (need {} bytes)", HEADER_SIZE)]
    ShortRead,

    #[error("not a valid InDesign file (magic number mismatch)")]
    BadMagic,

    #[error("no InDesign versions found on this system; install InDesign and try again")]
    NoInstalledVersions,

    #[error("could not start {}", app.display())]
    LaunchFailure {
        app: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported operating system: {0}")]
    UnsupportedPlatform(&'static str),

    #[error("handler registration failed: {0}")]
    Registration(String),

    #[error("could not read header")]
    Read(#[source] io::Error),

    #[error("could not open {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LauncherError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LauncherError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn chain(err: &dyn Error) -> Vec<String> {
        let mut out = vec![err.to_string()];
        let mut next = err.source();
        while let Some(e) = next {
            out.push(e.to_string());
            next = e.source();
        }
        out
    }

    #[test]
    fn io_cause_is_reported_once() {
        let err = LauncherError::io(
            "/x.indd",
            io::Error::new(io::ErrorKind::NotFound, "No such file"),
        );
        assert_eq!(chain(&err), ["could not open /x.indd", "No such file"]);
    }

    #[test]
    fn read_cause_is_reported_once() {
        let err = LauncherError::Read(io::Error::new(io::ErrorKind::Other, "device gone"));
        assert_eq!(chain(&err), ["could not read header", "device gone"]);
    }
}
