pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod header;
pub mod launcher;
pub mod registrar;
pub mod selector;

pub use catalog::*;
pub use config::*;
pub use discovery::*;
pub use error::*;
pub use header::*;
pub use launcher::*;
pub use registrar::*;
pub use selector::*;
