pub mod indd;

pub use indd::{parse_version, ByteOrderFlag, InddHeader, HEADER_SIZE, MAGIC};

pub trait Header: std::fmt::Debug + Send + Sync {
    /// Returns the document format generation recorded in the header.
    fn major_version(&self) -> u32;

    /// Returns true if multi-byte fields in the document are big-endian.
    fn is_big_endian(&self) -> bool;

    /// Returns a short human-readable name, e.g. "INDD".
    fn format_name(&self) -> &'static str;
}
