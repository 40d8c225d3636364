use crate::error::{LauncherError, Result};
use crate::header::Header;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::{self, Read};
use std::ops::Range;
use std::path::Path;

/// Signature found at the very start of every InDesign document.
pub const MAGIC: [u8; 16] = [
    0x06, 0x06, 0xED, 0xF5, 0xD8, 0x1D, 0x46, 0xE5, 0xBD, 0x31, 0xEF, 0xE7, 0xFE, 0x74, 0xB7, 0x1D,
];

/// Magic (16) + type (8) + byte order flag (1) + padding (4) + major (4) + minor (4).
pub const HEADER_SIZE: usize = 37;

const MAGIC_RANGE: Range<usize> = 0..16;
const DOC_TYPE_RANGE: Range<usize> = 16..24;
const BYTE_ORDER_OFFSET: usize = 24;
const MAJOR_VERSION_RANGE: Range<usize> = 29..33;

/// Byte order of the multi-byte header fields.
///
/// Only a flag value of `2` selects big-endian. Every other value, including
/// undocumented ones, falls back to little-endian rather than being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrderFlag {
    Big,
    Little,
}

impl ByteOrderFlag {
    pub fn from_flag(flag: u8) -> Self {
        match flag {
            2 => ByteOrderFlag::Big,
            _ => ByteOrderFlag::Little,
        }
    }

    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            ByteOrderFlag::Big => BigEndian::read_u32(buf),
            ByteOrderFlag::Little => LittleEndian::read_u32(buf),
        }
    }

    pub fn write_u32(self, value: u32) -> [u8; 4] {
        let mut out = [0u8; 4];
        match self {
            ByteOrderFlag::Big => BigEndian::write_u32(&mut out, value),
            ByteOrderFlag::Little => LittleEndian::write_u32(&mut out, value),
        }
        out
    }
}

/// The fixed-size prefix of an `.indd` document.
///
/// Only the fields needed to pick an application are decoded. The padding
/// bytes and the minor version that follow the major version are read but
/// not interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InddHeader {
    /// Document type tag, e.g. `DOCUMENT` or `BOOKBOOK`.
    pub doc_type: [u8; 8],

    /// Raw value of the byte order flag at offset 24.
    pub byte_order_flag: u8,

    pub byte_order: ByteOrderFlag,

    /// Format generation of the application that last saved the document.
    pub major_version: u32,
}

impl Header for InddHeader {
    fn major_version(&self) -> u32 {
        self.major_version
    }

    fn is_big_endian(&self) -> bool {
        self.byte_order == ByteOrderFlag::Big
    }

    fn format_name(&self) -> &'static str {
        "INDD"
    }
}

impl InddHeader {
    /// Opens `path`, consumes exactly [`HEADER_SIZE`] bytes and closes it again.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path).map_err(|e| LauncherError::io(path, e))?;
        let header = Self::from_reader(&mut file)?;
        log::debug!(
            "{}: type {:?}, byte order flag {} ({:?}), major {}",
            path.display(),
            String::from_utf8_lossy(&header.doc_type),
            header.byte_order_flag,
            header.byte_order,
            header.major_version
        );
        Ok(header)
    }

    /// Reads the header sequentially from `reader`. No seeking is required.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut raw = [0u8; HEADER_SIZE];
        reader.read_exact(&mut raw).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => LauncherError::ShortRead,
            _ => LauncherError::Read(e),
        })?;
        Self::from_bytes(&raw)
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        if raw.len() < HEADER_SIZE {
            return Err(LauncherError::ShortRead);
        }
        if raw[MAGIC_RANGE] != MAGIC {
            return Err(LauncherError::BadMagic);
        }

        let mut doc_type = [0u8; 8];
        doc_type.copy_from_slice(&raw[DOC_TYPE_RANGE]);
        let byte_order_flag = raw[BYTE_ORDER_OFFSET];
        let byte_order = ByteOrderFlag::from_flag(byte_order_flag);

        Ok(InddHeader {
            doc_type,
            byte_order_flag,
            byte_order,
            major_version: byte_order.read_u32(&raw[MAJOR_VERSION_RANGE]),
        })
    }
}

/// Decodes the major version from the first [`HEADER_SIZE`] bytes of `bytes`.
pub fn parse_version(bytes: &[u8]) -> Result<u32> {
    InddHeader::from_bytes(bytes).map(|h| h.major_version)
}
