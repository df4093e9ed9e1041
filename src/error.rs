//! Errors raised when a package cannot be encoded or decoded.
use thiserror::Error;

/// A violation of the package format.
///
/// Library functions return [`anyhow::Result`]; format violations travel inside
/// it as this type and can be recovered with `downcast_ref::<FormatError>()`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("File name '{name}' is {len} bytes long, the package format allows at most {max} bytes")]
    NameTooLong { name: String, len: usize, max: usize },
    #[error("File '{name}' is {len} bytes long, the package format allows at most {max} bytes")]
    ContentTooLarge { name: String, len: u64, max: u64 },
    #[error("Filesystem region is {0} bytes long, which does not fit in a 32-bit size field")]
    RegionTooLarge(u64),
    #[error("{field} ({value}) does not fit in a 32-bit offset field")]
    OffsetOverflow { field: &'static str, value: u64 },
    #[error("Invalid package magic: {0:02X?}")]
    BadMagic(Vec<u8>),
    #[error("Package is truncated: need {need} bytes at offset {offset}, only {have} available")]
    Truncated { offset: u64, need: u64, have: u64 },
    #[error("Header field {field} is {found}, expected {expected}")]
    HeaderMismatch {
        field: &'static str,
        expected: u64,
        found: u64,
    },
    #[error("Found {0} unexpected bytes after the end of the filesystem region")]
    TrailingData(u64),
    #[error("Entry {index} overruns the filesystem region: need {need} bytes, only {have} left")]
    RecordOverrun { index: usize, need: u64, have: u64 },
    #[error("File name of entry {0} is not valid UTF-8")]
    InvalidName(usize),
    #[error("Refusing to extract unsafe file name '{0}'")]
    UnsafeName(String),
    #[error("File name '{name}' is {len} bytes long, the device updater accepts {min} to {max} bytes")]
    DeviceNameLimit {
        name: String,
        len: usize,
        min: usize,
        max: usize,
    },
    #[error("File '{name}' is {len} bytes long, the device updater accepts at most {max} bytes")]
    DeviceFileSize { name: String, len: u64, max: u64 },
}
