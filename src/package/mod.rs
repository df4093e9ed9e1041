//! ESP firmware update package format.
//!
//! ```text
//! offset 0:  magic[10]            "ESP_UPDATE"
//! offset 10: firmware_size   u32
//! offset 14: fs_region_size  u32
//! offset 18: firmware_offset u32   (== 26)
//! offset 22: fs_offset       u32   (== 26 + firmware_size)
//! offset 26: firmware_bytes[firmware_size]
//! offset 26+firmware_size: fs_region[fs_region_size]
//! ```
//!
//! The filesystem region is a sequence of records, each
//! `name_len u16, content_len u32, name[name_len], content[content_len]`.
//! All integers are unsigned little-endian. There is no padding anywhere.
pub mod device;
pub mod header;
pub mod reader;
pub mod record;
pub mod writer;

pub use header::{PackageHeader, build_header};
pub use reader::Package;
pub use record::{decode_fs_region, encode_fs_region};
pub use writer::{EncodedPackage, PackageSummary, write_package, write_package_file};

/// Magic marker at the start of every package.
pub const MAGIC: &[u8; 10] = b"ESP_UPDATE";

/// Description of the package layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageFormat {
    pub magic: &'static [u8; 10],
    /// Size of the four u32 header fields following the magic.
    pub fields_len: usize,
    /// Size of the `name_len u16, content_len u32` prefix of each record.
    pub record_prefix_len: usize,
    pub max_name_len: usize,
    pub max_content_len: u64,
}

impl PackageFormat {
    /// Bytes before the firmware payload, which is also the firmware offset.
    pub const fn header_len(&self) -> usize {
        self.magic.len() + self.fields_len
    }
}

pub const FORMAT: PackageFormat = PackageFormat {
    magic: MAGIC,
    fields_len: 4 * std::mem::size_of::<u32>(),
    record_prefix_len: std::mem::size_of::<u16>() + std::mem::size_of::<u32>(),
    max_name_len: u16::MAX as usize,
    max_content_len: u32::MAX as u64,
};

pub const HEADER_LEN: usize = FORMAT.header_len();
