use super::{FORMAT, HEADER_LEN, MAGIC};
use crate::error::FormatError;
use crate::ext::io::*;
use crate::utils::struct_pack::*;
use anyhow::Result;
use fwpkg_tool_macro::{StructPack, StructUnpack};
use serde::Serialize;
use std::io::{Read, Write};

/// The fixed 26-byte header at the start of a package.
///
/// Offsets are always derived from the sizes; use [`build_header`] to create one
/// and [`PackageHeader::decode`] to read and validate one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, StructPack, StructUnpack)]
pub struct PackageHeader {
    #[serde(skip)]
    magic: [u8; 10],
    firmware_size: u32,
    fs_region_size: u32,
    firmware_offset: u32,
    fs_offset: u32,
}

fn to_u32(field: &'static str, value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| FormatError::OffsetOverflow { field, value }.into())
}

/// Builds the header for a firmware of `firmware_size` bytes followed by a
/// filesystem region of `fs_region_size` bytes.
///
/// Fails with [`FormatError::OffsetOverflow`] if a size or an offset does not fit
/// in 32 bits.
pub fn build_header(firmware_size: u64, fs_region_size: u64) -> Result<PackageHeader> {
    let firmware_offset = HEADER_LEN as u64;
    let fs_offset = firmware_offset.saturating_add(firmware_size);
    Ok(PackageHeader {
        magic: *MAGIC,
        firmware_size: to_u32("firmware_size", firmware_size)?,
        fs_region_size: to_u32("fs_region_size", fs_region_size)?,
        firmware_offset: to_u32("firmware_offset", firmware_offset)?,
        fs_offset: to_u32("fs_offset", fs_offset)?,
    })
}

impl PackageHeader {
    pub fn firmware_size(&self) -> u32 {
        self.firmware_size
    }

    pub fn fs_region_size(&self) -> u32 {
        self.fs_region_size
    }

    pub fn firmware_offset(&self) -> u32 {
        self.firmware_offset
    }

    pub fn fs_offset(&self) -> u32 {
        self.fs_offset
    }

    /// Total size of the package described by this header.
    pub fn package_len(&self) -> u64 {
        self.fs_offset as u64 + self.fs_region_size as u64
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(HEADER_LEN);
        self.pack(&mut buf)?;
        Ok(buf)
    }

    /// Reads the header at the start of `data` and checks it against the length of `data`.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(FormatError::Truncated {
                offset: 0,
                need: HEADER_LEN as u64,
                have: data.len() as u64,
            }
            .into());
        }
        let mut reader = MemReaderRef::new(data);
        let header: PackageHeader = reader.read_struct()?;
        if header.magic != *FORMAT.magic {
            return Err(FormatError::BadMagic(header.magic.to_vec()).into());
        }
        if header.firmware_offset as usize != HEADER_LEN {
            return Err(FormatError::HeaderMismatch {
                field: "firmware_offset",
                expected: HEADER_LEN as u64,
                found: header.firmware_offset as u64,
            }
            .into());
        }
        let expected_fs_offset = header.firmware_offset as u64 + header.firmware_size as u64;
        if header.fs_offset as u64 != expected_fs_offset {
            return Err(FormatError::HeaderMismatch {
                field: "fs_offset",
                expected: expected_fs_offset,
                found: header.fs_offset as u64,
            }
            .into());
        }
        let total = data.len() as u64;
        let end = header.package_len();
        if end > total {
            return Err(FormatError::Truncated {
                offset: HEADER_LEN as u64,
                need: end - HEADER_LEN as u64,
                have: total - HEADER_LEN as u64,
            }
            .into());
        }
        if end < total {
            return Err(FormatError::TrailingData(total - end).into());
        }
        Ok(header)
    }
}
