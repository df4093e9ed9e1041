use super::header::{PackageHeader, build_header};
use super::record::encode_fs_region;
use crate::ext::path::PathExt;
use crate::types::FileRecord;
use crate::utils::files::write_file;
use crate::utils::struct_pack::StructPack;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A file entry as written to the filesystem region.
pub struct EntrySummary {
    pub name: String,
    pub name_len: usize,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// What was written, for diagnostics.
pub struct PackageSummary {
    pub header: PackageHeader,
    pub total_size: u64,
    pub files: Vec<EntrySummary>,
}

impl PackageSummary {
    pub fn new(header: PackageHeader, records: &[FileRecord]) -> Self {
        Self {
            header,
            total_size: header.package_len(),
            files: records
                .iter()
                .map(|r| EntrySummary {
                    name: r.name.clone(),
                    name_len: r.name.len(),
                    size: r.content.len() as u64,
                })
                .collect(),
        }
    }
}

/// A package whose header and filesystem region are encoded and ready to be written.
///
/// Building this first means a format error is reported before the destination is touched.
#[derive(Debug)]
pub struct EncodedPackage<'a> {
    header: PackageHeader,
    firmware: &'a [u8],
    fs_region: Vec<u8>,
    summary: PackageSummary,
}

impl<'a> EncodedPackage<'a> {
    pub fn new(firmware: &'a [u8], records: &[FileRecord]) -> Result<Self> {
        let fs_region = encode_fs_region(records)?;
        let header = build_header(firmware.len() as u64, fs_region.len() as u64)?;
        Ok(Self {
            header,
            firmware,
            fs_region,
            summary: PackageSummary::new(header, records),
        })
    }

    /// Writes magic, header fields, firmware and filesystem region, in that order.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.header.pack(writer)?;
        writer.write_all(self.firmware)?;
        writer.write_all(&self.fs_region)?;
        writer.flush()?;
        Ok(())
    }

    pub fn into_summary(self) -> PackageSummary {
        self.summary
    }
}

/// Encodes a package and writes it to `writer`.
pub fn write_package<W: Write>(
    firmware: &[u8],
    records: &[FileRecord],
    writer: &mut W,
) -> Result<PackageSummary> {
    let package = EncodedPackage::new(firmware, records)?;
    package.write_to(writer)?;
    Ok(package.into_summary())
}

/// Encodes a package and writes it to the file at `path`, replacing it.
///
/// With `atomic` the package is written to `<path>.tmp` and renamed over `path`
/// once complete, so a failure never leaves a partial package at `path`.
/// Otherwise a failure part-way may leave a truncated file behind.
pub fn write_package_file<P: AsRef<Path> + ?Sized>(
    firmware: &[u8],
    records: &[FileRecord],
    path: &P,
    atomic: bool,
) -> Result<PackageSummary> {
    let path = path.as_ref();
    let package = EncodedPackage::new(firmware, records)?;
    if !atomic {
        let mut f = write_file(path)?;
        package
            .write_to(&mut f)
            .with_context(|| format!("Failed to write package {}", path.display()))?;
        return Ok(package.into_summary());
    }
    let tmp = path.with_name_suffix(".tmp");
    let re = write_file(&tmp).and_then(|mut f| {
        package
            .write_to(&mut f)
            .with_context(|| format!("Failed to write package {}", tmp.display()))
    });
    if let Err(e) = re {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e).with_context(|| {
            format!("Failed to move {} to {}", tmp.display(), path.display())
        });
    }
    Ok(package.into_summary())
}
