use super::header::PackageHeader;
use super::record::decode_fs_region;
use crate::error::FormatError;
use crate::types::{FileRecord, FsLabel};
use crate::utils::files::{make_sure_dir_exists, read_file};
use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Name of the extracted firmware payload.
pub const FIRMWARE_FILE_NAME: &str = "firmware.bin";

/// A decoded package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub header: PackageHeader,
    pub firmware: Vec<u8>,
    pub files: Vec<FileRecord>,
}

impl Package {
    /// Decodes a whole package, checking the header against the data length and
    /// requiring the filesystem region to be consumed exactly.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = PackageHeader::decode(data)?;
        let firmware_start = header.firmware_offset() as usize;
        let fs_start = header.fs_offset() as usize;
        let fs_end = fs_start + header.fs_region_size() as usize;
        let firmware = data[firmware_start..fs_start].to_vec();
        let files = decode_fs_region(&data[fs_start..fs_end])?;
        Ok(Self {
            header,
            firmware,
            files,
        })
    }

    pub fn read_file<P: AsRef<Path> + ?Sized>(path: &P) -> Result<Self> {
        let path = path.as_ref();
        let data = read_file(path)?;
        Self::parse(&data).with_context(|| format!("Invalid package {}", path.display()))
    }

    /// Writes the firmware to `<dir>/firmware.bin` and every filesystem file
    /// below `<dir>/<label dir>/`.
    pub fn extract_to<P: AsRef<Path> + ?Sized>(&self, dir: &P, label: FsLabel) -> Result<()> {
        let dir = dir.as_ref();
        // Check every name before writing anything.
        let targets = self
            .files
            .iter()
            .map(|f| safe_join(&dir.join(label.dir_name()), &f.name))
            .collect::<Result<Vec<_>>>()?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        let firmware_path = dir.join(FIRMWARE_FILE_NAME);
        std::fs::write(&firmware_path, &self.firmware)
            .with_context(|| format!("Failed to write file {}", firmware_path.display()))?;
        for (file, target) in self.files.iter().zip(targets) {
            make_sure_dir_exists(&target)
                .with_context(|| format!("Failed to create directory for {}", target.display()))?;
            std::fs::write(&target, &file.content)
                .with_context(|| format!("Failed to write file {}", target.display()))?;
        }
        Ok(())
    }
}

/// Joins a `/` separated package name onto `base`, refusing names that would
/// escape it.
fn safe_join(base: &Path, name: &str) -> Result<PathBuf> {
    let mut path = base.to_path_buf();
    let mut pushed = false;
    for part in name.split('/') {
        match part {
            "" | "." => continue,
            ".." => return Err(FormatError::UnsafeName(name.to_string()).into()),
            _ => {}
        }
        let mut components = Path::new(part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(c)), None) => path.push(c),
            _ => return Err(FormatError::UnsafeName(name.to_string()).into()),
        }
        pushed = true;
    }
    if !pushed || name.starts_with('/') {
        return Err(FormatError::UnsafeName(name.to_string()).into());
    }
    Ok(path)
}
