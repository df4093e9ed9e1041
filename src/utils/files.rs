use crate::types::{FileOrder, FileRecord};
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::io;
use std::io::BufWriter;
use std::path::Path;

/// Collects every regular file below `root` as a [`FileRecord`].
///
/// Symbolic links to files are read through; symbolic links to directories are
/// not followed. A dangling link fails like any unreadable file.
///
/// Names are relative to `root` and use `/` as separator. With [`FileOrder::Walk`]
/// the files of a directory come first, in listing order, followed by the contents
/// of each subdirectory in listing order. [`FileOrder::Name`] sorts by name.
pub fn collect_fs_files<P: AsRef<Path> + ?Sized>(
    root: &P,
    order: FileOrder,
) -> Result<Vec<FileRecord>> {
    let root = root.as_ref();
    if !root.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Filesystem directory {} does not exist", root.display()),
        )
        .into());
    }
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Filesystem path {} is not a directory", root.display()),
        )
        .into());
    }
    let mut records = Vec::new();
    walk_dir(root, "", &mut records)?;
    if order == FileOrder::Name {
        records.sort_by(|a, b| a.name.cmp(&b.name));
    }
    Ok(records)
}

fn walk_dir(dir: &Path, prefix: &str, records: &mut Vec<FileRecord>) -> Result<()> {
    let mut sub_dirs = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to list directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list directory {}", dir.display()))?;
        let path = entry.path();
        let file_name = entry.file_name();
        let file_name = file_name
            .to_str()
            .ok_or_else(|| anyhow!("Path {} is not valid UTF-8", path.display()))?;
        let name = if prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", prefix, file_name)
        };
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        if file_type.is_dir() {
            sub_dirs.push((path, name));
        } else if file_type.is_symlink() {
            // Linked directories are not entered; anything else is read through the link.
            if fs::metadata(&path).is_ok_and(|m| m.is_dir()) {
                continue;
            }
            let content = read_file(&path)?;
            records.push(FileRecord::new(name, content));
        } else if file_type.is_file() {
            let content = read_file(&path)?;
            records.push(FileRecord::new(name, content));
        }
    }
    for (path, name) in sub_dirs {
        walk_dir(&path, &name, records)?;
    }
    Ok(())
}

/// Reads a whole file into memory.
pub fn read_file<F: AsRef<Path> + ?Sized>(f: &F) -> Result<Vec<u8>> {
    let path = f.as_ref();
    fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Creates (or truncates) `f` for buffered writing.
pub fn write_file<F: AsRef<Path> + ?Sized>(f: &F) -> Result<BufWriter<fs::File>> {
    let path = f.as_ref();
    let file =
        fs::File::create(path).with_context(|| format!("Failed to create file {}", path.display()))?;
    Ok(BufWriter::new(file))
}

pub fn make_sure_dir_exists<F: AsRef<Path> + ?Sized>(f: &F) -> io::Result<()> {
    let path = f.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
