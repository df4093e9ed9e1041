//! Extensions for std::path

use std::path::{Path, PathBuf};

pub trait PathExt {
    /// Returns a sibling path whose file name is this path's file name followed by `suffix`.
    ///
    /// `out/update.pkg` with suffix `.tmp` becomes `out/update.pkg.tmp`.
    fn with_name_suffix(&self, suffix: &str) -> PathBuf;
}

impl PathExt for Path {
    fn with_name_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_name_suffix() {
        assert_eq!(
            Path::new("out/update.pkg").with_name_suffix(".tmp"),
            PathBuf::from("out/update.pkg.tmp")
        );
        assert_eq!(
            Path::new("update").with_name_suffix(".tmp"),
            PathBuf::from("update.tmp")
        );
    }
}
