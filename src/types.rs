use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
/// Filesystem image type.
///
/// Only used for diagnostics and directory names; the package layout is the same for both.
pub enum FsLabel {
    #[default]
    #[value(name = "littlefs", alias("lfs"))]
    /// LittleFS image
    LittleFs,
    #[value(name = "spiffs")]
    /// SPIFFS image
    Spiffs,
}

impl FsLabel {
    /// Directory name used when extracting the filesystem files of a package.
    pub fn dir_name(&self) -> &'static str {
        match self {
            FsLabel::LittleFs => "littlefs",
            FsLabel::Spiffs => "spiffs",
        }
    }
}

impl AsRef<str> for FsLabel {
    fn as_ref(&self) -> &str {
        match self {
            FsLabel::LittleFs => "LittleFS",
            FsLabel::Spiffs => "SPIFFS",
        }
    }
}

impl std::fmt::Display for FsLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Order in which filesystem files are written to the package.
pub enum FileOrder {
    #[default]
    /// Directory traversal order: the files of a directory, then its subdirectories
    Walk,
    /// Lexicographic by relative path, byte-wise
    Name,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One file of the filesystem image.
pub struct FileRecord {
    /// Path relative to the filesystem image root, `/` separated.
    pub name: String,
    pub content: Vec<u8>,
}

impl FileRecord {
    pub fn new<S: Into<String>>(name: S, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Options of the pack command.
pub struct PackConfig {
    pub label: FsLabel,
    pub order: FileOrder,
    /// Device limit violations are errors instead of warnings.
    pub strict: bool,
    /// Write to a temporary file and rename it over the destination.
    pub atomic: bool,
    /// Suppress per-file diagnostics.
    pub quiet: bool,
}
