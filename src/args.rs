use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use fwpkg_tool::types::*;

/// Build ESP firmware update packages from a firmware binary and a filesystem image directory
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, subcommand_negates_reqs = true)]
pub struct Arg {
    #[arg(required = true)]
    /// Firmware binary
    pub firmware: Option<String>,
    #[arg(required = true)]
    /// Root directory of the filesystem image
    pub fs_root: Option<String>,
    #[arg(required = true)]
    /// Output package file
    pub output: Option<String>,
    #[arg(short, long, value_enum, default_value_t = FsLabel::LittleFs)]
    /// Filesystem image type, used in messages
    pub label: FsLabel,
    #[arg(short, long, action = ArgAction::SetTrue)]
    /// Sort filesystem files by name for reproducible packages
    pub sort: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    /// Write to a temporary file and rename it when complete
    pub atomic: bool,
    #[arg(long, action = ArgAction::SetTrue)]
    /// Fail instead of warning when a file name exceeds the device limits
    pub strict: bool,
    #[arg(short, long, action = ArgAction::SetTrue, global = true)]
    /// Do not print per-file details
    pub quiet: bool,
    #[arg(global = true, action = ArgAction::SetTrue, short, long)]
    /// Print backtrace on error
    pub backtrace: bool,
    #[command(subcommand)]
    /// Command
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
/// Commands
pub enum Command {
    /// Print the header and file table of a package
    Info {
        /// Package file
        package: String,
        #[arg(long, action = ArgAction::SetTrue)]
        /// Print as JSON
        json: bool,
    },
    /// Extract the firmware and filesystem files of a package
    Unpack {
        /// Package file
        package: String,
        /// Output directory
        output: String,
        #[arg(short, long, value_enum, default_value_t = FsLabel::LittleFs)]
        /// Filesystem image type, names the directory holding the files
        label: FsLabel,
    },
}

impl Arg {
    pub fn pack_config(&self) -> PackConfig {
        PackConfig {
            label: self.label,
            order: if self.sort {
                FileOrder::Name
            } else {
                FileOrder::Walk
            },
            strict: self.strict,
            atomic: self.atomic,
            quiet: self.quiet,
        }
    }

    /// Whether the run tally is printed on exit; `info` only reads.
    pub fn shows_counter(&self) -> bool {
        !matches!(self.command, Some(Command::Info { .. }))
    }
}

pub fn parse_args() -> Arg {
    Arg::parse()
}

/// Reports a usage error the way clap does and exits.
pub fn usage_error(message: &str) -> ! {
    Arg::command()
        .error(ErrorKind::MissingRequiredArgument, message)
        .exit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_shown_for_pack_and_unpack() {
        let arg = Arg::try_parse_from(["fwpkg_tool", "fw.bin", "data", "out.pkg"]).unwrap();
        assert!(arg.shows_counter());
        let arg = Arg::try_parse_from(["fwpkg_tool", "unpack", "out.pkg", "dir"]).unwrap();
        assert!(arg.shows_counter());
    }

    #[test]
    fn test_counter_hidden_for_info() {
        let arg = Arg::try_parse_from(["fwpkg_tool", "info", "out.pkg", "--json"]).unwrap();
        assert!(!arg.shows_counter());
    }
}
