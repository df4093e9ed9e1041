//! A Rust library for building and inspecting ESP firmware update packages.
//!
//! A package bundles a firmware binary with the files of a filesystem image
//! (LittleFS or SPIFFS) behind a fixed 26-byte header. See [`package`] for the
//! binary layout.
pub mod error;
pub mod ext;
pub mod package;
pub mod types;
pub mod utils;

lazy_static::lazy_static! {
    /// Tally of the current run, printed by the command line tool on exit.
    pub static ref COUNTER: utils::counter::Counter = utils::counter::Counter::new();
}
