//! Extensions for other crates.
pub mod io;
pub mod path;
