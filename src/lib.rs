//! Generate liner-shipping routing instances from LINER-LIB style reference tables.
//!
//! The crate reads a port registry, a demand table, a fleet roster and a distance table, derives
//! every quantity the routing solver needs (demand, handling times, time windows, transfer
//! limits, penalties) and writes a single JSON instance document.
use std::path::PathBuf;

pub mod cli;
pub mod distance;
pub mod generator;
pub mod id;
pub mod input;
pub mod log;
pub mod options;
pub mod output;
pub mod port;
pub mod request;
pub mod settings;
pub mod solver_params;
pub mod vessel_class;

#[cfg(test)]
mod fixture;

/// URL of the issue tracker, shown when the program panics
pub const ISSUES_URL: &str = concat!(env!("CARGO_PKG_REPOSITORY"), "/issues");

/// Get the directory in which the program's configuration files are stored.
///
/// Falls back to the current directory if the platform config directory cannot be determined.
pub fn get_linergen_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        return PathBuf::from(".");
    };

    config_dir.push("linergen");
    config_dir
}
