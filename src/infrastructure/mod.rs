//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where BinSmart keeps its log file, image previews and
//! configuration file.

pub mod paths;

pub use paths::{default_config_file, expand_tilde, get_config_dir, get_data_dir};
