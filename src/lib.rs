//! Gooo project initializer
//!
//! This library provides the download-and-unpack pipeline behind the `gooo-init` CLI.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;
