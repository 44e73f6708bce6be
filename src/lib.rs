//! Library crate root for the remote desktop launcher.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod config;
pub mod prompt;
pub mod workflow;
