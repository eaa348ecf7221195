//! Subcommand implementations

pub mod config;
pub mod digest;
pub mod doctor;
pub mod run;
