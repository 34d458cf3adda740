//! Input/output operations, configuration and error handling

/// Command-line argument parsing and command execution
pub mod cli;
/// Sentinel names, constants and defaults
pub mod configuration;
/// JSON documents for rules, geometry and results
pub mod document;
/// Error types shared by the whole crate
pub mod error;
/// Progress display for discretization
pub mod progress;
