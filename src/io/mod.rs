/// Command-line parsing and top-level dispatch
pub mod cli;
/// Defaults, tool parameters, and output names
pub mod configuration;
/// Error types
pub mod error;
/// Run log and console tracing
pub mod logging;
/// Stage spinner
pub mod progress;
/// Output and scratch directories
pub mod workdir;
