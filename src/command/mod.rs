//! External command construction and execution

/// Archive extraction
pub mod archive;
/// Command description and declared outputs
pub mod builder;
/// Process execution seam
pub mod executor;
/// Git submodule maintenance
pub mod submodule;

pub use builder::{Command, Output, OutputKind};
pub use executor::{Executor, SystemExecutor};
