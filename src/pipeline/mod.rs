//! Segmentation pipeline built on the tool wrappers
//!
//! A run resolves a [`SegmentationConfig`], then drives the external tools
//! through a [`Context`] so every command is logged and every output checked.

/// Neonatal atlas discovery and extraction
pub mod atlas;
/// Bias field correction with FSL or N4
pub mod biascorr;
/// Run settings and their defaults
pub mod config;
/// Executor, log, and progress shared by all stages
pub mod context;
/// Standard and neonatal segmentation
pub mod segmentation;

pub use atlas::NeonateAtlas;
pub use config::{BiasCorrection, SegmentationConfig};
pub use context::Context;
pub use segmentation::{NeonateTissues, Segmentation, SegmentationOutputs, segment};
