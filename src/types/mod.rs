//! Core type definitions for bundle-copy

mod error;
mod output;
mod target;

pub use error::CopyError;
pub use output::{BuildContext, BundleOutput};
pub use target::{CopyPair, TargetSpec};
