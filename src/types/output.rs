//! Host-side build information handed to the plugin hook

use std::path::{Path, PathBuf};

/// Where the host bundler writes its own output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleOutput {
    /// A single bundle file
    File(PathBuf),

    /// One or more chunks written into a shared directory
    Dir(PathBuf),
}

impl BundleOutput {
    /// Directory that receives the bundle
    ///
    /// An empty path means the working directory.
    pub fn output_dir(&self) -> &Path {
        match self {
            BundleOutput::File(file) => file.parent().unwrap_or_else(|| Path::new("")),
            BundleOutput::Dir(dir) => dir,
        }
    }
}

/// Context the host passes to `on_outputs_written`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Host output location
    pub output: BundleOutput,

    /// Directory relative paths are resolved against
    pub working_dir: PathBuf,
}

impl BuildContext {
    pub fn new(output: BundleOutput, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            output,
            working_dir: working_dir.into(),
        }
    }

    /// Context rooted at the process's current directory
    pub fn in_current_dir(output: BundleOutput) -> std::io::Result<Self> {
        Ok(Self::new(output, std::env::current_dir()?))
    }
}
