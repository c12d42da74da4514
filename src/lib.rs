//! # bundle-copy - Copy files and folders into a bundle's output
//!
//! A build plugin that runs once the host bundler has written its output and
//! copies declared targets alongside it.
//!
//! Targets are either a list of sources, each copied under its own name into
//! the output directory, or a source → destination mapping. Directories are
//! copied recursively with their structure intact. Pairs run in declaration
//! order and the first failure aborts the step.
//!
//! ```no_run
//! use bundle_copy::{BuildContext, BuildPlugin, BundleOutput, Config, CopyPlugin, TargetSpec};
//!
//! # async fn build() -> Result<(), bundle_copy::CopyError> {
//! let plugin = CopyPlugin::new(Config {
//!     targets: TargetSpec::list(["src/assets/favicon.ico", "src/assets/fonts"]),
//!     ..Config::default()
//! });
//! let ctx = BuildContext::in_current_dir(BundleOutput::File("dist/index.js".into()))?;
//! plugin.on_outputs_written(&ctx).await?;
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod commands;
pub mod config;
pub mod executor;
pub mod logging;
pub mod plugin;
pub mod resolver;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use executor::ExecutionStats;
pub use plugin::{BuildPlugin, CopyPlugin};
pub use types::{BuildContext, BundleOutput, CopyError, CopyPair, TargetSpec};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
