//! Configuration management

use crate::types::{BundleOutput, CopyError, TargetSpec};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Plugin configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Files and folders to copy
    pub targets: TargetSpec,

    /// Prefix for every computed destination
    #[serde(alias = "outputFolder")]
    pub output_folder: Option<PathBuf>,

    /// Print each completed copy
    pub verbose: bool,
}

impl Config {
    /// Parse a TOML configuration document
    pub fn from_toml_str(content: &str) -> Result<Self, CopyError> {
        toml::from_str(content)
            .map_err(|e| CopyError::Config(format!("Invalid TOML config: {}", e)))
    }

    /// Parse a JSON configuration document
    pub fn from_json_str(content: &str) -> Result<Self, CopyError> {
        serde_json::from_str(content)
            .map_err(|e| CopyError::Config(format!("Invalid JSON config: {}", e)))
    }

    /// Load a configuration file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self, CopyError> {
        let content = fs::read_to_string(path).map_err(|e| {
            CopyError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(CopyError::Config(format!(
                "Unsupported config format: {} (expected .toml or .json)",
                path.display()
            ))),
        }
    }
}

/// Command-line host for running the copy plugin outside a bundler
#[derive(Debug, Parser)]
#[command(name = "bundle-copy", version, about)]
pub struct Cli {
    /// Files or folders to copy into the output directory
    #[arg(value_name = "TARGETS", conflicts_with = "map")]
    pub targets: Vec<PathBuf>,

    /// Explicit SRC=DEST mapping (repeatable)
    #[arg(long, value_name = "SRC=DEST", value_parser = parse_mapping)]
    pub map: Vec<(PathBuf, PathBuf)>,

    /// Configuration file (.toml or .json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bundle output file; its directory receives list targets
    #[arg(long, value_name = "FILE", conflicts_with = "output_dir")]
    pub output_file: Option<PathBuf>,

    /// Bundle output directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Prefix applied to every destination
    #[arg(long, value_name = "DIR")]
    pub output_folder: Option<PathBuf>,

    /// List every copied file and folder
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Resolve relative paths against this directory
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

impl Cli {
    /// Host output location, defaulting to a `dist` directory
    pub fn bundle_output(&self) -> BundleOutput {
        match (&self.output_file, &self.output_dir) {
            (Some(file), _) => BundleOutput::File(file.clone()),
            (None, Some(dir)) => BundleOutput::Dir(dir.clone()),
            (None, None) => BundleOutput::Dir(PathBuf::from("dist")),
        }
    }
}

fn parse_mapping(raw: &str) -> Result<(PathBuf, PathBuf), String> {
    match raw.split_once('=') {
        Some((source, destination)) if !source.is_empty() && !destination.is_empty() => {
            Ok((PathBuf::from(source), PathBuf::from(destination)))
        }
        _ => Err(format!("expected SRC=DEST, got '{}'", raw)),
    }
}

impl TryFrom<&Cli> for Config {
    type Error = CopyError;

    /// Merge the optional config file with command-line overrides
    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let mut config = match &cli.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if !cli.map.is_empty() {
            config.targets = TargetSpec::Map(cli.map.clone());
        } else if !cli.targets.is_empty() {
            config.targets = TargetSpec::List(cli.targets.clone());
        }

        if let TargetSpec::Map(entries) = &config.targets {
            for (idx, (source, _)) in entries.iter().enumerate() {
                if entries[..idx].iter().any(|(seen, _)| seen == source) {
                    return Err(CopyError::Config(format!(
                        "duplicate target '{}'",
                        source.display()
                    )));
                }
            }
        }

        if cli.output_folder.is_some() {
            config.output_folder = cli.output_folder.clone();
        }
        config.verbose |= cli.verbose;

        Ok(config)
    }
}
