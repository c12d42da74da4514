//! Target normalization - declared targets to ordered copy pairs

use crate::types::{CopyError, CopyPair, TargetSpec};
use std::path::Path;

/// Resolve declared targets into the ordered list of copy pairs
///
/// List-form sources land under `output_folder` (or `bundle_dir` when unset)
/// with their own file name. Map-form destinations are taken verbatim, and
/// prefixed with `output_folder` when set.
///
/// Pure: the filesystem is not consulted, so missing sources are only
/// detected once the pair is executed.
///
/// # Errors
/// * `CopyError::InvalidTarget` - a list-form source has no final path
///   segment (`""`, `/`, `..`) to name the copy after
pub fn normalize_targets(
    targets: &TargetSpec,
    output_folder: Option<&Path>,
    bundle_dir: &Path,
) -> Result<Vec<CopyPair>, CopyError> {
    let pairs = match targets {
        TargetSpec::List(sources) => {
            let base = output_folder.unwrap_or(bundle_dir);
            sources
                .iter()
                .map(|source| -> Result<CopyPair, CopyError> {
                    let name = source.file_name().ok_or_else(|| CopyError::InvalidTarget {
                        target: source.clone(),
                    })?;
                    Ok(CopyPair::new(source.clone(), base.join(name)))
                })
                .collect::<Result<Vec<_>, _>>()?
        }
        TargetSpec::Map(entries) => entries
            .iter()
            .map(|(source, destination)| {
                let destination = match output_folder {
                    Some(folder) => folder.join(destination),
                    None => destination.clone(),
                };
                CopyPair::new(source.clone(), destination)
            })
            .collect(),
    };

    tracing::debug!(
        targets = targets.len(),
        pairs = pairs.len(),
        "normalized copy targets"
    );

    Ok(pairs)
}
