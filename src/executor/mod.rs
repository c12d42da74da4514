//! Executor module for copy pairs

pub mod copy;
pub mod tree;

use crate::types::{CopyError, CopyPair};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

pub use copy::copy_file_atomic;
pub use tree::copy_dir_recursive;

/// What a single pair wrote to disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairOutcome {
    pub files_copied: usize,
    pub dirs_copied: usize,
    pub symlinks_copied: usize,
    pub bytes_copied: u64,
}

/// Execution statistics for one hook invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Number of pairs in the input list.
    pub total_pairs: usize,
    /// Number of pairs copied completely.
    pub completed_pairs: usize,
    /// Number of failed pairs (0 or 1, execution stops at the first).
    pub failed_pairs: usize,
    pub files_copied: usize,
    pub dirs_copied: usize,
    pub symlinks_copied: usize,
    pub bytes_copied: u64,
}

impl ExecutionStats {
    fn record(&mut self, outcome: &PairOutcome) {
        self.completed_pairs += 1;
        self.files_copied += outcome.files_copied;
        self.dirs_copied += outcome.dirs_copied;
        self.symlinks_copied += outcome.symlinks_copied;
        self.bytes_copied += outcome.bytes_copied;
    }
}

/// Events emitted while executing pairs.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    /// Pair copy started.
    PairStart {
        index: usize,
        total: usize,
        pair: CopyPair,
    },
    /// Pair copy finished.
    PairSuccess {
        index: usize,
        total: usize,
        pair: CopyPair,
        outcome: PairOutcome,
    },
    /// Pair copy failed; no further pairs run.
    PairError {
        index: usize,
        total: usize,
        pair: CopyPair,
        message: String,
    },
    /// Execution ended (with or without error).
    Complete { stats: ExecutionStats },
}

/// Optional callback used to receive execution events.
pub type ExecutionCallback<'a> = dyn Fn(&ExecutionEvent) + Send + Sync + 'a;

/// Execute copy pairs in order, stopping at the first failure
///
/// Each pair's filesystem work runs on the blocking pool and is awaited
/// before the next pair starts. Pairs copied before a failure stay on disk.
pub async fn execute_pairs(
    pairs: &[CopyPair],
    working_dir: &Path,
    on_event: Option<&ExecutionCallback<'_>>,
) -> Result<ExecutionStats, CopyError> {
    let total = pairs.len();
    let mut stats = ExecutionStats {
        total_pairs: total,
        ..Default::default()
    };

    for (idx, pair) in pairs.iter().enumerate() {
        let index = idx + 1;
        emit_event(
            on_event,
            ExecutionEvent::PairStart {
                index,
                total,
                pair: pair.clone(),
            },
        );
        tracing::debug!(
            index,
            total,
            source = %pair.source.display(),
            destination = %pair.destination.display(),
            "copying target"
        );

        match copy_pair_blocking(pair, working_dir).await {
            Ok(outcome) => {
                stats.record(&outcome);
                emit_event(
                    on_event,
                    ExecutionEvent::PairSuccess {
                        index,
                        total,
                        pair: pair.clone(),
                        outcome,
                    },
                );
            }
            Err(err) => {
                stats.failed_pairs += 1;
                tracing::debug!(
                    index,
                    total,
                    source = %pair.source.display(),
                    error = %err,
                    "copy failed, aborting remaining targets"
                );
                emit_event(
                    on_event,
                    ExecutionEvent::PairError {
                        index,
                        total,
                        pair: pair.clone(),
                        message: err.to_string(),
                    },
                );
                emit_event(on_event, ExecutionEvent::Complete { stats });
                return Err(err);
            }
        }
    }

    emit_event(
        on_event,
        ExecutionEvent::Complete {
            stats: stats.clone(),
        },
    );

    Ok(stats)
}

async fn copy_pair_blocking(pair: &CopyPair, working_dir: &Path) -> Result<PairOutcome, CopyError> {
    let pair = pair.clone();
    let working_dir = working_dir.to_path_buf();
    tokio::task::spawn_blocking(move || copy_pair(&pair, &working_dir))
        .await
        .map_err(|e| CopyError::TaskFailed(e.to_string()))?
}

/// Copy one pair, resolving its paths against `working_dir`
///
/// # Errors
/// * `CopyError::NotFound` - the source does not exist; carries the declared path
/// * `CopyError::SamePath` - source and destination are the same path
/// * `CopyError::IntoItself` - a directory would be copied below itself
/// * `CopyError::Io` - any other filesystem failure
pub fn copy_pair(pair: &CopyPair, working_dir: &Path) -> Result<PairOutcome, CopyError> {
    let source = pair.resolved_source(working_dir);
    let destination = pair.resolved_destination(working_dir);

    let metadata = match fs::metadata(&source) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CopyError::NotFound {
                path: pair.source.clone(),
            })
        }
        Err(e) => return Err(CopyError::Io(e)),
    };

    let normalized_source = normalize_lexically(&source);
    let normalized_destination = normalize_lexically(&destination);
    if normalized_source == normalized_destination {
        return Err(CopyError::SamePath {
            path: pair.source.clone(),
        });
    }

    if metadata.is_dir() {
        if normalized_destination.starts_with(&normalized_source) {
            return Err(CopyError::IntoItself {
                src: pair.source.clone(),
                dest: pair.destination.clone(),
            });
        }
        copy_dir_recursive(&source, &destination)
    } else {
        let bytes = copy_file_atomic(&source, &destination)?;
        Ok(PairOutcome {
            files_copied: 1,
            bytes_copied: bytes,
            ..Default::default()
        })
    }
}

/// Resolve `.` and `..` components without touching the filesystem
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn emit_event(on_event: Option<&ExecutionCallback<'_>>, event: ExecutionEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}
