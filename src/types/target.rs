//! TargetSpec - Declared copy targets, and the CopyPair they resolve to

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::path::{Path, PathBuf};

/// User-declared copy targets
///
/// Exactly one shape is active per configuration. Map entries keep their
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// Source paths copied under their own name into the output directory
    List(Vec<PathBuf>),

    /// Source paths copied to an explicit destination each
    Map(Vec<(PathBuf, PathBuf)>),
}

impl Default for TargetSpec {
    fn default() -> Self {
        TargetSpec::List(Vec::new())
    }
}

impl TargetSpec {
    /// Build a list-form spec
    pub fn list<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        TargetSpec::List(sources.into_iter().map(Into::into).collect())
    }

    /// Build a map-form spec, keeping iteration order
    pub fn map<I, S, D>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, D)>,
        S: Into<PathBuf>,
        D: Into<PathBuf>,
    {
        TargetSpec::Map(
            entries
                .into_iter()
                .map(|(source, destination)| (source.into(), destination.into()))
                .collect(),
        )
    }

    /// Number of declared targets
    pub fn len(&self) -> usize {
        match self {
            TargetSpec::List(sources) => sources.len(),
            TargetSpec::Map(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'de> Deserialize<'de> for TargetSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TargetSpecVisitor)
    }
}

struct TargetSpecVisitor;

impl<'de> Visitor<'de> for TargetSpecVisitor {
    type Value = TargetSpec;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array of source paths or a table of source = destination")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut sources = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(source) = seq.next_element::<PathBuf>()? {
            sources.push(source);
        }
        Ok(TargetSpec::List(sources))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries: Vec<(PathBuf, PathBuf)> = Vec::new();
        while let Some((source, destination)) = map.next_entry::<PathBuf, PathBuf>()? {
            if entries.iter().any(|(existing, _)| *existing == source) {
                return Err(de::Error::custom(format!(
                    "duplicate target '{}'",
                    source.display()
                )));
            }
            entries.push((source, destination));
        }
        Ok(TargetSpec::Map(entries))
    }

    // JSON `null` means "no targets"
    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(TargetSpec::default())
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(TargetSpec::default())
    }
}

/// A resolved unit of work: copy `source` to `destination`
///
/// Both paths keep the spelling the user declared; they are resolved against
/// the build's working directory only when the copy runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPair {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl CopyPair {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Source path resolved against `working_dir`
    pub fn resolved_source(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(&self.source)
    }

    /// Destination path resolved against `working_dir`
    pub fn resolved_destination(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(&self.destination)
    }
}

impl fmt::Display for CopyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.source.display(),
            self.destination.display()
        )
    }
}
