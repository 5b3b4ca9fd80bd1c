//! Dataset splits and their optional manifests.
//!
//! A split only changes which pairs are visible when a manifest exists at
//! `<root>/splits/<split>.txt`. The manifest lists one stem per line; blank
//! lines and lines starting with `#` are skipped. Without a manifest every
//! mask in `processed` belongs to every split.

use std::{
    collections::HashSet,
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, DatasetResult};

/// Directory under the dataset root holding split manifests.
pub const SPLITS_DIR: &str = "splits";

/// The split a dataset handle is built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    #[default]
    Train,
    Val,
    Test,
}

impl Split {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Val => "val",
            Self::Test => "test",
        }
    }

    /// Location of this split's manifest under `root`.
    pub fn manifest_path(self, root: &Path) -> PathBuf {
        root.join(SPLITS_DIR).join(format!("{}.txt", self.as_str()))
    }

    /// Read the manifest for this split, if there is one.
    pub fn load_manifest(self, root: &Path) -> DatasetResult<Option<SplitManifest>> {
        let path = self.manifest_path(root);
        if !path.is_file() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .map_err(|source| DatasetError::ManifestReadFailed { path, source })?;
        Ok(Some(SplitManifest::parse(&contents)))
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "train" => Ok(Self::Train),
            "val" | "valid" | "validation" => Ok(Self::Val),
            "test" => Ok(Self::Test),
            _ => Err(DatasetError::UnknownSplit {
                label: s.to_owned(),
            }),
        }
    }
}

/// The set of stems a split manifest admits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitManifest {
    stems: HashSet<String>,
}

impl SplitManifest {
    pub fn parse(contents: &str) -> Self {
        let stems = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect();
        Self { stems }
    }

    pub fn contains(&self, stem: &str) -> bool {
        self.stems.contains(stem)
    }

    pub(crate) fn len(&self) -> usize {
        self.stems.len()
    }
}
