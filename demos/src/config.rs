//! Configuration for the demo binaries.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sketches_burn::{PairingMode, SketchesConfig, Split};

/// Configuration for dataset testing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetTestConfig {
    /// Path to dataset.
    pub dataset_path: PathBuf,
    /// Split to load.
    pub split: Split,
    /// Check that every mask has an image before loading anything.
    pub eager: bool,
    /// Number of samples to inspect.
    pub num_samples: usize,
    /// Square size samples are resized to before batching.
    pub resize: u32,
    /// Batch size for loader testing.
    pub batch_size: usize,
    /// Number of loader workers.
    pub num_workers: usize,
    /// Where to write decoded samples for visual inspection.
    pub output_dir: Option<PathBuf>,
}

impl Default for DatasetTestConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("datasets/sketches"),
            split: Split::Train,
            eager: false,
            num_samples: 10,
            resize: 512,
            batch_size: 4,
            num_workers: 2,
            output_dir: None,
        }
    }
}

impl DatasetTestConfig {
    /// The dataset configuration this test run describes.
    pub fn dataset_config(&self) -> SketchesConfig {
        let pairing = if self.eager {
            PairingMode::Eager
        } else {
            PairingMode::Lazy
        };
        SketchesConfig::new(self.dataset_path.clone())
            .with_split(self.split)
            .with_pairing(pairing)
            .with_sort(true)
    }
}
