//! Paired sketch/mask dataset for training segmentation models with Burn.
//!
//! A dataset root holds RGB sketches in `unprocessed/` and RGBA masks in
//! `processed/`. Each index yields the sketch and a binary mask taken from the
//! alpha channel of the matching PNG:
//!
//! ```no_run
//! use sketches_burn::{Resize, SketchTransform, SketchesDataset, Split};
//!
//! let dataset = SketchesDataset::new(
//!     "datasets/sketches",
//!     Split::Train,
//!     SketchTransform::paired(Resize::square(512)),
//! )?;
//! let item = dataset.try_get(0)?;
//! assert_eq!(item.mask.dimensions(), (512, 512));
//! # Ok::<(), sketches_burn::DatasetError>(())
//! ```

pub mod augmentation;
pub mod batcher;
pub mod config;
pub mod dataset;
pub mod error;
pub mod mask;
pub mod pairing;
pub mod split;
pub mod transform;

// Re-export commonly used types
pub use augmentation::{AugmentationConfig, AugmentationMethod, ImageAugmentor};
pub use batcher::{SketchBatch, SketchBatcher};
pub use config::SketchesConfig;
pub use dataset::{SketchItem, SketchesDataset, IMAGES_DIR, MASKS_DIR};
pub use error::{DatasetError, DatasetResult};
pub use pairing::{PairingMode, SketchPair};
pub use split::{Split, SplitManifest};
pub use transform::{Compose, PairTransform, Resize, SketchTransform};
