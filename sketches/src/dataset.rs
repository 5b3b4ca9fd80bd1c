//! Dataset of paired sketch images and alpha masks.
//!
//! The dataset root is expected to look like:
//!
//! ```text
//! <root>/
//!   unprocessed/<stem>.jpg   RGB sketches
//!   processed/<stem>.png     RGBA masks, alpha encodes the foreground
//!   splits/<split>.txt       optional stem list for the split
//! ```
//!
//! Masks are enumerated once when the dataset is built. Every access decodes
//! the pair from disk again; nothing is cached and no file handle outlives
//! the access that opened it.

use std::{
    fs,
    path::{Path, PathBuf},
};

use burn::data::dataset::Dataset;
use image::{GrayImage, RgbImage};

use crate::{
    config::SketchesConfig,
    error::{DatasetError, DatasetResult},
    mask::alpha_mask,
    pairing::{is_mask_file_name, PairingMode, SketchPair},
    split::Split,
    transform::SketchTransform,
};

/// Subdirectory holding the RGB source images.
pub const IMAGES_DIR: &str = "unprocessed";
/// Subdirectory holding the RGBA masks.
pub const MASKS_DIR: &str = "processed";

/// One decoded sample.
///
/// Without a transform `image` is the sketch decoded as 8-bit RGB and `mask`
/// holds only 0 and 255.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchItem {
    pub image: RgbImage,
    pub mask: GrayImage,
}

impl SketchItem {
    /// `(height, width)` of the image.
    pub fn shape(&self) -> (usize, usize) {
        (self.image.height() as usize, self.image.width() as usize)
    }
}

/// Sketch/mask pairs discovered under a dataset root.
#[derive(Debug)]
pub struct SketchesDataset {
    root: PathBuf,
    images_folder: PathBuf,
    masks_folder: PathBuf,
    split: Split,
    pairs: Vec<SketchPair>,
    transform: SketchTransform,
}

impl SketchesDataset {
    /// Create a dataset over `root` with lazy pairing and filesystem order.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory containing `unprocessed/` and `processed/`
    /// * `split` - Dataset split; only filters when a manifest exists
    /// * `transform` - What to do with each decoded pair
    pub fn new(
        root: impl AsRef<Path>,
        split: Split,
        transform: SketchTransform,
    ) -> DatasetResult<Self> {
        let config = SketchesConfig::new(root.as_ref().to_path_buf()).with_split(split);
        Self::from_config(&config, transform)
    }

    /// Create a dataset as described by `config`.
    pub fn from_config(
        config: &SketchesConfig,
        transform: SketchTransform,
    ) -> DatasetResult<Self> {
        let root = config.root.clone();
        let images_folder = root.join(IMAGES_DIR);
        let masks_folder = root.join(MASKS_DIR);

        let mut pairs = Self::collect_pairs(&images_folder, &masks_folder)?;

        if let Some(manifest) = config.split.load_manifest(&root)? {
            let before = pairs.len();
            pairs.retain(|pair| manifest.contains(&pair.stem));
            tracing::debug!(
                split = %config.split,
                listed = manifest.len(),
                kept = pairs.len(),
                dropped = before - pairs.len(),
                "applied split manifest"
            );
            if pairs.len() < manifest.len() {
                tracing::warn!(
                    split = %config.split,
                    missing = manifest.len() - pairs.len(),
                    "split manifest lists stems without a mask"
                );
            }
        }

        if config.pairing == PairingMode::Eager {
            if !images_folder.is_dir() && !pairs.is_empty() {
                return Err(DatasetError::ImageDirectoryNotFound {
                    path: images_folder,
                });
            }
            for pair in &pairs {
                pair.check()?;
            }
        }

        if config.sort {
            pairs.sort_by(|a, b| a.stem.cmp(&b.stem));
        }

        tracing::info!(
            count = pairs.len(),
            split = %config.split,
            folder = %masks_folder.display(),
            "found sketch/mask pairs"
        );

        Ok(Self {
            root,
            images_folder,
            masks_folder,
            split: config.split,
            pairs,
            transform,
        })
    }

    /// Enumerate `*.png` in the mask folder and derive each image path.
    fn collect_pairs(
        images_folder: &Path,
        masks_folder: &Path,
    ) -> DatasetResult<Vec<SketchPair>> {
        if !masks_folder.is_dir() {
            return Err(DatasetError::MaskDirectoryNotFound {
                path: masks_folder.to_path_buf(),
            });
        }

        let read_error = |source| DatasetError::DirectoryReadFailed {
            path: masks_folder.to_path_buf(),
            source,
        };

        let mut pairs = Vec::new();
        for entry in fs::read_dir(masks_folder).map_err(read_error)? {
            let mask_path = entry.map_err(read_error)?.path();
            if !mask_path.is_file() || !is_mask_file_name(&mask_path) {
                continue;
            }
            pairs.push(SketchPair::for_mask(images_folder, mask_path)?);
        }

        tracing::debug!(
            count = pairs.len(),
            folder = %masks_folder.display(),
            "enumerated masks"
        );
        Ok(pairs)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn images_folder(&self) -> &Path {
        &self.images_folder
    }

    pub fn masks_folder(&self) -> &Path {
        &self.masks_folder
    }

    pub const fn split(&self) -> Split {
        self.split
    }

    pub const fn transform(&self) -> &SketchTransform {
        &self.transform
    }

    /// The pairs in index order.
    pub fn pairs(&self) -> &[SketchPair] {
        &self.pairs
    }

    /// Load the sample at `index`, reporting why it could not be loaded.
    pub fn try_get(&self, index: usize) -> DatasetResult<SketchItem> {
        let pair = self
            .pairs
            .get(index)
            .ok_or(DatasetError::IndexOutOfBounds {
                index,
                len: self.pairs.len(),
            })?;

        let (image, mask) = Self::load_pair(pair)?;
        let (image, mask) = self.transform.apply(image, mask);

        Ok(SketchItem { image, mask })
    }

    /// Decode the RGB image and the binary mask of `pair`.
    pub fn load_pair(pair: &SketchPair) -> DatasetResult<(RgbImage, GrayImage)> {
        let image = image::open(&pair.image)
            .map_err(|source| DatasetError::ImageOpenFailed {
                path: pair.image.clone(),
                source,
            })?
            .into_rgb8();

        let mask_source =
            image::open(&pair.mask).map_err(|source| DatasetError::ImageOpenFailed {
                path: pair.mask.clone(),
                source,
            })?;
        let mask = alpha_mask(&mask_source).ok_or_else(|| DatasetError::MissingAlphaChannel {
            path: pair.mask.clone(),
        })?;

        Ok((image, mask))
    }
}

/// Burn reads `None` as the end of the dataset, so only indices past the
/// end map to `None`. A pair that fails to load panics with its
/// [`DatasetError`] instead of silently cutting the epoch short; use
/// [`SketchesDataset::try_get`] to handle the error, or
/// [`PairingMode::Eager`] to catch missing images before training starts.
impl Dataset<SketchItem> for SketchesDataset {
    fn get(&self, index: usize) -> Option<SketchItem> {
        if index >= self.pairs.len() {
            return None;
        }
        match self.try_get(index) {
            Ok(item) => Some(item),
            Err(error) => {
                tracing::error!(index, %error, "failed to load sketch pair");
                panic!("Failed to load sketch pair {index}: {error}");
            }
        }
    }

    fn len(&self) -> usize {
        self.pairs.len()
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, Rgba, RgbaImage};

    use super::*;
    use crate::transform::Resize;

    fn write_pair(root: &Path, stem: &str, width: u32, height: u32) {
        fs::create_dir_all(root.join(IMAGES_DIR)).unwrap();
        fs::create_dir_all(root.join(MASKS_DIR)).unwrap();
        RgbImage::from_pixel(width, height, Rgb([200, 100, 50]))
            .save(root.join(IMAGES_DIR).join(format!("{stem}.jpg")))
            .unwrap();
        RgbaImage::from_fn(width, height, |x, _| {
            Rgba([0, 0, 0, if x < width / 2 { 255 } else { 0 }])
        })
        .save(root.join(MASKS_DIR).join(format!("{stem}.png")))
        .unwrap();
    }

    #[test]
    fn missing_mask_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        match SketchesDataset::new(dir.path(), Split::Train, SketchTransform::None) {
            Err(DatasetError::MaskDirectoryNotFound { path }) => {
                assert_eq!(path, dir.path().join(MASKS_DIR));
            }
            Err(other) => panic!("Expected MaskDirectoryNotFound, got {other:?}"),
            Ok(_) => panic!("Expected MaskDirectoryNotFound, got a dataset"),
        }
    }

    #[test]
    fn empty_mask_directory_gives_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(MASKS_DIR)).unwrap();

        let dataset =
            SketchesDataset::new(dir.path(), Split::Train, SketchTransform::None).unwrap();
        assert_eq!(dataset.len(), 0);
        assert!(dataset.get(0).is_none());
    }

    #[test]
    fn folders_derive_from_root() {
        let dir = tempfile::tempdir().unwrap();
        write_pair(dir.path(), "a", 4, 4);

        let dataset =
            SketchesDataset::new(dir.path(), Split::Test, SketchTransform::None).unwrap();
        assert_eq!(dataset.root(), dir.path());
        assert_eq!(dataset.images_folder(), dir.path().join("unprocessed"));
        assert_eq!(dataset.masks_folder(), dir.path().join("processed"));
        assert_eq!(dataset.split(), Split::Test);
        assert!(dataset.transform().is_none());
    }

    #[test]
    fn non_mask_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_pair(dir.path(), "a", 4, 4);
        let masks = dir.path().join(MASKS_DIR);
        fs::write(masks.join("notes.txt"), "not a mask").unwrap();
        fs::write(masks.join(".hidden.png"), "").unwrap();
        fs::create_dir(masks.join("nested.png")).unwrap();

        let dataset =
            SketchesDataset::new(dir.path(), Split::Train, SketchTransform::None).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.pairs()[0].stem, "a");
    }

    #[test]
    fn sort_orders_pairs_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        for stem in ["delta", "alpha", "charlie", "bravo"] {
            write_pair(dir.path(), stem, 2, 2);
        }
        let config = SketchesConfig::new(dir.path().to_path_buf()).with_sort(true);

        let dataset = SketchesDataset::from_config(&config, SketchTransform::None).unwrap();
        let stems: Vec<&str> = dataset.pairs().iter().map(|p| p.stem.as_str()).collect();
        assert_eq!(stems, vec!["alpha", "bravo", "charlie", "delta"]);
    }

    #[test]
    fn transform_output_is_returned_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        write_pair(dir.path(), "a", 10, 6);

        let transform = SketchTransform::paired(Resize::square(8));
        let dataset = SketchesDataset::new(dir.path(), Split::Train, transform).unwrap();
        let raw = SketchesDataset::load_pair(&dataset.pairs()[0]).unwrap();
        let expected = Resize::square(8);
        let (image, mask) = crate::transform::PairTransform::apply(&expected, raw.0, raw.1);

        let item = dataset.try_get(0).unwrap();
        assert_eq!(item.image, image);
        assert_eq!(item.mask, mask);
        assert_eq!(item.shape(), (8, 8));
    }

    #[test]
    fn try_get_reports_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        write_pair(dir.path(), "a", 4, 4);
        fs::remove_file(dir.path().join(IMAGES_DIR).join("a.jpg")).unwrap();

        let dataset =
            SketchesDataset::new(dir.path(), Split::Train, SketchTransform::None).unwrap();
        assert!(dataset.try_get(0).unwrap_err().is_not_found());
        assert!(dataset.get(1).is_none());
    }

    #[test]
    #[should_panic(expected = "Failed to load sketch pair 0")]
    fn get_panics_on_unloadable_pair_in_range() {
        let dir = tempfile::tempdir().unwrap();
        write_pair(dir.path(), "a", 4, 4);
        fs::remove_file(dir.path().join(IMAGES_DIR).join("a.jpg")).unwrap();

        let dataset =
            SketchesDataset::new(dir.path(), Split::Train, SketchTransform::None).unwrap();
        let _ = dataset.get(0);
    }
}
