//! Pairing of masks with their source images by filename stem.

use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, DatasetResult};

/// Extension of the source images.
pub const IMAGE_EXTENSION: &str = "jpg";
/// Extension of the alpha masks.
pub const MASK_EXTENSION: &str = "png";

/// When the existence of the image half of each pair is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairingMode {
    /// Trust the layout; a missing image surfaces when its index is read.
    #[default]
    Lazy,
    /// Check every image while building the dataset.
    Eager,
}

/// One image/mask pair sharing a stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SketchPair {
    /// Shared filename stem, lossily decoded if it is not valid UTF-8.
    pub stem: String,
    /// Expected path of the RGB image.
    pub image: PathBuf,
    /// Path of the RGBA mask.
    pub mask: PathBuf,
}

impl SketchPair {
    /// Build the pair for `mask`, expecting its image under `images_folder`.
    pub fn for_mask(images_folder: &Path, mask: PathBuf) -> DatasetResult<Self> {
        let raw_stem = file_stem(&mask)?;
        let mut image_name = OsString::from(raw_stem);
        image_name.push(".");
        image_name.push(IMAGE_EXTENSION);
        Ok(Self {
            stem: raw_stem.to_string_lossy().into_owned(),
            image: images_folder.join(image_name),
            mask,
        })
    }

    /// Fail with [`DatasetError::MissingImage`] if the image file is absent.
    pub fn check(&self) -> DatasetResult<()> {
        if self.image.is_file() {
            Ok(())
        } else {
            Err(DatasetError::MissingImage {
                image: self.image.clone(),
                mask: self.mask.clone(),
            })
        }
    }
}

/// The filename with its final extension removed.
///
/// Only the last suffix is stripped, so `plate.v2.png` has the stem
/// `plate.v2` and pairs with `plate.v2.jpg`. Names need not be UTF-8.
pub fn file_stem(path: &Path) -> DatasetResult<&OsStr> {
    path.file_stem().ok_or_else(|| DatasetError::NoFileStem {
        path: path.to_path_buf(),
    })
}

/// Whether `path` names a mask file: `*.png`, case-sensitive, not hidden.
pub fn is_mask_file_name(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    name.as_encoded_bytes().first() != Some(&b'.')
        && path.extension() == Some(OsStr::new(MASK_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_strips_only_the_last_extension() {
        assert_eq!(file_stem(Path::new("processed/cat.png")).unwrap(), "cat");
        assert_eq!(
            file_stem(Path::new("processed/plate.v2.png")).unwrap(),
            "plate.v2"
        );
    }

    #[test]
    fn pair_points_at_jpeg_with_same_stem() {
        let pair =
            SketchPair::for_mask(Path::new("root/unprocessed"), "root/processed/a.b.png".into())
                .unwrap();
        assert_eq!(pair.stem, "a.b");
        assert_eq!(pair.image, Path::new("root/unprocessed/a.b.jpg"));
        assert_eq!(pair.mask, Path::new("root/processed/a.b.png"));
    }

    #[test]
    fn mask_file_names_follow_glob_rules() {
        assert!(is_mask_file_name(Path::new("x/a.png")));
        assert!(is_mask_file_name(Path::new("x/a.b.png")));
        assert!(!is_mask_file_name(Path::new("x/a.PNG")));
        assert!(!is_mask_file_name(Path::new("x/a.jpg")));
        assert!(!is_mask_file_name(Path::new("x/.hidden.png")));
        assert!(!is_mask_file_name(Path::new("x/png")));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_mask_names_still_pair() {
        use std::os::unix::ffi::OsStrExt;

        let mask = Path::new("root/processed").join(OsStr::from_bytes(b"caf\xe9.png"));
        assert!(is_mask_file_name(&mask));

        let pair = SketchPair::for_mask(Path::new("root/unprocessed"), mask).unwrap();
        assert_eq!(
            pair.image,
            Path::new("root/unprocessed").join(OsStr::from_bytes(b"caf\xe9.jpg"))
        );
        assert_eq!(pair.stem, "caf\u{FFFD}");
    }

    #[test]
    fn check_reports_missing_image() {
        let pair = SketchPair {
            stem: "ghost".into(),
            image: PathBuf::from("/nonexistent/unprocessed/ghost.jpg"),
            mask: PathBuf::from("/nonexistent/processed/ghost.png"),
        };
        match pair.check() {
            Err(DatasetError::MissingImage { image, .. }) => {
                assert_eq!(image, PathBuf::from("/nonexistent/unprocessed/ghost.jpg"));
            }
            other => panic!("Expected MissingImage error, got {other:?}"),
        }
    }
}
