//! Joint transforms applied to an image and its mask.
//!
//! Geometric operations must see both halves of a sample at once so that a
//! crop or flip lands on the same pixels in the image and in the mask.

use std::{fmt, sync::Arc};

use image::{imageops::FilterType, GrayImage, RgbImage};

/// A transform over an (image, mask) pair.
///
/// Implementations must be `Send + Sync` so the dataset can be shared by
/// Burn's data loader workers.
pub trait PairTransform: Send + Sync {
    fn apply(&self, image: RgbImage, mask: GrayImage) -> (RgbImage, GrayImage);
}

impl<F> PairTransform for F
where
    F: Fn(RgbImage, GrayImage) -> (RgbImage, GrayImage) + Send + Sync,
{
    fn apply(&self, image: RgbImage, mask: GrayImage) -> (RgbImage, GrayImage) {
        self(image, mask)
    }
}

/// What the dataset does with a freshly decoded pair.
#[derive(Clone, Default)]
pub enum SketchTransform {
    /// Return the decoded pixels untouched.
    #[default]
    None,
    /// Hand the pair to a joint transform and return whatever it produces.
    Paired(Arc<dyn PairTransform>),
}

impl SketchTransform {
    pub fn paired(transform: impl PairTransform + 'static) -> Self {
        Self::Paired(Arc::new(transform))
    }

    pub fn apply(&self, image: RgbImage, mask: GrayImage) -> (RgbImage, GrayImage) {
        match self {
            Self::None => (image, mask),
            Self::Paired(transform) => transform.apply(image, mask),
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Debug for SketchTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Paired(_) => f.write_str("Paired(..)"),
        }
    }
}

/// Resize both halves to a fixed size.
///
/// The mask uses nearest-neighbour sampling so it stays binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resize {
    pub width: u32,
    pub height: u32,
}

impl Resize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(size: u32) -> Self {
        Self::new(size, size)
    }
}

impl PairTransform for Resize {
    fn apply(&self, image: RgbImage, mask: GrayImage) -> (RgbImage, GrayImage) {
        if image.dimensions() == (self.width, self.height)
            && mask.dimensions() == (self.width, self.height)
        {
            return (image, mask);
        }
        let image = image::imageops::resize(&image, self.width, self.height, FilterType::Lanczos3);
        let mask = image::imageops::resize(&mask, self.width, self.height, FilterType::Nearest);
        (image, mask)
    }
}

/// Apply several transforms in order.
#[derive(Clone, Default)]
pub struct Compose {
    transforms: Vec<Arc<dyn PairTransform>>,
}

impl Compose {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn then(mut self, transform: impl PairTransform + 'static) -> Self {
        self.transforms.push(Arc::new(transform));
        self
    }
}

impl PairTransform for Compose {
    fn apply(&self, image: RgbImage, mask: GrayImage) -> (RgbImage, GrayImage) {
        self.transforms
            .iter()
            .fold((image, mask), |(image, mask), transform| {
                transform.apply(image, mask)
            })
    }
}
