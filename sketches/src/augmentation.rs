//! Random joint augmentation for sketch/mask pairs.
//!
//! Supported methods:
//! 1. Horizontal flip - 50% probability
//! 2. Random crop - up to 10% border on each side
//! 3. Random rotation - 20% probability, ±15 degrees
//! 4. Pepper noise - 0.15% density, image only
//!
//! Geometric methods draw one decision and apply it to both the image and the
//! mask. Masks are always resampled with nearest-neighbour interpolation and a
//! background fill, so a binary mask stays binary.

use std::sync::atomic::{AtomicU64, Ordering};

use burn::prelude::*;
use image::{imageops, imageops::FilterType, GrayImage, Luma, Rgb, RgbImage};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{mask::BACKGROUND, transform::PairTransform};

/// Available data augmentation methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AugmentationMethod {
    /// Horizontal flip (50% probability)
    Flip,
    /// Random crop (10% border)
    Crop,
    /// Random rotation (20% probability, ±15 degrees)
    Rotate,
    /// Pepper noise (0.15% density)
    Pepper,
}

/// Methods enabled by [`AugmentationConfig`] unless overridden.
pub const DEFAULT_METHODS: [AugmentationMethod; 3] = [
    AugmentationMethod::Flip,
    AugmentationMethod::Crop,
    AugmentationMethod::Rotate,
];

/// Data augmentation configuration parameters
#[derive(Config, Debug)]
pub struct AugmentationConfig {
    /// Methods applied in order.
    #[config(default = "DEFAULT_METHODS.to_vec()")]
    pub enabled_methods: Vec<AugmentationMethod>,
    /// Final `(width, height)`; `None` keeps whatever size the methods produce.
    #[config(default = "None")]
    pub target_size: Option<(u32, u32)>,
    /// Base seed; a random one is drawn when unset.
    #[config(default = "None")]
    pub seed: Option<u64>,
}

/// Applies the configured augmentation methods to each pair it sees.
#[derive(Debug)]
pub struct ImageAugmentor {
    config: AugmentationConfig,
    seed: u64,
    calls: AtomicU64,
}

impl ImageAugmentor {
    pub fn new(config: AugmentationConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            config,
            seed,
            calls: AtomicU64::new(0),
        }
    }

    pub const fn config(&self) -> &AugmentationConfig {
        &self.config
    }

    /// A fresh generator per call; successive calls see different draws.
    fn next_rng(&self) -> StdRng {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        StdRng::seed_from_u64(self.seed.wrapping_add(call.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }

    /// Run every enabled method, then resize to the target size if one is set.
    pub fn augment(&self, mut image: RgbImage, mut mask: GrayImage) -> (RgbImage, GrayImage) {
        let mut rng = self.next_rng();

        for method in &self.config.enabled_methods {
            (image, mask) = match method {
                AugmentationMethod::Flip => Self::apply_horizontal_flip(&mut rng, image, mask),
                AugmentationMethod::Crop => Self::apply_random_crop(&mut rng, image, mask),
                AugmentationMethod::Rotate => Self::apply_random_rotation(&mut rng, image, mask),
                AugmentationMethod::Pepper => Self::apply_pepper_noise(&mut rng, image, mask),
            };
        }

        match self.config.target_size {
            Some((width, height)) if image.dimensions() != (width, height) => (
                imageops::resize(&image, width, height, FilterType::Lanczos3),
                imageops::resize(&mask, width, height, FilterType::Nearest),
            ),
            _ => (image, mask),
        }
    }

    fn apply_horizontal_flip(
        rng: &mut StdRng,
        image: RgbImage,
        mask: GrayImage,
    ) -> (RgbImage, GrayImage) {
        if rng.random_bool(0.5) {
            (
                imageops::flip_horizontal(&image),
                imageops::flip_horizontal(&mask),
            )
        } else {
            (image, mask)
        }
    }

    fn apply_random_crop(
        rng: &mut StdRng,
        image: RgbImage,
        mask: GrayImage,
    ) -> (RgbImage, GrayImage) {
        let (width, height) = image.dimensions();

        let border_x = (width as f32 * 0.1) as u32;
        let border_y = (height as f32 * 0.1) as u32;
        if border_x == 0 && border_y == 0 {
            return (image, mask);
        }

        let crop_width = rng.random_range(width - 2 * border_x..=width);
        let crop_height = rng.random_range(height - 2 * border_y..=height);
        let crop_x = rng.random_range(0..=width - crop_width);
        let crop_y = rng.random_range(0..=height - crop_height);

        (
            imageops::crop_imm(&image, crop_x, crop_y, crop_width, crop_height).to_image(),
            imageops::crop_imm(&mask, crop_x, crop_y, crop_width, crop_height).to_image(),
        )
    }

    fn apply_random_rotation(
        rng: &mut StdRng,
        image: RgbImage,
        mask: GrayImage,
    ) -> (RgbImage, GrayImage) {
        if !rng.random_bool(0.2) {
            return (image, mask);
        }

        let angle = rng.random_range(-15.0f32..=15.0).to_radians();
        let image = rotate_about_center(&image, angle, Interpolation::Bicubic, Rgb([0, 0, 0]));
        let mask = rotate_about_center(&mask, angle, Interpolation::Nearest, Luma([BACKGROUND]));
        (image, mask)
    }

    fn apply_pepper_noise(
        rng: &mut StdRng,
        mut image: RgbImage,
        mask: GrayImage,
    ) -> (RgbImage, GrayImage) {
        const NOISE_RATE: f64 = 0.0015;

        for pixel in image.pixels_mut() {
            if rng.random_bool(NOISE_RATE) {
                *pixel = if rng.random_bool(0.5) {
                    Rgb([0, 0, 0])
                } else {
                    Rgb([255, 255, 255])
                };
            }
        }

        (image, mask)
    }
}

impl PairTransform for ImageAugmentor {
    fn apply(&self, image: RgbImage, mask: GrayImage) -> (RgbImage, GrayImage) {
        self.augment(image, mask)
    }
}
