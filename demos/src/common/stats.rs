//! Summary statistics over dataset samples.

use burn::tensor::{backend::Backend, cast::ToElement, Tensor};
use image::GrayImage;
use sketches_burn::mask::BACKGROUND;

/// Minimum, maximum and mean of a tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

/// Calculate tensor statistics
pub fn pixel_stats<B: Backend, const D: usize>(tensor: Tensor<B, D>) -> PixelStats {
    PixelStats {
        min: tensor.clone().min().into_scalar().to_f32(),
        max: tensor.clone().max().into_scalar().to_f32(),
        mean: tensor.mean().into_scalar().to_f32(),
    }
}

/// Share of mask pixels that are foreground.
pub fn mask_foreground_ratio(mask: &GrayImage) -> f32 {
    let total = mask.as_raw().len();
    if total == 0 {
        return 0.0;
    }
    let foreground = mask.as_raw().iter().filter(|&&v| v > BACKGROUND).count();
    foreground as f32 / total as f32
}

/// Statistics accumulator for aggregating across samples
#[derive(Debug, Clone)]
pub struct StatisticsAccumulator {
    pub min_val: f32,
    pub max_val: f32,
    min_sum: f32,
    max_sum: f32,
    mean_sum: f32,
    count: usize,
}

impl Default for StatisticsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsAccumulator {
    pub const fn new() -> Self {
        Self {
            min_val: f32::INFINITY,
            max_val: f32::NEG_INFINITY,
            min_sum: 0.0,
            max_sum: 0.0,
            mean_sum: 0.0,
            count: 0,
        }
    }

    pub fn add(&mut self, stats: PixelStats) {
        self.min_val = self.min_val.min(stats.min);
        self.max_val = self.max_val.max(stats.max);
        self.min_sum += stats.min;
        self.max_sum += stats.max;
        self.mean_sum += stats.mean;
        self.count += 1;
    }

    pub fn avg_min(&self) -> f32 {
        self.average(self.min_sum)
    }

    pub fn avg_max(&self) -> f32 {
        self.average(self.max_sum)
    }

    pub fn avg_mean(&self) -> f32 {
        self.average(self.mean_sum)
    }

    fn average(&self, sum: f32) -> f32 {
        if self.count > 0 {
            sum / self.count as f32
        } else {
            0.0
        }
    }
}
