//! Tensor conversion and batching of sketch samples.

use std::marker::PhantomData;

use burn::{
    data::dataloader::batcher::Batcher,
    tensor::{backend::Backend, Tensor, TensorData},
};

use crate::{dataset::SketchItem, mask::BACKGROUND};

impl SketchItem {
    /// The image as a `[3, H, W]` tensor with values in `[0, 1]`.
    pub fn image_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 3> {
        let (height, width) = self.shape();
        let data: Vec<f32> = self
            .image
            .as_raw()
            .iter()
            .map(|&value| f32::from(value) / 255.0)
            .collect();

        Tensor::<B, 3>::from_data(TensorData::new(data, [height, width, 3]), device)
            .permute([2, 0, 1]) // HWC to CHW
    }

    /// The mask as a `[1, H, W]` tensor holding 0 for background and 1 for
    /// foreground.
    pub fn mask_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 3> {
        let height = self.mask.height() as usize;
        let width = self.mask.width() as usize;
        let data: Vec<f32> = self
            .mask
            .as_raw()
            .iter()
            .map(|&value| if value > BACKGROUND { 1.0 } else { 0.0 })
            .collect();

        Tensor::<B, 2>::from_data(TensorData::new(data, [height, width]), device).unsqueeze::<3>()
    }
}

/// A batch of sketches and masks.
#[derive(Debug, Clone)]
pub struct SketchBatch<B: Backend> {
    /// `[B, 3, H, W]` images with values in `[0, 1]`.
    pub images: Tensor<B, 4>,
    /// `[B, 1, H, W]` binary masks.
    pub masks: Tensor<B, 4>,
}

/// Converts [`SketchItem`]s into a [`SketchBatch`].
///
/// All items of a batch must share their dimensions; give the dataset a
/// resizing transform when the source sketches vary in size.
#[derive(Clone, Default)]
pub struct SketchBatcher<B: Backend> {
    _phantom: PhantomData<B>,
}

impl<B: Backend> SketchBatcher<B> {
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<B: Backend> Batcher<B, SketchItem, SketchBatch<B>> for SketchBatcher<B> {
    fn batch(&self, items: Vec<SketchItem>, device: &B::Device) -> SketchBatch<B> {
        let mut images = Vec::with_capacity(items.len());
        let mut masks = Vec::with_capacity(items.len());

        for item in &items {
            images.push(item.image_tensor::<B>(device));
            masks.push(item.mask_tensor::<B>(device));
        }

        // Stack along the batch dimension to get [B, C, H, W]
        SketchBatch {
            images: Tensor::stack(images, 0),
            masks: Tensor::stack(masks, 0),
        }
    }
}
