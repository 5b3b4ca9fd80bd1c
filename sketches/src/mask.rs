//! Binary masks derived from the alpha channel of a PNG.

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Pixel, Primitive};

/// Mask value for foreground pixels.
pub const FOREGROUND: u8 = 255;
/// Mask value for background pixels.
pub const BACKGROUND: u8 = 0;

/// Extract the alpha channel of `image` and threshold it into a binary mask.
///
/// Any alpha value above zero becomes [`FOREGROUND`], zero becomes
/// [`BACKGROUND`]. Returns `None` when the image has no alpha channel.
pub fn alpha_mask(image: &DynamicImage) -> Option<GrayImage> {
    let mask = match image {
        DynamicImage::ImageLumaA8(buffer) => threshold_last_channel(buffer),
        DynamicImage::ImageRgba8(buffer) => threshold_last_channel(buffer),
        DynamicImage::ImageLumaA16(buffer) => threshold_last_channel(buffer),
        DynamicImage::ImageRgba16(buffer) => threshold_last_channel(buffer),
        DynamicImage::ImageRgba32F(buffer) => threshold_last_channel(buffer),
        other if other.color().has_alpha() => threshold_last_channel(&other.to_rgba16()),
        _ => return None,
    };
    Some(mask)
}

fn threshold_last_channel<P>(buffer: &ImageBuffer<P, Vec<P::Subpixel>>) -> GrayImage
where
    P: Pixel,
{
    let zero = <P::Subpixel as Primitive>::DEFAULT_MIN_VALUE;
    let mut mask = GrayImage::new(buffer.width(), buffer.height());
    for (source, target) in buffer.pixels().zip(mask.pixels_mut()) {
        let on = source.channels().last().is_some_and(|alpha| *alpha > zero);
        *target = Luma([if on { FOREGROUND } else { BACKGROUND }]);
    }
    mask
}

/// Check that every pixel of `mask` is either foreground or background.
pub fn is_binary(mask: &GrayImage) -> bool {
    mask.pixels()
        .all(|p| matches!(p.0[0], FOREGROUND | BACKGROUND))
}

#[cfg(test)]
mod tests {
    use image::{LumaA, Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;

    #[test]
    fn alpha_above_zero_is_foreground() {
        let alphas = [0, 1, 128, 255];
        let rgba = RgbaImage::from_fn(4, 1, |x, _| Rgba([10, 20, 30, alphas[x as usize]]));
        let mask = alpha_mask(&DynamicImage::ImageRgba8(rgba)).unwrap();

        let values: Vec<u8> = mask.pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![0, 255, 255, 255]);
        assert!(is_binary(&mask));
    }

    #[test]
    fn color_channels_are_ignored() {
        // Opaque black stays foreground, transparent white stays background.
        let rgba = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 0])
            }
        });
        let mask = alpha_mask(&DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(mask.get_pixel(0, 0).0[0], FOREGROUND);
        assert_eq!(mask.get_pixel(1, 0).0[0], BACKGROUND);
    }

    #[test]
    fn sixteen_bit_alpha_is_not_rounded_away() {
        let buffer = ImageBuffer::from_fn(2, 1, |x, _| LumaA([0u16, x as u16]));
        let mask = alpha_mask(&DynamicImage::ImageLumaA16(buffer)).unwrap();
        assert_eq!(mask.get_pixel(0, 0).0[0], BACKGROUND);
        assert_eq!(mask.get_pixel(1, 0).0[0], FOREGROUND);
    }

    #[test]
    fn image_without_alpha_has_no_mask() {
        let rgb = RgbImage::from_pixel(3, 3, Rgb([255, 255, 255]));
        assert!(alpha_mask(&DynamicImage::ImageRgb8(rgb)).is_none());
    }

    #[test]
    fn mask_keeps_source_dimensions() {
        let rgba = RgbaImage::new(7, 5);
        let mask = alpha_mask(&DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(mask.dimensions(), (7, 5));
    }
}
