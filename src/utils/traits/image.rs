use image::{ImageBuffer, Pixel};
use ndarray::Array3;

pub trait TraitForImageBuffer {
    fn get_channel_len(&self) -> usize;
    /// 转为`[C, H, W]`（通道在前）的数组，像素值保持原样
    fn to_chw_array(&self) -> Array3<f32>;
}

impl<P: Pixel + 'static> TraitForImageBuffer for ImageBuffer<P, Vec<P::Subpixel>> {
    fn get_channel_len(&self) -> usize {
        P::CHANNEL_COUNT as usize
    }

    fn to_chw_array(&self) -> Array3<f32> {
        let channels = self.get_channel_len();
        let width = self.width() as usize;
        let height = self.height() as usize;

        Array3::from_shape_fn((channels, height, width), |(c, y, x)| {
            let value = self.get_pixel(x as u32, y as u32).channels()[c];
            num_traits::NumCast::from(value).unwrap_or(0.0)
        })
    }
}
