/*
 * @Author       : 老董
 * @Date         : 2026-10-16
 * @Description  : 本模块封装数据集用到的图像操作：解码、缩放与画框。
 *                 在本模块中，不严谨地说：
 *                 1. 所谓的image/图像统一指解码后转换为RGB8的图像；
 *                 2. 尺寸一律按(宽, 高)的顺序传给`image`库，按[高, 宽]的顺序对外暴露。
 */

use std::path::Path;

use image::RgbImage;
use image::io::Reader as ImageReader;
use image::imageops::FilterType;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::data::DataError;
use crate::data::datasets::BoundingBox;


pub struct Vision {
    // ...
}
impl Vision {
    /// 将本地图像解码为RGB8图像（灰度、RGBA等格式都会被转换）
    ///
    /// 格式按文件内容识别而非扩展名，`.jpg`里实际存的是PNG也能正常解码。
    pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, DataError> {
        let image = ImageReader::open(path.as_ref())?
            .with_guessed_format()?
            .decode()?;
        Ok(image.to_rgb8())
    }

    /// 将图像缩放为`size`×`size`的正方形
    /// * `image` - 原始图像
    /// * `size` - 缩放后的边长
    ///
    /// 不保持宽高比；使用带抗锯齿效果的Lanczos3滤波器。
    pub fn resize_square(image: &RgbImage, size: u32) -> RgbImage {
        image::imageops::resize(image, size, size, FilterType::Lanczos3)
    }

    /// 在图像副本上画出空心矩形框，便于人工核对标注与缩放结果
    /// * `image` - 原始图像
    /// * `boxes` - 以像素为单位的框（0起始坐标）
    /// * `rgb_color` - 框线颜色
    ///
    /// 注：宽或高不为正的框会被跳过。
    pub fn draw_boxes(image: &RgbImage, boxes: &[BoundingBox], rgb_color: [u8; 3]) -> RgbImage {
        let mut canvas = image.clone();
        for bbox in boxes {
            let width = bbox.width().round();
            let height = bbox.height().round();
            if width < 1.0 || height < 1.0 {
                continue;
            }
            let rect = Rect::at(bbox.x1.round() as i32, bbox.y1.round() as i32)
                .of_size(width as u32, height as u32);
            draw_hollow_rect_mut(&mut canvas, rect, image::Rgb(rgb_color));
        }
        canvas
    }
}
