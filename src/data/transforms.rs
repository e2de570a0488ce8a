//! 数据变换函数
//!
//! 样本内部一律使用带类型的记录（[`BoundingBox`]、[`ClassId`]），
//! 只有交给训练框架时才通过这里的函数转成 `ndarray` 数组。

use image::RgbImage;
use ndarray::{Array2, Array3};

use crate::data::datasets::{BoundingBox, ClassId};
use crate::utils::traits::image::TraitForImageBuffer;

/// 将 0-255 像素值归一化到 0-1
pub fn normalize_pixels(array: Array3<f32>) -> Array3<f32> {
    array / 255.0
}

/// 将类别 id 转换为逐行的 one-hot 编码
///
/// # 参数
/// - `class_ids`: 每个 object 的类别 id
/// - `num_classes`: 类别总数
///
/// # 返回
/// 形状 `[k, num_classes]`，第 i 行只在 `class_ids[i]` 处为 1。
/// 注意这是“每个 object 一行”，而不是整张图一个 multi-hot 向量。
///
/// # 示例
/// ```ignore
/// let encoded = one_hot(&[0, 2, 1], 3);
/// // 结果: [[1,0,0], [0,0,1], [0,1,0]]
/// ```
pub fn one_hot(class_ids: &[ClassId], num_classes: usize) -> Array2<f32> {
    let mut encoded = Array2::zeros((class_ids.len(), num_classes));
    for (row, &class_id) in class_ids.iter().enumerate() {
        if class_id < num_classes {
            encoded[[row, class_id]] = 1.0;
        }
    }
    encoded
}

/// 类别 id 列，形状 `[k, 1]`
pub fn class_id_column(class_ids: &[ClassId]) -> Array2<f32> {
    Array2::from_shape_fn((class_ids.len(), 1), |(row, _)| class_ids[row] as f32)
}

/// 框矩阵，形状 `[k, 4]`，每行为 `[x1, y1, x2, y2]`
pub fn boxes_to_array(boxes: &[BoundingBox]) -> Array2<f32> {
    Array2::from_shape_fn((boxes.len(), 4), |(row, col)| boxes[row].to_array()[col])
}

/// RGB 图像转为 `[3, H, W]` 的数组，保留 0-255 的原始取值
pub fn image_to_chw(image: &RgbImage) -> Array3<f32> {
    image.to_chw_array()
}

/// 可直接作为数据集 transform 使用：转 `[3, H, W]` 并归一化到 0-1
pub fn to_normalized_array(image: RgbImage) -> Array3<f32> {
    normalize_pixels(image_to_chw(&image))
}
