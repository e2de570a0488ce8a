//! 数据加载模块
//!
//! 读取 PASCAL VOC 布局的目标检测数据集。
//!
//! # 主要组件
//!
//! - [`VocDataset`]: 按索引随机访问的数据集，训练/测试/评估三种 [`Mode`]
//! - [`parse_annotation`]: 单个 XML 标注文件的解析与过滤
//! - [`ClassVocabulary`]: 类别名与 id 的对应关系
//! - [`VocConfig`]: 可从 JSON 读取的数据集配置
//! - [`transforms`]: 交给训练框架前的数组转换（one-hot、框矩阵、图像归一化等）
//! - [`DataError`]: 数据加载错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use voc_torch::data::{Mode, VocDataset};
//!
//! let dataset = VocDataset::new("/data/VOCdevkit/VOC2007", Mode::Train)?;
//! for index in 0..dataset.len() {
//!     let sample = dataset.get(index)?;
//!     let boxes = sample.boxes_array(); // [k, 4]
//!     let labels = sample.label_array(); // [k, 20]
//! }
//! ```

pub mod config;
pub mod datasets;
pub mod error;
pub mod transforms;

#[cfg(test)]
mod tests;

// Re-exports
pub use config::VocConfig;
pub use datasets::{
    Annotation, BoundingBox, ClassId, ClassVocabulary, Mode, Sample, Target, VocDataset,
    parse_annotation, parse_annotation_str,
};
pub use error::{AnnotationError, DataError};
