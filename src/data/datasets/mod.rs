//! 内置数据集
//!
//! 目前只有 PASCAL VOC 目标检测数据集：
//! - 类别表：类别名 ↔ id
//! - 标注解析：XML → 过滤后的框与类别 id
//! - 数据集：按索引随机访问样本

mod annotation;
mod vocabulary;
mod voc;

pub use annotation::{Annotation, BoundingBox, parse_annotation, parse_annotation_str};
pub use vocabulary::{ClassId, ClassVocabulary, VOC_CLASSES};
pub use voc::{DEFAULT_IMAGE_SIZE, Mode, Sample, Target, VocDataset};
