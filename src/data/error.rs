//! 数据加载错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 数据加载相关错误
#[derive(Debug, Error)]
pub enum DataError {
    /// 索引文件（`ImageSets/Main/*.txt`）不存在，构造数据集时即报错
    #[error("索引文件不存在: {0}")]
    MissingIndexFile(PathBuf),

    /// 索引中列出的样本缺少图像或标注文件
    #[error("样本文件不存在: {0}")]
    MissingSampleFile(PathBuf),

    /// 标注文件格式错误
    #[error("标注文件格式错误 {path}: {source}")]
    MalformedAnnotation {
        path: PathBuf,
        #[source]
        source: AnnotationError,
    },

    /// 索引越界
    #[error("索引越界: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// 类别表不合法（为空或有重复）
    #[error("类别表不合法: {0}")]
    InvalidVocabulary(String),

    /// 配置项不合法
    #[error("配置错误: {0}")]
    InvalidConfig(String),

    /// 配置文件解析失败
    #[error("配置文件解析失败: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// IO 错误
    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    /// 图像解码错误
    #[error("图像错误: {0}")]
    ImageError(#[from] image::ImageError),
}

/// 单个标注文档内部的错误，由 [`DataError::MalformedAnnotation`] 携带文件路径后向外抛出
#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("XML 解析失败: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("object[{object_index}] 缺少子元素 `{element}`")]
    MissingElement {
        object_index: usize,
        element: &'static str,
    },

    #[error("object[{object_index}] 的 `{element}` 无法解析为数字: {value:?}")]
    InvalidNumber {
        object_index: usize,
        element: &'static str,
        value: String,
    },
}
