//! 数据集配置
//!
//! 以 JSON 描述一个 VOC 数据集的读取方式，例如：
//!
//! ```json
//! {
//!     "root": "/data/VOCdevkit/VOC2007",
//!     "mode": "train",
//!     "image_size": 416
//! }
//! ```
//!
//! `image_size` 缺省为 416；`index_file` 缺省时按模式选择约定的索引文件；
//! `classes_file` 缺省时使用 VOC 的 20 类。

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::datasets::{DEFAULT_IMAGE_SIZE, Mode};
use crate::data::error::DataError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocConfig {
    /// 数据集根目录（包含 `ImageSets`、`JPEGImages`、`Annotations`）
    pub root: PathBuf,
    pub mode: Mode,
    #[serde(default = "default_image_size")]
    pub image_size: u32,
    /// `ImageSets/Main/` 下的索引文件名
    #[serde(default)]
    pub index_file: Option<String>,
    /// 每行一个类别名的文本文件
    #[serde(default)]
    pub classes_file: Option<PathBuf>,
}

fn default_image_size() -> u32 {
    DEFAULT_IMAGE_SIZE
}

impl VocConfig {
    pub fn new(root: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            root: root.into(),
            mode,
            image_size: DEFAULT_IMAGE_SIZE,
            index_file: None,
            classes_file: None,
        }
    }

    /// 从 JSON 文件读取配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let file = File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if self.image_size == 0 {
            return Err(DataError::InvalidConfig(
                "image_size 必须大于 0".to_string(),
            ));
        }
        if let Some(index_file) = &self.index_file {
            if index_file.trim().is_empty() {
                return Err(DataError::InvalidConfig("index_file 不能为空".to_string()));
            }
        }
        Ok(())
    }
}
