//! 类别表
//!
//! 把类别名与整数 id 一一对应起来。id 由类别在表中的位置决定，
//! 所以同一份标注的所有使用方必须共用同一顺序的类别表。

use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::data::error::DataError;

/// 类别 id，取值范围为 `[0, 类别数)`
pub type ClassId = usize;

/// PASCAL VOC 的 20 个类别（顺序即 id）
pub const VOC_CLASSES: [&str; 20] = [
    "aeroplane",
    "bicycle",
    "bird",
    "boat",
    "bottle",
    "bus",
    "car",
    "cat",
    "chair",
    "cow",
    "diningtable",
    "dog",
    "horse",
    "motorbike",
    "person",
    "pottedplant",
    "sheep",
    "sofa",
    "train",
    "tvmonitor",
];

/// 不可变的类别表：名称 ↔ id 的双射
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ClassVocabulary {
    names: IndexSet<String>,
}

/// 顺序决定 id，因此相等要求名称与顺序都一致（`IndexSet` 自身的相等忽略顺序）
impl PartialEq for ClassVocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.names.iter().eq(other.names.iter())
    }
}

impl Eq for ClassVocabulary {}

impl ClassVocabulary {
    /// 由类别名列表构造
    ///
    /// # 错误
    /// 列表为空或存在重复名称时返回 [`DataError::InvalidVocabulary`]
    pub fn new<I, S>(names: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let set: IndexSet<String> = names.iter().cloned().collect();

        if set.is_empty() {
            return Err(DataError::InvalidVocabulary("类别表为空".to_string()));
        }
        if set.len() != names.len() {
            return Err(DataError::InvalidVocabulary(format!(
                "存在重复的类别名（{} 个名称中只有 {} 个不同）",
                names.len(),
                set.len()
            )));
        }

        Ok(Self { names: set })
    }

    /// PASCAL VOC 默认的 20 类
    pub fn voc() -> Self {
        Self {
            names: VOC_CLASSES.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// 从每行一个类别名的文本文件加载，空行会被忽略
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    /// 类别名对应的 id，不在表中时返回 `None`
    pub fn id_of(&self, name: &str) -> Option<ClassId> {
        self.names.get_index_of(name)
    }

    /// id 对应的类别名
    pub fn name_of(&self, id: ClassId) -> Option<&str> {
        self.names.get_index(id).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// 类别数 N
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 按 id 顺序遍历类别名
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for ClassVocabulary {
    fn default() -> Self {
        Self::voc()
    }
}

impl TryFrom<Vec<String>> for ClassVocabulary {
    type Error = DataError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<ClassVocabulary> for Vec<String> {
    fn from(vocabulary: ClassVocabulary) -> Self {
        vocabulary.names.into_iter().collect()
    }
}
