//! PASCAL VOC 目标检测数据集
//!
//! 目录结构（固定）：
//! - `ImageSets/Main/{trainval,test,train}.txt`：每行一个样本 id
//! - `JPEGImages/<id>.jpg`
//! - `Annotations/<id>.xml`
//!
//! 三种模式共用同一条“定位文件 → 解析标注 → 缩放图像与框”的流水线，
//! 只在最后组装样本时按 [`Mode`] 选择标签编码与附加字段。

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbImage;
use log::{debug, trace, warn};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::annotation::{BoundingBox, parse_annotation};
use super::vocabulary::{ClassId, ClassVocabulary};
use crate::data::config::VocConfig;
use crate::data::error::DataError;
use crate::data::transforms::{boxes_to_array, class_id_column, one_hot};
use crate::vision::Vision;

/// 默认的正方形缩放边长
pub const DEFAULT_IMAGE_SIZE: u32 = 416;

/// 数据集的使用方式，决定读取哪个索引文件以及样本里带哪些字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// 训练：`trainval.txt`，样本为 (图像, 框, one-hot 标签)
    Train,
    /// 测试：`test.txt`，在训练样本的基础上附带样本 id
    Test,
    /// 评估：`train.txt`，标签为原始类别 id，并附带原图 [高, 宽]
    Eval,
}

impl Mode {
    /// `ImageSets/Main/` 下约定的索引文件名
    pub fn index_file_name(&self) -> &'static str {
        match self {
            Mode::Train => "trainval.txt",
            Mode::Test => "test.txt",
            Mode::Eval => "train.txt",
        }
    }
}

/// 随模式变化的那部分样本内容
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Train {
        /// `[k, N]`，每个 object 一行 one-hot
        labels: Array2<f32>,
    },
    Test {
        labels: Array2<f32>,
        id: String,
    },
    Eval {
        class_ids: Vec<ClassId>,
        /// 缩放前的 `[高, 宽]`
        original_size: [u32; 2],
    },
}

/// 单个样本，每次访问都重新构造
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<T> {
    pub image: T,
    /// 已缩放到目标尺寸的框，可能为空
    pub boxes: Vec<BoundingBox>,
    pub target: Target,
}

impl<T> Sample<T> {
    /// 框矩阵，形状 `[k, 4]`
    pub fn boxes_array(&self) -> Array2<f32> {
        boxes_to_array(&self.boxes)
    }

    /// 训练/测试模式为 `[k, N]` 的 one-hot；评估模式为 `[k, 1]` 的类别 id 列
    pub fn label_array(&self) -> Array2<f32> {
        match &self.target {
            Target::Train { labels } | Target::Test { labels, .. } => labels.clone(),
            Target::Eval { class_ids, .. } => class_id_column(class_ids),
        }
    }

    /// 仅测试模式有
    pub fn id(&self) -> Option<&str> {
        match &self.target {
            Target::Test { id, .. } => Some(id.as_str()),
            _ => None,
        }
    }

    /// 仅评估模式有，`[高, 宽]`
    pub fn original_size(&self) -> Option<[u32; 2]> {
        match &self.target {
            Target::Eval { original_size, .. } => Some(*original_size),
            _ => None,
        }
    }
}

type Transform<T> = Arc<dyn Fn(RgbImage) -> T + Send + Sync>;

/// PASCAL VOC 数据集
///
/// 构造后只读：样本 id 列表、根目录、类别表、transform 都不会再改变，
/// 因此可以在多个线程间共享同一个实例并发调用 [`VocDataset::get`]。
///
/// # 示例
/// ```ignore
/// use voc_torch::data::{Mode, VocDataset, transforms::to_normalized_array};
///
/// let dataset = VocDataset::new("/data/VOCdevkit/VOC2007", Mode::Train)?
///     .with_image_size(416)
///     .with_transform(to_normalized_array);
///
/// let sample = dataset.get(0)?;
/// println!("框: {:?}", sample.boxes_array().shape());
/// ```
pub struct VocDataset<T = RgbImage> {
    root: PathBuf,
    mode: Mode,
    ids: Vec<String>,
    vocabulary: Arc<ClassVocabulary>,
    image_size: u32,
    transform: Transform<T>,
}

impl VocDataset<RgbImage> {
    /// 按模式读取约定的索引文件
    ///
    /// # 错误
    /// 索引文件不存在时立即返回 [`DataError::MissingIndexFile`]
    pub fn new(root: impl AsRef<Path>, mode: Mode) -> Result<Self, DataError> {
        Self::with_index_file(root, mode, mode.index_file_name())
    }

    /// 同 [`VocDataset::new`]，但使用 `ImageSets/Main/` 下指定名称的索引文件
    pub fn with_index_file(
        root: impl AsRef<Path>,
        mode: Mode,
        index_file: &str,
    ) -> Result<Self, DataError> {
        let root = root.as_ref().to_path_buf();
        let index_path = root.join("ImageSets").join("Main").join(index_file);
        let ids = load_index_file(&index_path)?;

        Ok(Self {
            root,
            mode,
            ids,
            vocabulary: Arc::new(ClassVocabulary::voc()),
            image_size: DEFAULT_IMAGE_SIZE,
            transform: Arc::new(|image: RgbImage| image),
        })
    }

    /// 由配置构造；配置了类别文件时用它替换默认的 VOC 类别表
    pub fn from_config(config: &VocConfig) -> Result<Self, DataError> {
        config.validate()?;

        let index_file = config
            .index_file
            .as_deref()
            .unwrap_or(config.mode.index_file_name());
        let mut dataset =
            Self::with_index_file(&config.root, config.mode, index_file)?
                .with_image_size(config.image_size);

        if let Some(classes_file) = &config.classes_file {
            dataset = dataset.with_vocabulary(ClassVocabulary::from_file(classes_file)?);
        }

        Ok(dataset)
    }
}

impl<T> VocDataset<T> {
    /// 设置正方形缩放边长
    ///
    /// # Panics
    /// `size` 为 0
    pub fn with_image_size(mut self, size: u32) -> Self {
        assert!(size > 0, "VocDataset: image_size 必须大于 0");
        self.image_size = size;
        self
    }

    /// 替换类别表
    pub fn with_vocabulary(mut self, vocabulary: ClassVocabulary) -> Self {
        self.vocabulary = Arc::new(vocabulary);
        self
    }

    /// 设置缩放后对图像施加的变换（如归一化、转数组），会替换之前的变换
    pub fn with_transform<U, F>(self, transform: F) -> VocDataset<U>
    where
        F: Fn(RgbImage) -> U + Send + Sync + 'static,
    {
        VocDataset {
            root: self.root,
            mode: self.mode,
            ids: self.ids,
            vocabulary: self.vocabulary,
            image_size: self.image_size,
            transform: Arc::new(transform),
        }
    }

    /// 样本数量
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    pub fn vocabulary(&self) -> &ClassVocabulary {
        &self.vocabulary
    }

    /// 索引文件中读到的全部样本 id
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn image_path(&self, id: &str) -> PathBuf {
        self.root.join("JPEGImages").join(format!("{id}.jpg"))
    }

    pub fn annotation_path(&self, id: &str) -> PathBuf {
        self.root.join("Annotations").join(format!("{id}.xml"))
    }

    /// 获取第 index 个样本
    ///
    /// 每次调用都会重新解码图像、重新解析标注，不做缓存。
    /// 要么返回完整的样本，要么返回错误。
    pub fn get(&self, index: usize) -> Result<Sample<T>, DataError> {
        let id = self.ids.get(index).ok_or(DataError::IndexOutOfBounds {
            index,
            len: self.len(),
        })?;

        let image_path = self.image_path(id);
        let annotation_path = self.annotation_path(id);
        for path in [&image_path, &annotation_path] {
            if !path.is_file() {
                return Err(DataError::MissingSampleFile(path.clone()));
            }
        }
        trace!("加载样本 {index}: {id}");

        let origin = Vision::load_rgb(&image_path)?;
        let (width, height) = origin.dimensions();
        let mut annotation = parse_annotation(&annotation_path, &self.vocabulary)?;

        let resized = Vision::resize_square(&origin, self.image_size);
        if !annotation.is_empty() {
            let size = self.image_size as f32;
            annotation.rescale(size / width as f32, size / height as f32);
        }

        let (boxes, class_ids) = annotation.into_parts();
        let target = match self.mode {
            Mode::Train => Target::Train {
                labels: one_hot(&class_ids, self.vocabulary.len()),
            },
            Mode::Test => Target::Test {
                labels: one_hot(&class_ids, self.vocabulary.len()),
                id: id.clone(),
            },
            Mode::Eval => Target::Eval {
                class_ids,
                original_size: [height, width],
            },
        };

        Ok(Sample {
            image: (self.transform)(resized),
            boxes,
            target,
        })
    }

    /// 按索引顺序依次访问全部样本
    pub fn iter(&self) -> impl Iterator<Item = Result<Sample<T>, DataError>> + '_ {
        (0..self.len()).map(move |index| self.get(index))
    }
}

impl<T> fmt::Debug for VocDataset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VocDataset")
            .field("root", &self.root)
            .field("mode", &self.mode)
            .field("len", &self.ids.len())
            .field("num_classes", &self.vocabulary.len())
            .field("image_size", &self.image_size)
            .finish_non_exhaustive()
    }
}

/// 读取索引文件：每行一个 id，去掉首尾空白，跳过空行
fn load_index_file(path: &Path) -> Result<Vec<String>, DataError> {
    if !path.is_file() {
        return Err(DataError::MissingIndexFile(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let ids: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    if ids.is_empty() {
        warn!("索引文件中没有任何样本 id: {}", path.display());
    } else {
        debug!("从 {} 读取了 {} 个样本 id", path.display(), ids.len());
    }

    Ok(ids)
}
