//! PASCAL VOC 的 XML 标注解析
//!
//! 只读取根元素下的 `object` 节点（保持文档顺序），并按数据集惯例过滤：
//! - 类别名不在类别表中的 object 直接跳过；
//! - `difficult` 为 1 的 object 跳过。
//!
//! 保留下来的框坐标从 1 起始的像素坐标转换为 0 起始（每个边界各减 1）。

use std::path::Path;
use std::str::FromStr;

use ndarray::Array2;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use super::vocabulary::{ClassId, ClassVocabulary};
use crate::data::error::{AnnotationError, DataError};
use crate::data::transforms::{boxes_to_array, class_id_column};

/// 轴对齐的边界框，`(x1, y1)` 为左上角，`(x2, y2)` 为右下角
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// x 方向与 y 方向分别缩放（各向异性），与图像被拉伸到新尺寸时一致
    pub fn scale(&self, scale_x: f32, scale_y: f32) -> Self {
        Self {
            x1: self.x1 * scale_x,
            y1: self.y1 * scale_y,
            x2: self.x2 * scale_x,
            y2: self.y2 * scale_y,
        }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// `[x1, y1, x2, y2]`
    pub fn to_array(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// 过滤后的标注：框与类别 id 两个等长、一一对应的序列
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Annotation {
    boxes: Vec<BoundingBox>,
    classes: Vec<ClassId>,
}

impl Annotation {
    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn classes(&self) -> &[ClassId] {
        &self.classes
    }

    /// 保留下来的 object 数量
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// 所有框按 x、y 方向分别缩放；没有框时什么也不做
    pub fn rescale(&mut self, scale_x: f32, scale_y: f32) {
        for bbox in &mut self.boxes {
            *bbox = bbox.scale(scale_x, scale_y);
        }
    }

    /// 框矩阵，形状 `[k, 4]`
    pub fn boxes_array(&self) -> Array2<f32> {
        boxes_to_array(&self.boxes)
    }

    /// 类别 id 列，形状 `[k, 1]`（每行只有一个元素的旧式编码）
    pub fn class_id_array(&self) -> Array2<f32> {
        class_id_column(&self.classes)
    }

    pub fn into_parts(self) -> (Vec<BoundingBox>, Vec<ClassId>) {
        (self.boxes, self.classes)
    }

    fn push(&mut self, bbox: BoundingBox, class_id: ClassId) {
        self.boxes.push(bbox);
        self.classes.push(class_id);
    }
}

/// 解析单个标注文件
///
/// # 错误
/// - 文件不存在：[`DataError::MissingSampleFile`]
/// - XML 不合法，或未被过滤掉的 object 缺少必需子元素：[`DataError::MalformedAnnotation`]
pub fn parse_annotation(
    path: impl AsRef<Path>,
    vocabulary: &ClassVocabulary,
) -> Result<Annotation, DataError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataError::MissingSampleFile(path.to_path_buf()),
        _ => DataError::IoError(e),
    })?;

    parse_annotation_str(&content, vocabulary).map_err(|source| DataError::MalformedAnnotation {
        path: path.to_path_buf(),
        source,
    })
}

/// 解析已读入内存的标注文档
pub fn parse_annotation_str(
    xml: &str,
    vocabulary: &ClassVocabulary,
) -> Result<Annotation, AnnotationError> {
    let doc = Document::parse(xml)?;
    let mut annotation = Annotation::default();

    let objects = doc
        .root_element()
        .children()
        .filter(|node| node.has_tag_name("object"));

    for (object_index, object) in objects.enumerate() {
        let name = child(object, "name").ok_or(AnnotationError::MissingElement {
            object_index,
            element: "name",
        })?;
        // 类别不在表中时不再检查其余字段
        let Some(class_id) = vocabulary.id_of(name.text().unwrap_or_default().trim()) else {
            continue;
        };

        let difficult: i64 = parse_child(object, "difficult", object_index)?;
        if difficult == 1 {
            continue;
        }

        let bndbox = child(object, "bndbox").ok_or(AnnotationError::MissingElement {
            object_index,
            element: "bndbox",
        })?;
        let x1: f32 = parse_child(bndbox, "xmin", object_index)?;
        let y1: f32 = parse_child(bndbox, "ymin", object_index)?;
        let x2: f32 = parse_child(bndbox, "xmax", object_index)?;
        let y2: f32 = parse_child(bndbox, "ymax", object_index)?;

        annotation.push(
            BoundingBox::new(x1 - 1.0, y1 - 1.0, x2 - 1.0, y2 - 1.0),
            class_id,
        );
    }

    Ok(annotation)
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn parse_child<T: FromStr>(
    node: Node,
    element: &'static str,
    object_index: usize,
) -> Result<T, AnnotationError> {
    let text = child(node, element)
        .ok_or(AnnotationError::MissingElement {
            object_index,
            element,
        })?
        .text()
        .unwrap_or_default();

    text.trim()
        .parse()
        .map_err(|_| AnnotationError::InvalidNumber {
            object_index,
            element,
            value: text.to_string(),
        })
}
