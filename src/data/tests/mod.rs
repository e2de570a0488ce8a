mod config;
mod vocabulary;

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use tempfile::TempDir;

/// 临时目录中的 VOC 数据集，测试结束后自动删除
pub(super) struct VocFixture {
    dir: TempDir,
}

impl VocFixture {
    pub(super) fn new() -> Self {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        for sub in ["ImageSets/Main", "JPEGImages", "Annotations"] {
            fs::create_dir_all(dir.path().join(sub)).expect("创建子目录失败");
        }
        Self { dir }
    }

    pub(super) fn root(&self) -> &Path {
        self.dir.path()
    }

    /// 写入 `<id>.jpg`（纯色图）与 `<id>.xml`
    pub(super) fn add_sample(&self, id: &str, width: u32, height: u32, xml: &str) {
        self.add_image(id, width, height);
        self.add_annotation(id, xml);
    }

    pub(super) fn add_image(&self, id: &str, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([120, 60, 200]))
            .save(self.root().join("JPEGImages").join(format!("{id}.jpg")))
            .expect("写入图像失败");
    }

    pub(super) fn add_annotation(&self, id: &str, xml: &str) {
        fs::write(self.root().join("Annotations").join(format!("{id}.xml")), xml)
            .expect("写入标注失败");
    }

    pub(super) fn write_index(&self, file_name: &str, content: &str) {
        fs::write(self.root().join("ImageSets/Main").join(file_name), content)
            .expect("写入索引文件失败");
    }
}

/// 按 (类别名, difficult, [xmin, ymin, xmax, ymax]) 生成 VOC 标注文档
pub(super) fn voc_xml(objects: &[(&str, i32, [f32; 4])]) -> String {
    let mut xml = String::from(
        "<annotation>\n\t<folder>VOC2007</folder>\n\t<filename>000001.jpg</filename>\n",
    );
    for (name, difficult, [xmin, ymin, xmax, ymax]) in objects {
        xml.push_str(&format!(
            "\t<object>\n\t\t<name>{name}</name>\n\t\t<pose>Unspecified</pose>\n\
             \t\t<truncated>0</truncated>\n\t\t<difficult>{difficult}</difficult>\n\
             \t\t<bndbox>\n\t\t\t<xmin>{xmin}</xmin>\n\t\t\t<ymin>{ymin}</ymin>\n\
             \t\t\t<xmax>{xmax}</xmax>\n\t\t\t<ymax>{ymax}</ymax>\n\t\t</bndbox>\n\t</object>\n"
        ));
    }
    xml.push_str("</annotation>\n");
    xml
}
