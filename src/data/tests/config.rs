//! 配置单元测试

use std::fs;

use super::{VocFixture, voc_xml};
use crate::assert_err;
use crate::data::datasets::DEFAULT_IMAGE_SIZE;
use crate::data::{DataError, Mode, VocConfig, VocDataset};

#[test]
fn test_config_defaults() {
    let config: VocConfig =
        serde_json::from_str(r#"{ "root": "/data/VOC2007", "mode": "eval" }"#).unwrap();

    assert_eq!(config, VocConfig::new("/data/VOC2007", Mode::Eval));
    assert_eq!(config.image_size, DEFAULT_IMAGE_SIZE);
    assert_eq!(config.index_file, None);
    assert_eq!(config.classes_file, None);
}

#[test]
fn test_config_rejects_unknown_mode() {
    let result = serde_json::from_str::<VocConfig>(r#"{ "root": "/x", "mode": "validate" }"#);
    assert!(result.is_err());
}

#[test]
fn test_config_load_and_validate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("voc.json");

    fs::write(&path, r#"{ "root": "/x", "mode": "train", "image_size": 0 }"#).unwrap();
    assert_err!(
        VocConfig::load(&path),
        DataError::InvalidConfig("image_size 必须大于 0")
    );

    fs::write(&path, r#"{ "root": "/x", "mode": "train", "index_file": "  " }"#).unwrap();
    assert_err!(VocConfig::load(&path), DataError::InvalidConfig(_));

    fs::write(&path, "{ not json").unwrap();
    assert_err!(VocConfig::load(&path), DataError::ConfigParse(_));

    fs::write(&path, r#"{ "root": "/x", "mode": "test", "image_size": 320 }"#).unwrap();
    let config = VocConfig::load(&path).unwrap();
    assert_eq!(config.mode, Mode::Test);
    assert_eq!(config.image_size, 320);
}

#[test]
fn test_dataset_from_config() {
    let fixture = VocFixture::new();
    fixture.add_sample(
        "000007",
        100,
        100,
        &voc_xml(&[
            ("car", 0, [11.0, 11.0, 51.0, 51.0]),
            ("truck", 0, [21.0, 21.0, 61.0, 61.0]),
        ]),
    );
    fixture.write_index("val.txt", "000007\n");

    let classes_file = fixture.root().join("classes.txt");
    fs::write(&classes_file, "truck\ncar\n").unwrap();

    let config = VocConfig {
        image_size: 200,
        index_file: Some("val.txt".to_string()),
        classes_file: Some(classes_file),
        ..VocConfig::new(fixture.root(), Mode::Train)
    };
    let dataset = VocDataset::from_config(&config).unwrap();
    assert_eq!(dataset.image_size(), 200);
    assert_eq!(dataset.vocabulary().len(), 2);

    let sample = dataset.get(0).unwrap();
    let labels = sample.label_array();
    assert_eq!(labels.shape(), &[2, 2]);
    // car -> 1, truck -> 0
    assert_eq!(labels[[0, 1]], 1.0);
    assert_eq!(labels[[1, 0]], 1.0);
    assert_eq!(sample.boxes[0].x1, 20.0);
}

#[test]
fn test_dataset_from_invalid_config() {
    let fixture = VocFixture::new();
    fixture.write_index("trainval.txt", "a\n");

    let config = VocConfig {
        image_size: 0,
        ..VocConfig::new(fixture.root(), Mode::Train)
    };
    assert_err!(VocDataset::from_config(&config), DataError::InvalidConfig(_));
}
