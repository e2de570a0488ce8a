//! 类别表单元测试

use std::fs;

use crate::assert_err;
use crate::data::datasets::VOC_CLASSES;
use crate::data::{ClassVocabulary, DataError};

#[test]
fn test_voc_vocabulary() {
    let vocabulary = ClassVocabulary::voc();

    assert_eq!(vocabulary.len(), 20);
    assert_eq!(vocabulary.id_of("aeroplane"), Some(0));
    assert_eq!(vocabulary.id_of("car"), Some(6));
    assert_eq!(vocabulary.id_of("tvmonitor"), Some(19));
    assert_eq!(vocabulary.id_of("unknowncat"), None);
    assert_eq!(vocabulary.name_of(14), Some("person"));
    assert_eq!(vocabulary.name_of(20), None);
    assert_eq!(ClassVocabulary::default(), vocabulary);
}

#[test]
fn test_vocabulary_is_bijection() {
    let vocabulary = ClassVocabulary::voc();
    for (id, name) in vocabulary.iter().enumerate() {
        assert_eq!(name, VOC_CLASSES[id]);
        assert_eq!(vocabulary.id_of(name), Some(id));
        assert_eq!(vocabulary.name_of(id), Some(name));
    }
}

#[test]
fn test_vocabulary_rejects_duplicates_and_empty() {
    assert_err!(
        ClassVocabulary::new(["cat", "dog", "cat"]),
        DataError::InvalidVocabulary(_)
    );
    assert_err!(
        ClassVocabulary::new(Vec::<String>::new()),
        DataError::InvalidVocabulary(_)
    );
}

#[test]
fn test_vocabulary_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("classes.txt");
    fs::write(&path, "truck\n  car \n\nbike\n").unwrap();

    let vocabulary = ClassVocabulary::from_file(&path).unwrap();
    assert_eq!(vocabulary.len(), 3);
    assert_eq!(vocabulary.id_of("car"), Some(1));
    assert_eq!(vocabulary.id_of("bike"), Some(2));
}

#[test]
fn test_vocabulary_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ClassVocabulary::from_file(dir.path().join("nope.txt"));
    assert_err!(result, DataError::IoError(_));
}

#[test]
fn test_vocabulary_serde() {
    let vocabulary = ClassVocabulary::new(["a", "b"]).unwrap();
    let json = serde_json::to_string(&vocabulary).unwrap();
    assert_eq!(json, r#"["a","b"]"#);

    let restored: ClassVocabulary = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, vocabulary);

    // 反序列化同样会检查重复
    assert!(serde_json::from_str::<ClassVocabulary>(r#"["a","a"]"#).is_err());
}

#[test]
fn test_vocabulary_equality_respects_order() {
    let a = ClassVocabulary::new(["cat", "dog"]).unwrap();
    let b = ClassVocabulary::new(["dog", "cat"]).unwrap();

    // 同样的名称，不同的 id
    assert_eq!(a.id_of("cat"), Some(0));
    assert_eq!(b.id_of("cat"), Some(1));
    assert_ne!(a, b);
    assert_eq!(a, ClassVocabulary::new(["cat", "dog"]).unwrap());
}
