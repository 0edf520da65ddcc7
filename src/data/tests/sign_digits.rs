//! 手语数字数据集单元测试
//!
//! 测试数据为临时目录中生成的小尺寸 png 图像。

use super::{write_class_images, write_dataset};
use crate::data::{DataError, SignDigitsConfig, SignDigitsDataset, load_class_dir, load_split};

const SHAPE: (usize, usize) = (8, 6);

fn small_config(root: &std::path::Path) -> SignDigitsConfig {
    SignDigitsConfig::new(root).image_size(SHAPE.0, SHAPE.1)
}

#[test]
fn test_load_class_dir_skips_non_images() {
    let dir = tempfile::tempdir().unwrap();
    write_class_images(dir.path(), 3, 4, SHAPE);
    let class_dir = dir.path().join("3");
    std::fs::write(class_dir.join("readme.txt"), "不是图像").unwrap();
    std::fs::write(class_dir.join("broken.png"), [0u8, 1, 2, 3]).unwrap();
    std::fs::create_dir(class_dir.join("nested")).unwrap();

    let class = load_class_dir(dir.path(), 3, SHAPE).expect("加载类别目录失败");

    assert_eq!(class.label, 3);
    assert_eq!(class.images.len(), 4);
    assert_eq!(class.skipped.len(), 3);
    let mut skipped: Vec<_> = class
        .skipped
        .iter()
        .map(|s| s.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    skipped.sort();
    assert_eq!(skipped, vec!["broken.png", "nested", "readme.txt"]);
}

#[test]
fn test_load_class_dir_detects_format_from_content() {
    let dir = tempfile::tempdir().unwrap();
    write_class_images(dir.path(), 0, 2, SHAPE);
    let class_dir = dir.path().join("0");
    std::fs::copy(class_dir.join("000.png"), class_dir.join("img_noext")).unwrap();
    std::fs::copy(class_dir.join("000.png"), class_dir.join("photo.jpg")).unwrap();
    std::fs::write(class_dir.join("readme.txt"), "不是图像").unwrap();
    std::fs::write(class_dir.join("broken.png"), [0u8, 1, 2, 3]).unwrap();
    std::fs::create_dir(class_dir.join("nested")).unwrap();

    let class = load_class_dir(dir.path(), 0, SHAPE).expect("加载类别目录失败");

    // 2 张原图 + 无扩展名 + 扩展名错误的 png 均应被加载
    assert_eq!(class.images.len(), 4);
    assert!(class.images.iter().all(|img| img.dim() == SHAPE));
    let mut skipped: Vec<_> = class
        .skipped
        .iter()
        .map(|s| s.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    skipped.sort();
    assert_eq!(skipped, vec!["broken.png", "nested", "readme.txt"]);
}

#[test]
fn test_load_class_dir_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    write_class_images(dir.path(), 1, 5, SHAPE);

    let class = load_class_dir(dir.path(), 1, SHAPE).unwrap();
    // 文件 000.png..004.png 的像素值依次为 10..14
    let firsts: Vec<u8> = class.images.iter().map(|img| img[[0, 0]]).collect();
    assert_eq!(firsts, vec![10, 11, 12, 13, 14]);
}

#[test]
fn test_load_class_dir_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_class_dir(dir.path(), 0, SHAPE);
    assert!(matches!(
        result,
        Err(DataError::DirectoryUnreadable { .. })
    ));
}

#[test]
fn test_load_class_dir_wrong_image_size() {
    let dir = tempfile::tempdir().unwrap();
    write_class_images(dir.path(), 2, 1, (5, 5));

    let result = load_class_dir(dir.path(), 2, SHAPE);
    match result {
        Err(DataError::ShapeMismatch { expected, got, .. }) => {
            assert_eq!(expected, SHAPE);
            assert_eq!(got, (5, 5));
        }
        other => panic!("应返回 ShapeMismatch，实际: {:?}", other),
    }
}

#[test]
fn test_dataset_load() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 10, 3, SHAPE);

    let dataset = SignDigitsDataset::load_with_config(&small_config(dir.path())).unwrap();

    assert_eq!(dataset.len(), 30);
    assert!(!dataset.is_empty());
    assert_eq!(dataset.images().dim(), (30, SHAPE.0, SHAPE.1));
    assert_eq!(dataset.labels().len(), dataset.images().dim().0);
    assert_eq!(dataset.image_shape(), SHAPE);
    assert_eq!(dataset.class_counts(), &[3; 10]);
    assert!(dataset.report().skipped.is_empty());

    // 标签按类别升序、每类重复图像数次
    let expected: Vec<u8> = (0..10u8).flat_map(|l| [l, l, l]).collect();
    assert_eq!(dataset.labels().to_vec(), expected);
}

#[test]
fn test_dataset_get_sample() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 10, 3, SHAPE);
    let dataset = SignDigitsDataset::load_with_config(&small_config(dir.path())).unwrap();

    // 第 7 个样本是类别 2 的第 1 张图像
    let (image, label) = dataset.get(7).expect("获取样本失败");
    assert_eq!(image.dim(), SHAPE);
    assert_eq!(label, 2);
    assert!(image.iter().all(|&p| p == 21));

    let result = dataset.get(30);
    assert!(matches!(
        result,
        Err(DataError::IndexOutOfBounds { index: 30, len: 30 })
    ));
}

#[test]
fn test_dataset_missing_class_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 9, 3, SHAPE);

    let result = SignDigitsDataset::load_with_config(&small_config(dir.path()));
    assert!(matches!(
        result,
        Err(DataError::DirectoryUnreadable { .. })
    ));
}

#[test]
fn test_dataset_empty_class_does_not_fail_loading() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 10, 4, SHAPE);
    let empty_dir = dir.path().join("5");
    std::fs::remove_dir_all(&empty_dir).unwrap();
    std::fs::create_dir(&empty_dir).unwrap();
    std::fs::write(empty_dir.join("notes.txt"), "无图像").unwrap();

    let dataset = SignDigitsDataset::load_with_config(&small_config(dir.path())).unwrap();
    assert_eq!(dataset.len(), 36);
    assert_eq!(dataset.class_counts()[5], 0);
    assert_eq!(dataset.report().skipped.len(), 1);
    assert!(dataset.labels().iter().all(|&l| l != 5));
}

#[test]
fn test_dataset_unbalanced_classes() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 10, 4, SHAPE);
    std::fs::remove_file(dir.path().join("7").join("003.png")).unwrap();

    // 默认允许数量不一致
    let config = small_config(dir.path());
    let dataset = SignDigitsDataset::load_with_config(&config).unwrap();
    assert_eq!(dataset.len(), 39);
    assert_eq!(dataset.class_counts()[7], 3);

    // 要求均衡时立即报错
    let result = SignDigitsDataset::load_with_config(&config.require_balanced_classes(true));
    match result {
        Err(DataError::ClassCountMismatch {
            label,
            expected,
            got,
        }) => {
            assert_eq!((label, expected, got), (7, 4, 3));
        }
        other => panic!("应返回 ClassCountMismatch，实际: {:?}", other),
    }
}

#[test]
fn test_dataset_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(dir.path()).num_classes(0);
    let result = SignDigitsDataset::load_with_config(&config);
    assert!(matches!(result, Err(DataError::InvalidConfig(_))));
}

#[test]
fn test_train_test_split_keeps_correspondence() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 10, 5, SHAPE);
    let dataset = SignDigitsDataset::load_with_config(&small_config(dir.path())).unwrap();

    let split = dataset.train_test_split(0.2, 42).expect("划分失败");
    assert_eq!(split.train_len(), 40);
    assert_eq!(split.test_len(), 10);
    assert_eq!(split.x_train.dim(), (40, SHAPE.0, SHAPE.1));
    assert_eq!(split.x_test.dim(), (10, SHAPE.0, SHAPE.1));

    // 像素值 = label * 10 + i，故 像素 / 10 应等于标签
    for (x, y) in [(&split.x_train, &split.y_train), (&split.x_test, &split.y_test)] {
        for (image, &label) in x.outer_iter().zip(y.iter()) {
            assert!(image.iter().all(|&p| p / 10 == label));
        }
    }
    // 测试集中每个类别各 1 个
    for label in 0..10u8 {
        assert_eq!(split.y_test.iter().filter(|&&l| l == label).count(), 1);
    }
}

#[test]
fn test_train_test_split_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 10, 5, SHAPE);
    let config = small_config(dir.path());

    let split1 = SignDigitsDataset::load_with_config(&config)
        .unwrap()
        .train_test_split(0.2, 42)
        .unwrap();
    let split2 = SignDigitsDataset::load_with_config(&config)
        .unwrap()
        .train_test_split(0.2, 42)
        .unwrap();
    assert_eq!(split1, split2);
}

#[test]
fn test_load_split_with_single_sample_class() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 10, 5, SHAPE);
    for i in 1..5 {
        std::fs::remove_file(dir.path().join("4").join(format!("{i:03}.png"))).unwrap();
    }

    // 加载成功，但类别 4 只剩 1 个样本，无法分层
    let result = load_split(&small_config(dir.path()));
    assert!(matches!(result, Err(DataError::InvalidSplit(_))));
}

#[test]
fn test_load_split_writes_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("dataset");
    write_dataset(&data_root, 10, 5, SHAPE);
    let snapshot = dir.path().join("Xs_and_ys.npz");

    // 未配置快照时不写文件
    let (x_train, x_test, y_train, y_test) = load_split(&small_config(&data_root)).unwrap();
    assert!(!snapshot.exists());

    let config = small_config(&data_root).snapshot(&snapshot);
    load_split(&config).unwrap();
    assert!(snapshot.exists());

    let loaded = crate::data::TrainTestSplit::load_npz(&snapshot).unwrap();
    assert_eq!(loaded.x_train, x_train);
    assert_eq!(loaded.x_test, x_test);
    assert_eq!(loaded.y_train, y_train);
    assert_eq!(loaded.y_test, y_test);
}
