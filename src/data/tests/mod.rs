mod sign_digits;

use std::path::Path;

use ndarray::Array2;

use crate::vision::Vision;

/// 在 `<root>/<label>/` 下生成 `count` 张尺寸为 `shape` 的灰度 png 图像
///
/// 第 i 张图像的像素值全部为 `label * 10 + i`，便于校验样本与标签的对应关系。
fn write_class_images(root: &Path, label: u8, count: usize, shape: (usize, usize)) {
    let dir = root.join(label.to_string());
    std::fs::create_dir_all(&dir).unwrap();
    for i in 0..count {
        let value = (label as usize * 10 + i) as u8;
        let image = Array2::from_elem(shape, value);
        Vision::save_luma_image(&image, dir.join(format!("{i:03}.png"))).unwrap();
    }
}

/// 生成 `num_classes` 个类别、每类 `per_class` 张图像的数据集目录
fn write_dataset(root: &Path, num_classes: u8, per_class: usize, shape: (usize, usize)) {
    for label in 0..num_classes {
        write_class_images(root, label, per_class, shape);
    }
}
