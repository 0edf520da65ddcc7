//! 内置数据集
//!
//! - 手语数字：按类别分目录存放的 400x400 灰度图像（分类任务）

mod sign_digits;

pub use sign_digits::{
    ClassImages, LoadReport, SignDigitsDataset, SkippedEntry, load_class_dir, load_split,
};
