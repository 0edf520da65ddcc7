//! # Sign Digits
//!
//! `sign_digits`用于将按类别分目录存放的手语数字灰度图像加载到内存，
//! 拼接为`[N, 高, 宽]`的像素数组，并按标签分层划分为训练集和测试集。
//!

pub mod data;
pub mod vision;

pub use data::{DataError, SignDigitsConfig, SignDigitsDataset, TrainTestSplit, load_split};
