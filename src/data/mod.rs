//! 数据加载模块
//!
//! 提供手语数字数据集的加载、分层划分与快照功能。
//!
//! # 主要组件
//!
//! - [`SignDigitsDataset`]: 按类别分目录存放的手语数字图像数据集
//! - [`SignDigitsConfig`]: 数据根目录、图像尺寸、划分比例与随机种子等配置
//! - [`stratified_split_indices`]: 按标签分层的随机划分
//! - [`TrainTestSplit`]: 划分结果，可存取为 npz 快照
//! - [`DataError`]: 数据加载错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use sign_digits::data::{SignDigitsConfig, load_split};
//!
//! let config = SignDigitsConfig::new("dataset").seed(42);
//! let (x_train, x_test, y_train, y_test) = load_split(&config)?;
//! ```

pub mod config;
pub mod datasets;
pub mod error;
pub mod snapshot;
pub mod split;

#[cfg(test)]
mod tests;

// Re-exports
pub use config::SignDigitsConfig;
pub use datasets::{LoadReport, SignDigitsDataset, SkippedEntry, load_class_dir, load_split};
pub use error::DataError;
pub use snapshot::TrainTestSplit;
pub use split::{SplitIndices, stratified_split_indices};
