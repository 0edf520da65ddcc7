//! 数据加载错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 数据加载相关错误
#[derive(Debug, Error)]
pub enum DataError {
    /// 类别目录不存在或无法读取
    #[error("无法读取目录 {path:?}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO 错误
    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    /// 图像尺寸与期望不符
    #[error("图像 {path:?} 形状不匹配: 期望 {expected:?}, 实际 {got:?}")]
    ShapeMismatch {
        path: PathBuf,
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// 组装数组时的形状错误
    #[error("数组形状错误: {0}")]
    ArrayShape(#[from] ndarray::ShapeError),

    /// 各类别图像数量不一致（仅在要求类别均衡时出现）
    #[error("类别 {label} 的图像数量不一致: 期望 {expected}, 实际 {got}")]
    ClassCountMismatch {
        label: u8,
        expected: usize,
        got: usize,
    },

    /// 索引越界
    #[error("索引越界: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// 无法完成分层划分
    #[error("无法划分数据集: {0}")]
    InvalidSplit(String),

    /// 配置非法
    #[error("配置错误: {0}")]
    InvalidConfig(String),

    /// 配置文件解析错误
    #[error("配置解析错误: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// npz 快照写入错误
    #[error("写入快照失败: {0}")]
    SnapshotWrite(#[from] ndarray_npy::WriteNpzError),

    /// npz 快照读取错误
    #[error("读取快照失败: {0}")]
    SnapshotRead(#[from] ndarray_npy::ReadNpzError),

    /// 快照中缺少指定数组
    #[error("快照中缺少数组: {0}")]
    MissingArray(String),
}
