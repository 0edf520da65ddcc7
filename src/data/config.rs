/*
 * @Description  : SignDigitsConfig - 手语数字数据集的加载与划分配置
 *
 * 默认值即历史上的固定常量：
 * - 数据根目录 `dataset/`，子目录 `0`..`9`
 * - 图像尺寸 400x400
 * - 测试集比例 0.2，随机种子 42
 */

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::error::DataError;

/// 默认数据根目录
pub const DEFAULT_ROOT: &str = "dataset";
/// 默认类别数（数字 0-9）
pub const DEFAULT_NUM_CLASSES: usize = 10;
/// 默认图像边长
pub const DEFAULT_IMAGE_SIZE: usize = 400;
/// 默认测试集比例
pub const DEFAULT_TEST_RATIO: f64 = 0.2;
/// 默认随机种子
pub const DEFAULT_SEED: u64 = 42;

/// 数据集加载与划分配置
///
/// # 示例
/// ```ignore
/// let config = SignDigitsConfig::new("dataset")
///     .image_size(400, 400)
///     .test_ratio(0.2)
///     .seed(42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignDigitsConfig {
    pub root: PathBuf,
    pub num_classes: usize,
    pub image_height: usize,
    pub image_width: usize,
    pub test_ratio: f64,
    pub seed: u64,
    /// 为 true 时，各类别图像数量不一致直接报错
    pub require_balanced_classes: bool,
    /// 若设置，划分完成后将结果写入该 npz 文件
    pub snapshot: Option<PathBuf>,
}

impl Default for SignDigitsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            num_classes: DEFAULT_NUM_CLASSES,
            image_height: DEFAULT_IMAGE_SIZE,
            image_width: DEFAULT_IMAGE_SIZE,
            test_ratio: DEFAULT_TEST_RATIO,
            seed: DEFAULT_SEED,
            require_balanced_classes: false,
            snapshot: None,
        }
    }
}

impl SignDigitsConfig {
    /// 以指定根目录创建配置，其余项取默认值
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// 从 JSON 文件读取配置，缺省字段取默认值
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// 设置类别数
    pub fn num_classes(mut self, num_classes: usize) -> Self {
        self.num_classes = num_classes;
        self
    }

    /// 设置期望的图像尺寸（高、宽）
    pub fn image_size(mut self, height: usize, width: usize) -> Self {
        self.image_height = height;
        self.image_width = width;
        self
    }

    /// 设置测试集比例
    pub fn test_ratio(mut self, test_ratio: f64) -> Self {
        self.test_ratio = test_ratio;
        self
    }

    /// 设置随机种子（用于划分）
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// 设置是否要求各类别图像数量一致
    pub fn require_balanced_classes(mut self, require: bool) -> Self {
        self.require_balanced_classes = require;
        self
    }

    /// 设置 npz 快照路径
    pub fn snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot = Some(path.into());
        self
    }

    /// 期望的图像形状 (高, 宽)
    pub fn image_shape(&self) -> (usize, usize) {
        (self.image_height, self.image_width)
    }

    /// 检查配置是否合法
    pub fn validate(&self) -> Result<(), DataError> {
        if self.num_classes == 0 || self.num_classes > usize::from(u8::MAX) + 1 {
            return Err(DataError::InvalidConfig(format!(
                "num_classes 须在 [1, 256] 之间，实际为 {}",
                self.num_classes
            )));
        }
        if self.image_height == 0 || self.image_width == 0 {
            return Err(DataError::InvalidConfig(format!(
                "图像尺寸须大于 0，实际为 {}x{}",
                self.image_height, self.image_width
            )));
        }
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(DataError::InvalidConfig(format!(
                "test_ratio 须在 (0, 1) 之间，实际为 {}",
                self.test_ratio
            )));
        }
        Ok(())
    }
}
