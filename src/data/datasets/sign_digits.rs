//! 手语数字图像数据集
//!
//! 目录结构：
//! ```text
//! dataset/
//!   0/  <图像文件...>
//!   1/
//!   ...
//!   9/
//! ```
//! 子目录名即类别标签。每个条目都会尝试以灰度图解码，
//! 无法解码的条目（非图像文件、子目录等）被跳过并记录在 [`LoadReport`] 中。

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use ndarray::{Array1, Array2, Array3, Axis};

use crate::data::config::SignDigitsConfig;
use crate::data::error::DataError;
use crate::data::snapshot::TrainTestSplit;
use crate::data::split::stratified_split_indices;
use crate::vision::Vision;

/// 被跳过的目录条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// 单个类别目录的加载结果
#[derive(Debug, Clone)]
pub struct ClassImages {
    pub label: u8,
    pub images: Vec<Array2<u8>>,
    pub skipped: Vec<SkippedEntry>,
}

/// 整个数据集的加载报告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// 下标为类别，值为该类别成功加载的图像数
    pub class_counts: Vec<usize>,
    pub skipped: Vec<SkippedEntry>,
}

/// 加载 `<root>/<label>` 目录下所有能以灰度图解码的图像
///
/// 条目按文件名排序后依次解码；解码失败的条目被跳过，
/// 目录本身无法读取、或图像尺寸不等于 `image_shape` 时返回错误。
pub fn load_class_dir(
    root: &Path,
    label: u8,
    image_shape: (usize, usize),
) -> Result<ClassImages, DataError> {
    let dir = root.join(label.to_string());
    let unreadable = |source| DataError::DirectoryUnreadable {
        path: dir.clone(),
        source,
    };

    let mut paths = fs::read_dir(&dir)
        .map_err(unreadable)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(unreadable)?;
    paths.sort();

    let mut images = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();
    for path in paths {
        match Vision::load_luma_image(&path) {
            Ok(image) => {
                if image.dim() != image_shape {
                    return Err(DataError::ShapeMismatch {
                        path,
                        expected: image_shape,
                        got: image.dim(),
                    });
                }
                images.push(image);
            }
            Err(e) => {
                debug!("跳过 {:?}: {}", path, e);
                skipped.push(SkippedEntry {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(ClassImages {
        label,
        images,
        skipped,
    })
}

/// 手语数字数据集
///
/// 图像形状 [N, 高, 宽]（默认 400x400），像素为原始灰度值 0-255；
/// 标签形状 [N]，按类别升序排列。
#[derive(Debug, Clone)]
pub struct SignDigitsDataset {
    /// 图像数据 [N, H, W]
    images: Array3<u8>,
    /// 标签数据 [N]
    labels: Array1<u8>,
    report: LoadReport,
}

impl SignDigitsDataset {
    /// 以默认配置加载指定根目录下的数据集
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, DataError> {
        Self::load_with_config(&SignDigitsConfig::new(root))
    }

    /// 便捷 API：从当前工作目录下的 `dataset/` 加载
    pub fn load_default() -> Result<Self, DataError> {
        Self::load_with_config(&SignDigitsConfig::default())
    }

    /// 完整加载 API
    ///
    /// 依次加载类别 `0..num_classes` 的目录，并拼接为一个扁平的样本轴。
    pub fn load_with_config(config: &SignDigitsConfig) -> Result<Self, DataError> {
        config.validate()?;
        let (height, width) = config.image_shape();

        let mut per_class = Vec::with_capacity(config.num_classes);
        for label in 0..config.num_classes {
            // validate() 保证类别数不超过 256
            let label = label as u8;
            per_class.push(load_class_dir(&config.root, label, (height, width))?);
        }

        let class_counts: Vec<usize> = per_class.iter().map(|c| c.images.len()).collect();
        if let Some(&expected) = class_counts.first() {
            if let Some((label, &got)) = class_counts
                .iter()
                .enumerate()
                .find(|&(_, &n)| n != expected)
            {
                if config.require_balanced_classes {
                    return Err(DataError::ClassCountMismatch {
                        label: label as u8,
                        expected,
                        got,
                    });
                }
                warn!("各类别图像数量不一致: {:?}", class_counts);
            }
        }

        let total: usize = class_counts.iter().sum();
        let mut pixels = Vec::with_capacity(total * height * width);
        let mut labels = Vec::with_capacity(total);
        let mut skipped = Vec::new();
        for class in per_class {
            labels.extend(std::iter::repeat(class.label).take(class.images.len()));
            for image in &class.images {
                pixels.extend(image.iter().copied());
            }
            skipped.extend(class.skipped);
        }

        let images = Array3::from_shape_vec((total, height, width), pixels)?;
        let labels = Array1::from_vec(labels);

        info!(
            "加载了 {} 个样本（各类别: {:?}，跳过 {} 个条目）",
            total,
            class_counts,
            skipped.len()
        );

        Ok(Self {
            images,
            labels,
            report: LoadReport {
                class_counts,
                skipped,
            },
        })
    }

    /// 返回数据集中的样本数量
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// 数据集是否为空
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// 获取第 index 个样本
    ///
    /// # 返回
    /// (image, label) 元组，image 形状为 [H, W]
    pub fn get(&self, index: usize) -> Result<(Array2<u8>, u8), DataError> {
        if index >= self.len() {
            return Err(DataError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        let image = self.images.index_axis(Axis(0), index).to_owned();
        Ok((image, self.labels[index]))
    }

    /// 单张图像的形状 (高, 宽)
    pub fn image_shape(&self) -> (usize, usize) {
        let (_, height, width) = self.images.dim();
        (height, width)
    }

    /// 获取所有图像
    pub fn images(&self) -> &Array3<u8> {
        &self.images
    }

    /// 获取所有标签
    pub fn labels(&self) -> &Array1<u8> {
        &self.labels
    }

    /// 各类别成功加载的图像数
    pub fn class_counts(&self) -> &[usize] {
        &self.report.class_counts
    }

    /// 加载报告（含被跳过的条目）
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// 按标签分层划分训练集和测试集
    ///
    /// # 参数
    /// - `test_ratio`: 测试集比例 (0.0 - 1.0，不含端点)
    /// - `seed`: 随机种子
    pub fn train_test_split(
        &self,
        test_ratio: f64,
        seed: u64,
    ) -> Result<TrainTestSplit, DataError> {
        let labels = self
            .labels
            .as_slice()
            .ok_or_else(|| DataError::InvalidSplit("标签数组内存不连续".to_string()))?;
        let indices = stratified_split_indices(labels, test_ratio, seed)?;

        Ok(TrainTestSplit {
            x_train: self.images.select(Axis(0), &indices.train),
            x_test: self.images.select(Axis(0), &indices.test),
            y_train: self.labels.select(Axis(0), &indices.train),
            y_test: self.labels.select(Axis(0), &indices.test),
        })
    }
}

/// 加载、划分数据集并返回 (X_train, X_test, y_train, y_test)
///
/// 若配置了快照路径，划分结果同时写入该 npz 文件。
pub fn load_split(
    config: &SignDigitsConfig,
) -> Result<(Array3<u8>, Array3<u8>, Array1<u8>, Array1<u8>), DataError> {
    let dataset = SignDigitsDataset::load_with_config(config)?;
    let split = dataset.train_test_split(config.test_ratio, config.seed)?;
    if let Some(path) = &config.snapshot {
        split.save_npz(path)?;
        info!("划分结果已写入 {:?}", path);
    }
    Ok(split.into_tuple())
}
