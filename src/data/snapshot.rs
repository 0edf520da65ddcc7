//! 划分结果及其 npz 快照
//!
//! 快照与 NumPy 的 `np.savez_compressed` 兼容，固定使用以下键：
//! `X_train`、`y_train`、`X_test`、`y_test`。

use std::fs::File;
use std::io::{BufWriter, Read, Seek};
use std::path::Path;

use ndarray::{Array1, Array3, ArrayBase, Dimension, OwnedRepr};
use ndarray_npy::{NpzReader, NpzWriter};

use crate::data::error::DataError;

const KEY_X_TRAIN: &str = "X_train";
const KEY_Y_TRAIN: &str = "y_train";
const KEY_X_TEST: &str = "X_test";
const KEY_Y_TEST: &str = "y_test";

/// 训练集/测试集划分结果
///
/// 图像形状为 [N, 高, 宽]，标签形状为 [N]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub x_train: Array3<u8>,
    pub x_test: Array3<u8>,
    pub y_train: Array1<u8>,
    pub y_test: Array1<u8>,
}

impl TrainTestSplit {
    /// 训练集样本数
    pub fn train_len(&self) -> usize {
        self.y_train.len()
    }

    /// 测试集样本数
    pub fn test_len(&self) -> usize {
        self.y_test.len()
    }

    /// 拆成 (X_train, X_test, y_train, y_test) 四元组
    pub fn into_tuple(self) -> (Array3<u8>, Array3<u8>, Array1<u8>, Array1<u8>) {
        (self.x_train, self.x_test, self.y_train, self.y_test)
    }

    /// 以压缩 npz 格式写入本地文件
    pub fn save_npz(&self, path: impl AsRef<Path>) -> Result<(), DataError> {
        let file = File::create(path)?;
        let mut npz = NpzWriter::new_compressed(BufWriter::new(file));
        npz.add_array(KEY_X_TRAIN, &self.x_train)?;
        npz.add_array(KEY_Y_TRAIN, &self.y_train)?;
        npz.add_array(KEY_X_TEST, &self.x_test)?;
        npz.add_array(KEY_Y_TEST, &self.y_test)?;
        npz.finish()?;
        Ok(())
    }

    /// 从 npz 文件读取划分结果
    pub fn load_npz(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let mut npz = NpzReader::new(File::open(path)?)?;
        Ok(Self {
            x_train: read_array(&mut npz, KEY_X_TRAIN)?,
            x_test: read_array(&mut npz, KEY_X_TEST)?,
            y_train: read_array(&mut npz, KEY_Y_TRAIN)?,
            y_test: read_array(&mut npz, KEY_Y_TEST)?,
        })
    }
}

/// 读取名为 `key` 的数组，兼容带或不带 `.npy` 后缀的条目名
fn read_array<R, D>(
    npz: &mut NpzReader<R>,
    key: &str,
) -> Result<ArrayBase<OwnedRepr<u8>, D>, DataError>
where
    R: Read + Seek,
    D: Dimension,
{
    let with_ext = format!("{key}.npy");
    let name = npz
        .names()?
        .into_iter()
        .find(|n| n == key || *n == with_ext)
        .ok_or_else(|| DataError::MissingArray(key.to_string()))?;
    Ok(npz.by_name(&name)?)
}
