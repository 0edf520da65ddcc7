/*
 * @Description  : 分层随机划分（stratified split）
 *
 * 与 scikit-learn 的 `train_test_split(stratify=y)` 语义一致：
 * - 测试集大小 n_test = ceil(test_ratio * N)，训练集 n_train = N - n_test
 * - 每类分到的样本数取多元超几何分布的近似众数，余量随机分给小数部分最大的类别
 * - 类内先打乱再切分，最后两个划分再各自打乱
 */

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::data::error::DataError;

/// 划分后的样本索引
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// 按标签分层划分，返回训练集与测试集的样本索引
///
/// # 参数
/// - `labels`: 每个样本的类别
/// - `test_ratio`: 测试集比例，须在 (0, 1) 之间
/// - `seed`: 随机种子，相同输入与种子得到相同划分
pub fn stratified_split_indices(
    labels: &[u8],
    test_ratio: f64,
    seed: u64,
) -> Result<SplitIndices, DataError> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(DataError::InvalidSplit(format!(
            "test_ratio 须在 (0, 1) 之间，实际为 {test_ratio}"
        )));
    }

    let n_samples = labels.len();
    let n_test = (test_ratio * n_samples as f64).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);
    if n_train == 0 || n_test == 0 {
        return Err(DataError::InvalidSplit(format!(
            "样本数 {n_samples}、test_ratio {test_ratio} 将导致空的训练集或测试集"
        )));
    }

    // 按类别收集样本索引（类别升序、类内保持原顺序）
    let mut class_indices: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        class_indices.entry(label).or_default().push(idx);
    }
    let class_counts: Vec<usize> = class_indices.values().map(Vec::len).collect();
    let n_classes = class_counts.len();

    if let Some((&label, members)) = class_indices.iter().find(|(_, v)| v.len() < 2) {
        return Err(DataError::InvalidSplit(format!(
            "类别 {label} 仅有 {} 个样本，每个类别至少需要 2 个样本",
            members.len()
        )));
    }
    if n_train < n_classes {
        return Err(DataError::InvalidSplit(format!(
            "训练集大小 {n_train} 须不小于类别数 {n_classes}"
        )));
    }
    if n_test < n_classes {
        return Err(DataError::InvalidSplit(format!(
            "测试集大小 {n_test} 须不小于类别数 {n_classes}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let train_counts = approximate_mode(&class_counts, n_train, &mut rng);
    let remaining: Vec<usize> = class_counts
        .iter()
        .zip(&train_counts)
        .map(|(&c, &t)| c - t)
        .collect();
    let test_counts = approximate_mode(&remaining, n_test, &mut rng);

    let mut train = Vec::with_capacity(n_train);
    let mut test = Vec::with_capacity(n_test);
    for (i, members) in class_indices.values().enumerate() {
        let mut members = members.clone();
        members.shuffle(&mut rng);
        let n_i = train_counts[i].min(members.len());
        let t_i = test_counts[i].min(members.len() - n_i);
        train.extend_from_slice(&members[..n_i]);
        test.extend_from_slice(&members[n_i..n_i + t_i]);
    }
    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Ok(SplitIndices { train, test })
}

/// 在总数为 `class_counts` 之和的各类样本中不放回抽取 `n_draws` 个，
/// 计算每类抽取数量的近似众数
///
/// 先按比例向下取整，剩余名额按小数部分从大到小分配；
/// 小数部分相同的类别之间随机挑选。
pub(crate) fn approximate_mode(
    class_counts: &[usize],
    n_draws: usize,
    rng: &mut StdRng,
) -> Vec<usize> {
    let total: usize = class_counts.iter().sum();
    if total == 0 {
        return vec![0; class_counts.len()];
    }

    let continuous: Vec<f64> = class_counts
        .iter()
        .map(|&c| c as f64 / total as f64 * n_draws as f64)
        .collect();
    let mut floored: Vec<usize> = continuous.iter().map(|c| c.floor() as usize).collect();
    let mut need_to_add = n_draws.saturating_sub(floored.iter().sum());

    if need_to_add > 0 {
        let remainder: Vec<f64> = continuous
            .iter()
            .zip(&floored)
            .map(|(&c, &f)| c - f as f64)
            .collect();
        let mut values = remainder.clone();
        values.sort_by(|a, b| b.total_cmp(a));
        values.dedup();

        for value in values {
            let candidates: Vec<usize> = remainder
                .iter()
                .enumerate()
                .filter(|&(_, &r)| r == value)
                .map(|(i, _)| i)
                .collect();
            let add_now = candidates.len().min(need_to_add);
            for &i in candidates.choose_multiple(rng, add_now) {
                floored[i] += 1;
            }
            need_to_add -= add_now;
            if need_to_add == 0 {
                break;
            }
        }
    }

    floored
}
