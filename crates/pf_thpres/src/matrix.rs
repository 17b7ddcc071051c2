// crates/pf_thpres/src/matrix.rs

//! 区域对阈值矩阵
//!
//! R 个平衡区域之间的阈值压力存成展平的 R×R 行主序数组，区域号
//! 0 基。矩阵始终对称，写入接口只提供成对写入。估算阶段固定使用
//! f64，发布查询表时按配置精度一次性转换（[`ThresholdMatrix::convert`]）。

use serde::{Deserialize, Serialize};

use pf_runtime::Scalar;

/// 展平的对称区域对矩阵
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMatrix<S: Scalar> {
    n_regions: usize,
    values: Vec<S>,
}

impl<S: Scalar> ThresholdMatrix<S> {
    /// 创建 R×R 全零矩阵
    pub fn zeros(n_regions: usize) -> Self {
        Self {
            n_regions,
            values: vec![S::ZERO; n_regions * n_regions],
        }
    }

    /// 平衡区域数 R
    #[inline]
    pub fn n_regions(&self) -> usize {
        self.n_regions
    }

    /// 展平后的元素个数 (R×R)
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为 0 区域的空矩阵
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 读取区域对 (ra, rb) 的条目，区域号 0 基
    #[inline]
    pub fn get(&self, ra: usize, rb: usize) -> S {
        self.values[ra * self.n_regions + rb]
    }

    /// 对称写入区域对的两个条目
    #[inline]
    pub fn set_pair(&mut self, ra: usize, rb: usize, value: S) {
        let n = self.n_regions;
        self.values[ra * n + rb] = value;
        self.values[rb * n + ra] = value;
    }

    /// 以最大值对称并入一个候选值
    #[inline]
    pub fn update_max_pair(&mut self, ra: usize, rb: usize, candidate: S) {
        if candidate > self.get(ra, rb) {
            self.set_pair(ra, rb, candidate);
        }
    }

    /// 与另一矩阵逐元素取最大值，消耗式，供归约合并使用
    pub fn merged_max(mut self, other: Self) -> Self {
        debug_assert_eq!(self.values.len(), other.values.len());
        for (a, b) in self.values.iter_mut().zip(other.values.iter()) {
            if *b > *a {
                *a = *b;
            }
        }
        self
    }

    /// 条目为正的无序区域对数量
    pub fn touched_pairs(&self) -> usize {
        let mut count = 0;
        for ra in 0..self.n_regions {
            for rb in (ra + 1)..self.n_regions {
                if self.get(ra, rb) > S::ZERO {
                    count += 1;
                }
            }
        }
        count
    }

    /// 只读展平数据
    #[inline]
    pub fn as_slice(&self) -> &[S] {
        &self.values
    }

    /// 可变展平数据，供分区归约就地更新
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [S] {
        &mut self.values
    }

    /// 转换到另一种标量精度
    pub fn convert<T: Scalar>(&self) -> ThresholdMatrix<T> {
        ThresholdMatrix {
            n_regions: self.n_regions,
            values: self
                .values
                .iter()
                .map(|v| T::from_config(v.to_config()))
                .collect(),
        }
    }

    /// 用外部展平数据整体替换矩阵内容，长度须为 R×R
    pub(crate) fn fill_from_config(&mut self, values: &[f64]) {
        debug_assert_eq!(self.values.len(), values.len());
        for (dst, src) in self.values.iter_mut().zip(values.iter()) {
            *dst = S::from_config(*src);
        }
    }
}

// =============================================================================
// 测试
// =============================================================================
