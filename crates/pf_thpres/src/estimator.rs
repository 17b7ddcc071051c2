// crates/pf_thpres/src/estimator.rs

//! 默认阈值估算
//!
//! 扫描本分区全部内部面，对跨区域的面取正上游流度各相中压力势差
//! 绝对值的最大者作为候选，按最大值对称并入区域对矩阵，最后通过
//! 分区通信器做一次全局逐元素最大值归约。
//!
//! # 设计原则
//!
//! 1. **纯读取扫描**: 扫描不修改任何输入，结果只依赖网格、区域
//!    映射与流动状态
//! 2. **策略可选**: 小规模串行，大规模 rayon fold/reduce；最大值
//!    合并满足结合律，两条路径给出完全相同的结果
//! 3. **归约恰好一次**: 所有分区都必须到达 `estimate` 末尾的集体
//!    归约，包括没有任何内部面的空分区

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use pf_foundation::PfResult;
use pf_grid::GridTopology;
use pf_runtime::{FaceIndex, PartitionComm};

use crate::matrix::ThresholdMatrix;
use crate::region::EquilRegionMap;
use crate::traits::InitialFlowState;

// =============================================================================
// 常量与选项
// =============================================================================

/// 可忽略流动的判定阈值: |面积 × 传导率| 低于该值的跨区域面不参与估算
pub const NEGLIGIBLE_FLOW: f64 = 1e-18;

/// 面扫描策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStrategy {
    /// 单线程顺序扫描
    Sequential,
    /// rayon fold/reduce 并行扫描
    Folded,
    /// 按面数自动选择
    #[default]
    Auto,
}

/// 估算器选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorOptions {
    /// 扫描策略
    pub strategy: ScanStrategy,
    /// Auto 策略切换到并行扫描的最小面数
    pub min_parallel_faces: usize,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self {
            strategy: ScanStrategy::Auto,
            min_parallel_faces: 1000,
        }
    }
}

/// 本分区的面扫描统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// 访问过的内部面数
    pub faces_visited: usize,
    /// 因流动可忽略被跳过的跨区域面数
    pub faces_negligible: usize,
}

impl ScanStats {
    fn merged(self, other: Self) -> Self {
        Self {
            faces_visited: self.faces_visited + other.faces_visited,
            faces_negligible: self.faces_negligible + other.faces_negligible,
        }
    }
}

// =============================================================================
// 估算器
// =============================================================================

/// 默认阈值估算器
///
/// 借用网格、区域映射与流动状态，[`estimate`](Self::estimate) 产出
/// 归约后全分区一致的默认矩阵。估算全程使用 f64，精度转换在发布
/// 查询表时进行。
pub struct DefaultThresholdEstimator<'a> {
    grid: &'a dyn GridTopology,
    state: &'a dyn InitialFlowState,
    regions: &'a EquilRegionMap,
    options: EstimatorOptions,
}

impl<'a> DefaultThresholdEstimator<'a> {
    /// 创建估算器
    pub fn new(
        grid: &'a dyn GridTopology,
        state: &'a dyn InitialFlowState,
        regions: &'a EquilRegionMap,
    ) -> Self {
        Self {
            grid,
            state,
            regions,
            options: EstimatorOptions::default(),
        }
    }

    /// 设置估算器选项
    pub fn with_options(mut self, options: EstimatorOptions) -> Self {
        self.options = options;
        self
    }

    /// 执行完整估算: 本地面扫描与全分区最大值归约
    ///
    /// 集体操作，所有分区必须同时调用。返回的矩阵在所有分区上
    /// 一致，统计只反映本分区的扫描。
    pub fn estimate(
        &self,
        comm: &dyn PartitionComm,
    ) -> PfResult<(ThresholdMatrix<f64>, ScanStats)> {
        let n_faces = self.grid.n_interior_faces();
        let (mut matrix, stats) = match self.options.strategy {
            ScanStrategy::Sequential => self.scan_sequential(n_faces),
            ScanStrategy::Folded => self.scan_folded(n_faces),
            ScanStrategy::Auto => {
                if n_faces < self.options.min_parallel_faces {
                    self.scan_sequential(n_faces)
                } else {
                    self.scan_folded(n_faces)
                }
            }
        };

        comm.max_reduce_inplace(matrix.as_mut_slice())?;
        Ok((matrix, stats))
    }

    /// 顺序扫描
    fn scan_sequential(&self, n_faces: usize) -> (ThresholdMatrix<f64>, ScanStats) {
        let mut acc = self.empty_accumulator();
        for face_idx in 0..n_faces {
            self.fold_face(&mut acc, face_idx);
        }
        acc
    }

    /// rayon fold/reduce 扫描，线程局部矩阵按最大值合并
    fn scan_folded(&self, n_faces: usize) -> (ThresholdMatrix<f64>, ScanStats) {
        (0..n_faces)
            .into_par_iter()
            .fold(
                || self.empty_accumulator(),
                |mut acc, face_idx| {
                    self.fold_face(&mut acc, face_idx);
                    acc
                },
            )
            .reduce(
                || self.empty_accumulator(),
                |a, b| (a.0.merged_max(b.0), a.1.merged(b.1)),
            )
    }

    fn empty_accumulator(&self) -> (ThresholdMatrix<f64>, ScanStats) {
        (
            ThresholdMatrix::zeros(self.regions.n_regions()),
            ScanStats::default(),
        )
    }

    /// 处理单个面，把候选值并入累积矩阵
    fn fold_face(&self, acc: &mut (ThresholdMatrix<f64>, ScanStats), face_idx: usize) {
        let (matrix, stats) = acc;
        stats.faces_visited += 1;

        let face = FaceIndex::new(face_idx);
        let (inside, outside) = self.grid.face_cells(face);
        let ra = self.regions.region(inside);
        let rb = self.regions.region(outside);
        if ra == rb {
            return;
        }

        let flow_scale = self.grid.face_area(face) * self.state.transmissibility(face);
        if flow_scale.abs() < NEGLIGIBLE_FLOW {
            stats.faces_negligible += 1;
            return;
        }

        // 候选值: 正上游流度各相中压力势差绝对值的最大者
        let mut max_difference = 0.0f64;
        for phase in 0..self.state.n_phases() {
            if self.state.upstream_mobility(face, phase) > 0.0 {
                max_difference =
                    max_difference.max(self.state.pressure_difference(face, phase).abs());
            }
        }

        matrix.update_max_pair(ra, rb, max_difference);
    }
}

// =============================================================================
// 测试
// =============================================================================
