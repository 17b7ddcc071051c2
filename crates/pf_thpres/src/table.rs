// crates/pf_thpres/src/table.rs

//! 阈值压力查询表
//!
//! 初始化的最终产物。查询路径无锁、无错误分支、O(1):
//!
//! 1. 子系统未启用: 0
//! 2. 断层扩展给出确定答案: 直接返回
//! 3. 两单元同区域: 0
//! 4. 否则取最终矩阵的区域对条目
//!
//! 查询只需要 `&self`，重启注入需要 `&mut self`，因此放进 `Arc`
//! 共享之后表就不可再变。

use pf_foundation::{ensure, PfError, PfResult};
use pf_runtime::{CellIndex, Scalar};

use crate::fault::FaultThresholds;
use crate::matrix::ThresholdMatrix;
use crate::region::EquilRegionMap;

/// 阈值压力查询表
#[derive(Debug, Clone)]
pub struct ThresholdPressureTable<S: Scalar> {
    enabled: bool,
    regions: EquilRegionMap,
    matrix: ThresholdMatrix<S>,
    faults: Option<FaultThresholds>,
    /// 本地单元号到全局单元号的映射，只有断层扩展需要
    global_ids: Vec<usize>,
    restart_pending: bool,
}

impl<S: Scalar> ThresholdPressureTable<S> {
    /// 创建未启用的空表，一切查询返回 0
    pub(crate) fn disabled() -> Self {
        Self {
            enabled: false,
            regions: EquilRegionMap::empty(),
            matrix: ThresholdMatrix::zeros(0),
            faults: None,
            global_ids: Vec::new(),
            restart_pending: false,
        }
    }

    /// 由构建器装配启用的表
    pub(crate) fn assembled(
        regions: EquilRegionMap,
        matrix: ThresholdMatrix<S>,
        faults: Option<FaultThresholds>,
        global_ids: Vec<usize>,
        restart_pending: bool,
    ) -> Self {
        Self {
            enabled: true,
            regions,
            matrix,
            faults,
            global_ids,
            restart_pending,
        }
    }

    /// 查询两个相邻单元之间的阈值压力 [Pa]
    ///
    /// 纯读取，并发安全。单元号必须是本分区的有效单元号。
    pub fn threshold_pressure(&self, cell_a: CellIndex, cell_b: CellIndex) -> S {
        if !self.enabled {
            return S::ZERO;
        }

        if let Some(faults) = &self.faults {
            if let Some(value) =
                faults.resolve(self.global_ids[cell_a.get()], self.global_ids[cell_b.get()])
            {
                return S::from_config(value);
            }
        }

        let ra = self.regions.region(cell_a);
        let rb = self.regions.region(cell_b);
        if ra == rb {
            return S::ZERO;
        }
        self.matrix.get(ra, rb)
    }

    /// 注入重启文件里的最终矩阵
    ///
    /// 只有等待重启数据的表接受注入，正常构建完成的表拒绝。注入
    /// 长度必须等于 R×R。成功后表进入只读查询状态。
    pub fn set_from_restart(&mut self, values: &[f64]) -> PfResult<()> {
        ensure!(
            self.restart_pending,
            PfError::internal("阈值压力表不在等待重启数据的状态, 拒绝注入矩阵")
        );
        PfError::check_size("restart_thpres", self.matrix.len(), values.len())?;

        self.matrix.fill_from_config(values);
        self.restart_pending = false;
        Ok(())
    }

    /// 是否仍在等待重启注入
    #[inline]
    pub fn is_restart_pending(&self) -> bool {
        self.restart_pending
    }

    /// 子系统是否启用
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 平衡区域数 R
    #[inline]
    pub fn n_regions(&self) -> usize {
        self.regions.n_regions()
    }

    /// 只读展平矩阵，供检查点输出
    #[inline]
    pub fn data(&self) -> &[S] {
        self.matrix.as_slice()
    }
}

// =============================================================================
// 测试
// =============================================================================
