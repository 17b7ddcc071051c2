// crates/pf_thpres/src/builder.rs

//! 构建器与精度分发
//!
//! [`ThresholdPressureBuilder`] 收集注入的协作对象（网格、流动状态、
//! 区域属性、断层集合、分区通信器），按初始化顺序装配查询表:
//! 区域映射、断层扩展、重启则带零矩阵提前返回、默认估算、显式覆盖。
//!
//! 矩阵精度由配置决定: `build::<S>()` 静态选择标量类型，
//! `build_dyn()` 按 [`Precision`] 分发到 [`DynThresholdTable`]
//! trait 对象，全 f64 的配置世界在这一层一次性转换。
//!
//! # 示例
//!
//! ```
//! use pf_config::{EquilDims, RegionPairRule, ThresholdPressureOptions};
//! use pf_grid::CartesianGrid;
//! use pf_runtime::FaceIndex;
//! use pf_thpres::builder::ThresholdPressureBuilder;
//! use pf_thpres::traits::InitialFlowState;
//!
//! struct SinglePhase;
//!
//! impl InitialFlowState for SinglePhase {
//!     fn n_phases(&self) -> usize { 1 }
//!     fn transmissibility(&self, _: FaceIndex) -> f64 { 1e-3 }
//!     fn upstream_mobility(&self, _: FaceIndex, _: usize) -> f64 { 0.8 }
//!     fn pressure_difference(&self, _: FaceIndex, _: usize) -> f64 { 2.5e5 }
//! }
//!
//! let grid = CartesianGrid::new(2, 1, 1.0, 1.0).unwrap();
//! let options = ThresholdPressureOptions {
//!     active: true,
//!     rules: vec![RegionPairRule::defaulted(1, 2)],
//!     ..Default::default()
//! };
//!
//! let (table, summary) = ThresholdPressureBuilder::new(options)
//!     .with_grid(&grid)
//!     .with_flow_state(&SinglePhase)
//!     .with_region_attributes(&[1, 2])
//!     .with_equil_dims(EquilDims { num_equil_regions: 2 })
//!     .build::<f64>()
//!     .unwrap();
//!
//! assert_eq!(summary.n_regions, 2);
//! assert_eq!(table.data()[1], 2.5e5);
//! ```

use std::any::TypeId;
use std::fmt;

use serde::{Deserialize, Serialize};

use pf_config::{
    EquilDims, FaultCollection, Precision, ThresholdPressureOptions,
};
use pf_foundation::{ensure, require, PfError, PfResult};
use pf_grid::GridTopology;
use pf_runtime::{cell, PartitionComm, Scalar, SerialComm};

use crate::estimator::{DefaultThresholdEstimator, EstimatorOptions};
use crate::fault::FaultThresholds;
use crate::matrix::ThresholdMatrix;
use crate::overrides::apply_region_barriers;
use crate::region::EquilRegionMap;
use crate::table::ThresholdPressureTable;
use crate::traits::InitialFlowState;

// =============================================================================
// 初始化摘要
// =============================================================================

/// 初始化摘要
///
/// 核心层不打印日志，构建过程的可观测信息以结构化数值返回，
/// 由应用层决定呈现方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitSummary {
    /// 子系统是否启用
    pub enabled: bool,
    /// 平衡区域数 R
    pub n_regions: usize,
    /// 参与归约的分区数
    pub n_partitions: usize,
    /// 本分区扫描过的内部面数
    pub faces_visited: usize,
    /// 本分区因流动可忽略被跳过的跨区域面数
    pub faces_negligible: usize,
    /// 归约后默认矩阵中估算出正值的无序区域对数
    pub region_pairs_touched: usize,
    /// 在本分区面上实际落盘的障壁区域对数
    pub barrier_rules_applied: usize,
    /// 匹配到断层的 THPRESFT 记录数
    pub fault_records_matched: usize,
    /// 未匹配任何断层的 THPRESFT 记录数
    pub fault_records_unmatched: usize,
    /// 是否在等待重启注入
    pub restart_pending: bool,
}

impl fmt::Display for InitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.enabled {
            return write!(f, "阈值压力: 未启用");
        }
        write!(
            f,
            "阈值压力: {} 区域, {} 分区, 扫描 {} 面 (忽略 {}), 估算 {} 区域对, 落盘 {} 障壁",
            self.n_regions,
            self.n_partitions,
            self.faces_visited,
            self.faces_negligible,
            self.region_pairs_touched,
            self.barrier_rules_applied,
        )?;
        if self.restart_pending {
            write!(f, ", 等待重启注入")?;
        }
        Ok(())
    }
}

// =============================================================================
// 运行时精度分发
// =============================================================================

/// 对象安全的查询表接口
///
/// 当矩阵精度来自运行期配置时，应用层持有 `Box<dyn DynThresholdTable>`
/// 而不感知具体标量类型。接口全部以 f64 与 usize 表达。
pub trait DynThresholdTable: Send + Sync {
    /// 查询两个本地单元之间的阈值压力 [Pa]
    fn threshold_pressure(&self, cell_a: usize, cell_b: usize) -> f64;

    /// 注入重启文件里的最终矩阵
    fn set_from_restart(&mut self, values: &[f64]) -> PfResult<()>;

    /// 展平矩阵的 f64 拷贝，供重启文件写出
    fn data_f64(&self) -> Vec<f64>;

    /// 子系统是否启用
    fn is_enabled(&self) -> bool;

    /// 平衡区域数 R
    fn n_regions(&self) -> usize;

    /// 矩阵的实际存储精度
    fn precision(&self) -> Precision;
}

impl<S: Scalar> DynThresholdTable for ThresholdPressureTable<S> {
    fn threshold_pressure(&self, cell_a: usize, cell_b: usize) -> f64 {
        ThresholdPressureTable::threshold_pressure(self, cell(cell_a), cell(cell_b)).to_config()
    }

    fn set_from_restart(&mut self, values: &[f64]) -> PfResult<()> {
        ThresholdPressureTable::set_from_restart(self, values)
    }

    fn data_f64(&self) -> Vec<f64> {
        self.data().iter().map(|v| v.to_config()).collect()
    }

    fn is_enabled(&self) -> bool {
        ThresholdPressureTable::is_enabled(self)
    }

    fn n_regions(&self) -> usize {
        ThresholdPressureTable::n_regions(self)
    }

    fn precision(&self) -> Precision {
        if TypeId::of::<S>() == TypeId::of::<f32>() {
            Precision::F32
        } else {
            Precision::F64
        }
    }
}

// =============================================================================
// 构建器
// =============================================================================

/// 阈值压力查询表构建器
///
/// 协作对象以借用注入，构建完成后表自持有全部数据。通信器缺省为
/// [`SerialComm`]，单分区运行不需要额外配置。
pub struct ThresholdPressureBuilder<'a> {
    options: ThresholdPressureOptions,
    grid: Option<&'a dyn GridTopology>,
    state: Option<&'a dyn InitialFlowState>,
    attributes: Option<&'a [i32]>,
    equil_dims: EquilDims,
    faults: Option<&'a FaultCollection>,
    comm: &'a dyn PartitionComm,
    estimator_options: EstimatorOptions,
}

impl<'a> ThresholdPressureBuilder<'a> {
    /// 以阈值压力选项创建构建器
    pub fn new(options: ThresholdPressureOptions) -> Self {
        Self {
            options,
            grid: None,
            state: None,
            attributes: None,
            equil_dims: EquilDims::default(),
            faults: None,
            comm: &SerialComm,
            estimator_options: EstimatorOptions::default(),
        }
    }

    /// 注入网格拓扑
    pub fn with_grid(mut self, grid: &'a dyn GridTopology) -> Self {
        self.grid = Some(grid);
        self
    }

    /// 注入初始流动状态
    pub fn with_flow_state(mut self, state: &'a dyn InitialFlowState) -> Self {
        self.state = Some(state);
        self
    }

    /// 注入 1 基区域属性数组 (EQLNUM)，按全局单元编号寻址
    pub fn with_region_attributes(mut self, attributes: &'a [i32]) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// 设置平衡区域维度声明 (EQLDIMS)
    pub fn with_equil_dims(mut self, dims: EquilDims) -> Self {
        self.equil_dims = dims;
        self
    }

    /// 注入断层集合 (FAULTS)
    pub fn with_faults(mut self, faults: &'a FaultCollection) -> Self {
        self.faults = Some(faults);
        self
    }

    /// 注入分区通信器
    pub fn with_comm(mut self, comm: &'a dyn PartitionComm) -> Self {
        self.comm = comm;
        self
    }

    /// 设置估算器选项
    pub fn with_estimator_options(mut self, options: EstimatorOptions) -> Self {
        self.estimator_options = options;
        self
    }

    /// 以静态选择的标量精度构建查询表
    ///
    /// 集体操作: 启用估算时所有分区必须同时调用（见
    /// [`DefaultThresholdEstimator::estimate`]）。
    pub fn build<S: Scalar>(self) -> PfResult<(ThresholdPressureTable<S>, InitSummary)> {
        self.options.validate()?;

        if !self.options.is_active() {
            return Ok((ThresholdPressureTable::disabled(), InitSummary::default()));
        }

        let grid = require!(
            self.grid,
            PfError::config("阈值压力启用时必须注入网格拓扑")
        );
        let attributes = require!(
            self.attributes,
            PfError::config("阈值压力启用时必须提供 EQLNUM 区域属性")
        );

        let regions = EquilRegionMap::assemble(grid, &self.equil_dims, attributes)?;
        self.check_rule_regions(regions.n_regions())?;

        let mut summary = InitSummary {
            enabled: true,
            n_regions: regions.n_regions(),
            n_partitions: self.comm.n_partitions(),
            ..Default::default()
        };

        // 断层扩展, 实验特性
        let (faults, global_ids) = if self.options.experimental && !self.options.fault_rules.is_empty()
        {
            let collection = require!(
                self.faults,
                PfError::config("存在 THPRESFT 记录时必须注入断层集合")
            );
            let (thresholds, match_stats) = FaultThresholds::assemble(
                collection,
                &self.options.fault_rules,
                grid.n_global_cells(),
            )?;
            summary.fault_records_matched = match_stats.matched;
            summary.fault_records_unmatched = match_stats.unmatched;

            let global_ids = (0..grid.n_cells())
                .map(|local| grid.global_cell_id(cell(local)))
                .collect();
            (Some(thresholds), global_ids)
        } else {
            (None, Vec::new())
        };

        // 重启: 跳过估算与覆盖, 矩阵等待注入
        if self.options.restart {
            summary.restart_pending = true;
            let matrix = ThresholdMatrix::zeros(regions.n_regions());
            let table =
                ThresholdPressureTable::assembled(regions, matrix, faults, global_ids, true);
            return Ok((table, summary));
        }

        let state = require!(
            self.state,
            PfError::config("默认阈值估算需要初始流动状态")
        );
        let estimator = DefaultThresholdEstimator::new(grid, state, &regions)
            .with_options(self.estimator_options);
        let (defaults, scan_stats) = estimator.estimate(self.comm)?;
        summary.faces_visited = scan_stats.faces_visited;
        summary.faces_negligible = scan_stats.faces_negligible;
        summary.region_pairs_touched = defaults.touched_pairs();

        let (final_matrix, rules_applied) =
            apply_region_barriers(grid, &regions, &self.options, &defaults);
        summary.barrier_rules_applied = rules_applied;

        let table = ThresholdPressureTable::assembled(
            regions,
            final_matrix.convert::<S>(),
            faults,
            global_ids,
            false,
        );
        Ok((table, summary))
    }

    /// 按配置的 [`Precision`] 分发构建 trait 对象
    pub fn build_dyn(self) -> PfResult<Box<dyn DynThresholdTable>> {
        match self.options.precision {
            Precision::F32 => {
                let (table, _) = self.build::<f32>()?;
                Ok(Box::new(table))
            }
            Precision::F64 => {
                let (table, _) = self.build::<f64>()?;
                Ok(Box::new(table))
            }
        }
    }

    /// 规则引用的区域号不能超过声明的区域数
    fn check_rule_regions(&self, n_regions: usize) -> PfResult<()> {
        for rule in &self.options.rules {
            ensure!(
                rule.region1 <= n_regions && rule.region2 <= n_regions,
                PfError::config(format!(
                    "THPRES 规则引用的区域对 ({}, {}) 超出 EQLDIMS 声明的 {} 个区域",
                    rule.region1, rule.region2, n_regions
                ))
            );
        }
        Ok(())
    }
}

// =============================================================================
// 测试
// =============================================================================
