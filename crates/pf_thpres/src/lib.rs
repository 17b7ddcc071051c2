// crates/pf_thpres/src/lib.rs

//! PoroFlow Threshold Pressure Layer (Layer 3)
//!
//! 阈值压力子系统: 按平衡区域对与断层存储流动启动的压力障壁，
//! 供通量装配在每个内部面上查询。
//!
//! # 模块概览
//!
//! - [`builder`]: 构建器、初始化摘要与运行时精度分发
//! - [`region`]: EQLNUM 属性到本地单元区域映射的装配
//! - [`estimator`]: 从初始流动状态估算默认阈值（可并行）
//! - [`overrides`]: THPRES 规则对默认矩阵的显式覆盖
//! - [`fault`]: THPRESFT 断层阈值扩展（实验特性）
//! - [`matrix`]: R x R 对称阈值矩阵
//! - [`table`]: 装配完成后的只读查询表
//! - [`traits`]: 初始流动状态抽象
//!
//! # 层级架构
//!
//! ```text
//! Layer 4: pf_config     ─> ThresholdPressureOptions, FaultCollection
//! Layer 3: pf_thpres     ─> ThresholdPressureTable<S: Scalar> (本层)
//! Layer 2: pf_runtime    ─> Scalar, PartitionComm, CellIndex
//! Layer 1: pf_foundation ─> PfError, ensure!/require!
//! ```
//!
//! # 设计原则
//!
//! 1. **装配与查询分离**: 构建器消费借用的协作对象，查询表自持有数据
//! 2. **全 f64 装配**: 估算、归约、覆盖全程 f64，发布时一次转换到配置精度
//! 3. **断层优先**: 两单元同属断层域时断层语义先于区域语义
//! 4. **集体一致**: 启用估算时所有分区同步参与归约，失败也一起失败

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod estimator;
pub mod fault;
pub mod matrix;
pub mod overrides;
pub mod region;
pub mod table;
pub mod traits;

/// 层级标识
pub const LAYER: u8 = 3;

// 重导出核心类型
pub use builder::{DynThresholdTable, InitSummary, ThresholdPressureBuilder};
pub use estimator::{
    DefaultThresholdEstimator, EstimatorOptions, ScanStats, ScanStrategy, NEGLIGIBLE_FLOW,
};
pub use fault::{FaultMatchStats, FaultThresholds};
pub use matrix::ThresholdMatrix;
pub use overrides::apply_region_barriers;
pub use region::{EquilRegionMap, MAX_EQUIL_REGIONS};
pub use table::ThresholdPressureTable;
pub use traits::InitialFlowState;

/// Prelude 模块
pub mod prelude {
    //! 常用类型预导入
    pub use crate::{
        DynThresholdTable, InitSummary, InitialFlowState, ThresholdPressureBuilder,
        ThresholdPressureTable,
    };
}
