// crates/pf_config/src/lib.rs

//! PoroFlow Config Layer (Layer 4)
//!
//! 配置层，承载阈值压力子系统的全部甲板输入与精度选择。
//! 本层完全无泛型，所有数值使用 f64。
//!
//! # 模块概览
//!
//! - [`precision`]: Precision 枚举（F32/F64）
//! - [`thpres`]: ThresholdPressureOptions 阈值压力选项（THPRES / THPRESFT / EQLDIMS）
//! - [`fault`]: FaultCollection 断层集合（FAULTS）
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 4: pf_config     ─> Precision, ThresholdPressureOptions (本层)
//! Layer 3: pf_thpres     ─> ThresholdPressureTable<S>, DynThresholdTable
//! Layer 2: pf_runtime    ─> Scalar, PartitionComm
//! Layer 1: pf_foundation
//! ```
//!
//! # 设计原则
//!
//! 1. **无泛型**: 本层所有类型都不包含泛型参数
//! 2. **全 f64 配置**: 数值字段统一 f64，构建查询表时一次转换
//! 3. **甲板语义**: 区域号 1 基、规则后者覆盖前者、断层名精确匹配

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod fault;
pub mod precision;
pub mod thpres;

/// 层级标识
pub const LAYER: u8 = 4;

// 重导出核心类型
pub use error::ConfigError;
pub use fault::{Fault, FaultCollection};
pub use precision::Precision;
pub use thpres::{EquilDims, FaultThresholdRecord, RegionPairRule, ThresholdPressureOptions};
