// crates/pf_grid/src/lib.rs

//! PoroFlow Grid Layer
//!
//! 网格拓扑接口与结构化测试网格。
//!
//! # 模块概览
//!
//! - [`topology`]: [`GridTopology`] trait，阈值压力子系统对网格的唯一依赖面
//! - [`cartesian`]: [`CartesianGrid`] 结构化网格，支持行带分区
//! - [`error`]: 网格错误类型
//!
//! 子系统只关心内部面的连接关系与面积，不关心几何形状，
//! 生产网格（角点网格、非结构化网格）由外部实现同一个 trait 接入。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cartesian;
pub mod error;
pub mod topology;

pub use cartesian::CartesianGrid;
pub use error::{GridError, GridResult};
pub use topology::GridTopology;
