// crates/pf_runtime/src/lib.rs

//! PoroFlow Runtime Layer (Layer 2)
//!
//! 运行时抽象层，提供标量类型、计算索引与分区通信抽象。
//!
//! # 模块概览
//!
//! - [`scalar`]: Scalar trait（密封，仅 f32/f64 可实现）
//! - [`indices`]: 公共计算索引（单元、面、断层）
//! - [`comm`]: PartitionComm trait 与串行/线程实现
//! - [`error`]: 运行时错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 4: pf_config     ─> Precision, ThresholdPressureOptions
//! Layer 3: pf_thpres     ─> ThresholdPressureTable<S: Scalar>
//! Layer 2: pf_runtime    ─> Scalar, PartitionComm, CellIndex (本层)
//! Layer 1: pf_foundation ─> PfError, ensure!/require!
//! ```
//!
//! # 设计原则
//!
//! 1. **密封 Trait**: Scalar 只有 f32/f64 实现
//! 2. **零成本抽象**: 编译期单态化，运行时无开销
//! 3. **传输无关**: PartitionComm 不绑定任何消息运行时

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comm;
pub mod error;
pub mod indices;
pub mod scalar;

/// 层级标识
pub const LAYER: u8 = 2;

// 重导出核心类型
pub use comm::{PartitionComm, SerialComm, ThreadComm};
pub use error::{RuntimeError, RuntimeResult};
pub use indices::{cell, face, CellIndex, FaceIndex, FaultIndex, INVALID_INDEX};
pub use scalar::Scalar;

/// Prelude 模块
pub mod prelude {
    //! 常用类型预导入
    pub use crate::{
        CellIndex, FaceIndex, FaultIndex, PartitionComm, RuntimeError, Scalar, SerialComm,
    };
}
