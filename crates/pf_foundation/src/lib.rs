// poroflow\crates\pf_foundation\src/lib.rs

//! PoroFlow Foundation Layer
//!
//! 零业务依赖的基础层，提供整个项目的错误抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 [`PfError`] 和 [`PfResult`]
//! - [`macros`]: `ensure!` / `require!` 验证宏
//!
//! # 设计原则
//!
//! 1. **层次化**: 基础层只定义核心错误，网格/配置相关错误在上层 crate 中定义并转换
//! 2. **结构化**: 初始化阶段的一切失败都以带字段的错误值返回，核心层不打印日志
//! 3. **最小依赖**: 仅依赖 thiserror
//!
//! # 示例
//!
//! ```
//! use pf_foundation::{PfError, PfResult, ensure};
//!
//! fn check_region_count(n: usize) -> PfResult<()> {
//!     ensure!(n <= 255, PfError::config("平衡区域数超过 255"));
//!     Ok(())
//! }
//!
//! assert!(check_region_count(12).is_ok());
//! assert!(check_region_count(300).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod macros;

// 重导出常用类型
pub use error::{PfError, PfResult};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{PfError, PfResult};
    pub use crate::{ensure, require};
}
