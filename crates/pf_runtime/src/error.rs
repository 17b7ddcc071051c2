// crates/pf_runtime/src/error.rs

//! 运行时错误类型
//!
//! 定义 Runtime 层的错误类型，主要是分区间集合通信的失败模式。

use std::fmt;

use pf_foundation::PfError;

/// 运行时错误
#[derive(Debug)]
pub enum RuntimeError {
    /// 缓冲区大小不匹配（归约参与方提交了不同长度的数据）
    BufferSizeMismatch {
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },
    /// 无效操作
    InvalidOperation {
        /// 操作描述
        operation: String,
        /// 原因
        reason: String,
    },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferSizeMismatch { expected, actual } => {
                write!(f, "缓冲区大小不匹配: 期望 {}, 实际 {}", expected, actual)
            }
            Self::InvalidOperation { operation, reason } => {
                write!(f, "无效操作 '{}': {}", operation, reason)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

/// 运行时结果类型
pub type RuntimeResult<T> = Result<T, RuntimeError>;

impl From<RuntimeError> for PfError {
    fn from(err: RuntimeError) -> Self {
        PfError::Runtime(err.to_string())
    }
}
