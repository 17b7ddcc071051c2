// crates/pf_runtime/src/indices.rs

//! 公共计算索引
//!
//! 提供类型安全的索引类型，用于网格单元、内部面、断层等的引用。
//! 索引是轻量级的，运行时与 usize 完全相同。
//!
//! # 设计原则
//!
//! 1. **类型安全**: 不同类型的索引不可混用（CellIndex ≠ FaceIndex）
//! 2. **零开销**: 编译期类型检查，运行时与 usize 完全相同
//! 3. **哨兵值**: `INVALID` 表示"无所属"（例如不在任何断层内的单元）
//!
//! # 示例
//!
//! ```rust
//! use pf_runtime::indices::{CellIndex, FaultIndex, cell, face};
//!
//! let c = CellIndex::new(0);
//! let f = face(5);
//!
//! assert!(c.is_valid());
//! assert_eq!(f.get(), 5);
//! assert!(FaultIndex::INVALID.is_invalid());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// 无效索引标记
pub const INVALID_INDEX: usize = usize::MAX;

// =============================================================================
// 宏：生成索引类型
// =============================================================================

macro_rules! define_index {
    ($(#[$meta:meta])* $name:ident, $doc:literal) => {
        #[doc = $doc]
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(pub usize);

        impl $name {
            /// 无效索引常量
            pub const INVALID: Self = Self(INVALID_INDEX);

            /// 创建新索引
            #[inline]
            pub const fn new(idx: usize) -> Self {
                Self(idx)
            }

            /// 获取索引值
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// 转换为 usize
            #[inline]
            pub const fn as_usize(self) -> usize {
                self.0
            }

            /// 检查是否有效
            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != INVALID_INDEX
            }

            /// 检查是否无效
            #[inline]
            pub const fn is_invalid(self) -> bool {
                self.0 == INVALID_INDEX
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(idx: usize) -> Self { Self::new(idx) }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize { idx.get() }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}(INVALID)", stringify!($name))
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}", self.0)
                } else {
                    write!(f, "INVALID")
                }
            }
        }

        impl Default for $name {
            fn default() -> Self { Self::INVALID }
        }
    };
}

// =============================================================================
// 索引类型定义
// =============================================================================

define_index!(CellIndex, "本分区单元索引");
define_index!(FaceIndex, "内部面索引");
define_index!(FaultIndex, "断层索引（INVALID 表示单元不属于任何断层）");

// =============================================================================
// 便捷构造函数
// =============================================================================

/// 创建单元索引
#[inline]
pub const fn cell(idx: usize) -> CellIndex {
    CellIndex::new(idx)
}

/// 创建面索引
#[inline]
pub const fn face(idx: usize) -> FaceIndex {
    FaceIndex::new(idx)
}
