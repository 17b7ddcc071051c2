// crates/pf_runtime/src/scalar.rs

//! Scalar - 密封的标量类型抽象
//!
//! 提供编译期精度选择的唯一接口，支持阈值矩阵在 f32 和 f64 之间零成本切换。
//!
//! # 设计原则
//!
//! 1. **密封 Trait**: 只有 f32 和 f64 可以实现（通过 private::Sealed）
//! 2. **零成本抽象**: `#[inline]` + 编译期单态化
//! 3. **边界转换**: 配置层与流动状态接口全部使用 f64，
//!    `from_config(f64)` 只在表构造的最后一步调用一次
//!
//! # 使用规范
//!
//! ```rust
//! use pf_runtime::Scalar;
//!
//! // ✅ 正确：核心层的存储类型使用泛型
//! fn clamp_threshold<S: Scalar>(v: S) -> S {
//!     if v < S::ZERO { S::ZERO } else { v }
//! }
//!
//! // ❌ 错误：配置层禁止使用泛型
//! // fn load_options<S: Scalar>(json: &str) -> Options<S> { ... }
//! ```

use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{Float, FromPrimitive, NumAssign};

/// 密封模块，禁止外部实现
mod private {
    /// 密封 trait
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// 运行时标量类型（密封，仅 f32/f64 可实现）
///
/// 阈值矩阵与查询表以此 trait 作为泛型边界。估算与归约流水线
/// 固定在 f64 上运行（与流动状态接口一致），只有最终发布的矩阵
/// 按配置精度存储。
///
/// # 实现类型
///
/// - `f32`: 内存占用减半，适合超大区域数的受限场景
/// - `f64`: 高精度模式（默认），与重启文件的存储精度一致
pub trait Scalar:
    private::Sealed
    + Float
    + FromPrimitive
    + NumAssign
    + Copy
    + Clone
    + Debug
    + Display
    + Send
    + Sync
    + Sum
    + Default
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// 零值
    const ZERO: Self;
    /// 一
    const ONE: Self;
    /// 机器精度
    const EPSILON: Self;
    /// 最大值
    const MAX: Self;

    /// 从配置层（全 f64）转换
    ///
    /// f64 -> f32 允许精度损失；非有限输入原样传递，由调用方验证。
    #[inline]
    fn from_config(value: f64) -> Self {
        Self::from_f64(value).unwrap_or(Self::ZERO)
    }

    /// 转换回配置层精度
    #[inline]
    fn to_config(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    /// 检查是否有限（非 NaN、非 Inf）
    #[inline]
    fn is_safe(self) -> bool {
        self.is_finite()
    }

    /// 近似相等判断
    #[inline]
    fn approx_eq(self, other: Self, epsilon: Self) -> bool {
        (self - other).abs() < epsilon
    }
}

// =============================================================================
// f32 实现
// =============================================================================

impl Scalar for f32 {
    const ZERO: f32 = 0.0;
    const ONE: f32 = 1.0;
    const EPSILON: f32 = f32::EPSILON;
    const MAX: f32 = f32::MAX;
}

// =============================================================================
// f64 实现
// =============================================================================

impl Scalar for f64 {
    const ZERO: f64 = 0.0;
    const ONE: f64 = 1.0;
    const EPSILON: f64 = f64::EPSILON;
    const MAX: f64 = f64::MAX;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_constants() {
        assert_eq!(f32::ZERO, 0.0f32);
        assert_eq!(f32::ONE, 1.0f32);
    }

    #[test]
    fn test_f64_constants() {
        assert_eq!(f64::ZERO, 0.0f64);
        assert_eq!(f64::ONE, 1.0f64);
    }

    #[test]
    fn test_from_config() {
        let v = 2.5e5f64;
        assert_eq!(f32::from_config(v), 2.5e5f32);
        assert_eq!(f64::from_config(v), 2.5e5f64);
    }

    #[test]
    fn test_to_config_roundtrip() {
        let v = 1.5f32;
        assert_eq!(v.to_config(), 1.5f64);
    }

    #[test]
    fn test_is_safe() {
        assert!(1.0f64.is_safe());
        assert!(!f64::NAN.is_safe());
        assert!(!f64::INFINITY.is_safe());
    }

    #[test]
    fn test_approx_eq() {
        let a = 1.0f64;
        let b = 1.0 + 1e-15;
        assert!(a.approx_eq(b, 1e-14));
        assert!(!a.approx_eq(b, 1e-16));
    }
}
