// crates/pf_foundation/src/macros.rs

//! 验证宏
//!
//! `ensure!` 检查条件，`require!` 解包 `Option`，不满足时提前返回错误。
//! 两个宏都通过 `into()` 接受任何可转换为目标错误类型的值。

/// 条件不满足时提前返回错误
///
/// # 示例
///
/// ```
/// use pf_foundation::{PfError, PfResult, ensure};
///
/// fn validate(n_regions: usize) -> PfResult<()> {
///     ensure!(n_regions > 0, PfError::config("区域数不能为 0"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

/// 解包 `Option`，为 `None` 时提前返回错误
///
/// # 示例
///
/// ```
/// use pf_foundation::{PfError, PfResult, require};
///
/// fn first_region(ids: &[u8]) -> PfResult<u8> {
///     let r = require!(ids.first(), PfError::invalid_input("区域数组为空"));
///     Ok(*r)
/// }
/// ```
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr) => {
        match $opt {
            Some(v) => v,
            None => return Err($err.into()),
        }
    };
}
