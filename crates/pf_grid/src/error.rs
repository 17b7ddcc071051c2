// crates/pf_grid/src/error.rs

//! 网格层错误类型

use pf_foundation::PfError;
use thiserror::Error;

/// 网格错误
#[derive(Error, Debug)]
pub enum GridError {
    /// 网格尺寸无效
    #[error("网格尺寸无效: nx={nx}, ny={ny}")]
    InvalidDimensions {
        /// x 方向单元数
        nx: usize,
        /// y 方向单元数
        ny: usize,
    },

    /// 网格间距无效
    #[error("网格间距无效: dx={dx}, dy={dy}, 必须为正的有限值")]
    InvalidSpacing {
        /// x 方向间距
        dx: f64,
        /// y 方向间距
        dy: f64,
    },

    /// 分区参数无效
    #[error("分区参数无效: rank={rank}, 分区数={n_partitions}")]
    InvalidPartition {
        /// 分区编号
        rank: usize,
        /// 分区总数
        n_partitions: usize,
    },
}

impl GridError {
    /// 网格尺寸无效
    pub fn invalid_dimensions(nx: usize, ny: usize) -> Self {
        Self::InvalidDimensions { nx, ny }
    }

    /// 网格间距无效
    pub fn invalid_spacing(dx: f64, dy: f64) -> Self {
        Self::InvalidSpacing { dx, dy }
    }

    /// 分区参数无效
    pub fn invalid_partition(rank: usize, n_partitions: usize) -> Self {
        Self::InvalidPartition { rank, n_partitions }
    }
}

impl From<GridError> for PfError {
    fn from(err: GridError) -> Self {
        PfError::invalid_grid(err.to_string())
    }
}

/// 网格结果类型
pub type GridResult<T> = Result<T, GridError>;
