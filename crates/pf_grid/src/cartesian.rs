// crates/pf_grid/src/cartesian.rs

//! 结构化笛卡尔网格
//!
//! 提供简单的矩形网格实现，用于测试和验证：
//!
//! - [`CartesianGrid::new`]: 完整 nx×ny 网格（串行，本地编号即全局编号）
//! - [`CartesianGrid::slab`]: 按行带划分的分区子网格
//!
//! 生产环境的角点网格由外部网格库通过 [`GridTopology`] 接入，
//! 本模块不承担几何变形或非活动单元处理。
//!
//! # 使用示例
//!
//! ```rust
//! use pf_grid::CartesianGrid;
//! use pf_grid::topology::GridTopology;
//!
//! let grid = CartesianGrid::new(4, 3, 100.0, 50.0).unwrap();
//! assert_eq!(grid.n_cells(), 12);
//! // x 方向面 3*3=9, y 方向面 4*2=8
//! assert_eq!(grid.n_interior_faces(), 17);
//! ```

use serde::{Deserialize, Serialize};

use pf_runtime::{CellIndex, FaceIndex};

use crate::error::{GridError, GridResult};
use crate::topology::GridTopology;

/// 预枚举的内部面
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct GridFace {
    /// owner 本地单元号
    owner: usize,
    /// neighbor 本地单元号
    neighbor: usize,
    /// 面面积（单位厚度）
    area: f64,
}

/// 结构化笛卡尔网格
///
/// 单元按行主序编号：`(i, j)` 的全局编号为 `j * nx + i`。
/// 行带分区时本地编号从本分区第一行起连续排列，
/// 全局编号 = 本地编号 + `row_start * nx`。
///
/// 行带之间的面不属于任何分区的内部面枚举，
/// 跨分区的一致性由初始化末尾的全分区归约保证。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartesianGrid {
    nx: usize,
    ny: usize,
    dx: f64,
    dy: f64,
    /// 本分区起始行（含）
    row_start: usize,
    /// 本分区结束行（不含）
    row_end: usize,
    faces: Vec<GridFace>,
}

impl CartesianGrid {
    /// 创建完整网格
    ///
    /// # 参数
    ///
    /// - `nx`: x 方向单元数
    /// - `ny`: y 方向单元数
    /// - `dx`: x 方向间距
    /// - `dy`: y 方向间距
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> GridResult<Self> {
        Self::slab(nx, ny, dx, dy, 0, 1)
    }

    /// 创建方形网格
    pub fn square(n: usize, spacing: f64) -> GridResult<Self> {
        Self::new(n, n, spacing, spacing)
    }

    /// 创建行带分区子网格
    ///
    /// 行在分区间尽量均分，前 `ny % n_partitions` 个分区多一行。
    /// 分区数多于行数时，多出来的分区得到空网格（0 单元、0 面），
    /// 这与真实并行运行中允许空分区的行为一致。
    pub fn slab(
        nx: usize,
        ny: usize,
        dx: f64,
        dy: f64,
        rank: usize,
        n_partitions: usize,
    ) -> GridResult<Self> {
        if nx == 0 || ny == 0 {
            return Err(GridError::invalid_dimensions(nx, ny));
        }
        if !(dx.is_finite() && dy.is_finite()) || dx <= 0.0 || dy <= 0.0 {
            return Err(GridError::invalid_spacing(dx, dy));
        }
        if n_partitions == 0 || rank >= n_partitions {
            return Err(GridError::invalid_partition(rank, n_partitions));
        }

        let rows_per = ny / n_partitions;
        let extra = ny % n_partitions;
        let row_start = rank * rows_per + rank.min(extra);
        let n_rows = rows_per + usize::from(rank < extra);
        let row_end = row_start + n_rows;

        let local = |i: usize, j: usize| (j - row_start) * nx + i;

        let mut faces = Vec::new();
        // x 方向面
        for j in row_start..row_end {
            for i in 0..nx.saturating_sub(1) {
                faces.push(GridFace {
                    owner: local(i, j),
                    neighbor: local(i + 1, j),
                    area: dy,
                });
            }
        }
        // y 方向面（两侧行都在本分区内）
        for j in row_start..row_end.saturating_sub(1) {
            for i in 0..nx {
                faces.push(GridFace {
                    owner: local(i, j),
                    neighbor: local(i, j + 1),
                    area: dx,
                });
            }
        }

        Ok(Self {
            nx,
            ny,
            dx,
            dy,
            row_start,
            row_end,
            faces,
        })
    }

    /// x 方向单元数
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// y 方向单元数
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// x 方向间距
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// y 方向间距
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// 本分区的行范围 `[start, end)`
    pub fn row_range(&self) -> (usize, usize) {
        (self.row_start, self.row_end)
    }

    /// `(i, j)` 的全局编号
    ///
    /// 与分区无关，用于构造区域属性数组和断层单元集合。
    #[inline]
    pub fn global_index(&self, i: usize, j: usize) -> usize {
        j * self.nx + i
    }

    /// `(i, j)` 在本分区内的本地索引，不在本分区时返回 None
    pub fn cell_at(&self, i: usize, j: usize) -> Option<CellIndex> {
        if i < self.nx && j >= self.row_start && j < self.row_end {
            Some(CellIndex::new((j - self.row_start) * self.nx + i))
        } else {
            None
        }
    }
}

impl GridTopology for CartesianGrid {
    #[inline]
    fn n_cells(&self) -> usize {
        (self.row_end - self.row_start) * self.nx
    }

    #[inline]
    fn n_interior_faces(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    fn face_cells(&self, face: FaceIndex) -> (CellIndex, CellIndex) {
        let f = &self.faces[face.get()];
        (CellIndex::new(f.owner), CellIndex::new(f.neighbor))
    }

    #[inline]
    fn face_area(&self, face: FaceIndex) -> f64 {
        self.faces[face.get()].area
    }

    #[inline]
    fn n_global_cells(&self) -> usize {
        self.nx * self.ny
    }

    #[inline]
    fn global_cell_id(&self, cell: CellIndex) -> usize {
        self.row_start * self.nx + cell.get()
    }
}
