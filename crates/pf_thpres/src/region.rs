// crates/pf_thpres/src/region.rs

//! 平衡区域映射
//!
//! 把甲板的 1 基单元区域属性 (EQLNUM) 转成本分区每个单元的 0 基
//! 区域号。区域号压缩进一个字节，声明的区域数超过 255 视为配置
//! 错误。
//!
//! 属性数组按全局单元编号寻址并覆盖完整网格，构造时对整个数组做
//! 取值校验。校验范围是全局的：同一份甲板在所有分区上要么全部
//! 成功要么全部失败，不会有分区在集体归约前单独退出。

use pf_config::EquilDims;
use pf_foundation::{ensure, PfError, PfResult};
use pf_grid::GridTopology;
use pf_runtime::{cell, CellIndex};

/// 平衡区域数上限，区域号需放入一个字节
pub const MAX_EQUIL_REGIONS: usize = 255;

/// 本分区的平衡区域映射
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquilRegionMap {
    n_regions: usize,
    cell_regions: Vec<u8>,
}

impl EquilRegionMap {
    /// 从区域属性数组构建映射
    ///
    /// # 参数
    ///
    /// - `grid`: 网格拓扑，提供本地单元数与全局编号
    /// - `dims`: 声明的平衡区域维度 (EQLDIMS)
    /// - `attributes`: 1 基区域属性，按全局单元编号寻址 (EQLNUM)
    ///
    /// # 错误
    ///
    /// - 声明区域数为 0 或超过 [`MAX_EQUIL_REGIONS`]
    /// - 属性数组长度与全局单元数不符
    /// - 任何属性值超出 `[1, 声明区域数]`
    pub fn assemble(
        grid: &dyn GridTopology,
        dims: &EquilDims,
        attributes: &[i32],
    ) -> PfResult<Self> {
        let n_regions = dims.num_equil_regions;
        ensure!(
            n_regions >= 1,
            PfError::config("EQLDIMS 声明的平衡区域数为 0")
        );
        ensure!(
            n_regions <= MAX_EQUIL_REGIONS,
            PfError::config(format!(
                "EQLDIMS 声明了 {} 个平衡区域, 超过上限 {}",
                n_regions, MAX_EQUIL_REGIONS
            ))
        );
        PfError::check_size("EQLNUM", grid.n_global_cells(), attributes.len())?;

        for (idx, &value) in attributes.iter().enumerate() {
            if value < 1 || value as usize > n_regions {
                return Err(PfError::invalid_input(format!(
                    "EQLNUM[{}] = {} 超出有效区域号范围 [1, {}]",
                    idx, value, n_regions
                )));
            }
        }

        let cell_regions = (0..grid.n_cells())
            .map(|local| (attributes[grid.global_cell_id(cell(local))] - 1) as u8)
            .collect();

        Ok(Self {
            n_regions,
            cell_regions,
        })
    }

    /// 空映射（0 区域、0 单元），供未启用的查询表使用
    pub(crate) fn empty() -> Self {
        Self {
            n_regions: 0,
            cell_regions: Vec::new(),
        }
    }

    /// 平衡区域总数 R
    #[inline]
    pub fn n_regions(&self) -> usize {
        self.n_regions
    }

    /// 本地单元的 0 基区域号
    #[inline]
    pub fn region(&self, cell: CellIndex) -> usize {
        self.cell_regions[cell.get()] as usize
    }

    /// 本分区单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.cell_regions.len()
    }

    /// 原始 0 基区域号切片
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.cell_regions
    }
}

// =============================================================================
// 测试
// =============================================================================
