// crates/pf_thpres/src/overrides.rs

//! 显式障壁覆盖
//!
//! 最终矩阵从全零出发，只在本分区可见的跨区域面上写入声明过障壁
//! 的区域对: 规则带显式值写显式值，缺省则回退到估算出的默认值。
//! 未声明障壁的区域对，以及声明了障壁但没有任何面相连的区域对，
//! 保持 0。

use std::collections::HashSet;

use pf_config::ThresholdPressureOptions;
use pf_grid::GridTopology;
use pf_runtime::FaceIndex;

use crate::matrix::ThresholdMatrix;
use crate::region::EquilRegionMap;

/// 在跨区域面上应用显式障壁规则
///
/// 返回最终矩阵与实际写入的无序区域对数量。配置查询使用 1 基
/// 区域号且对顺序不敏感，因此单次面枚举即可对称落盘。
pub fn apply_region_barriers(
    grid: &dyn GridTopology,
    regions: &EquilRegionMap,
    options: &ThresholdPressureOptions,
    defaults: &ThresholdMatrix<f64>,
) -> (ThresholdMatrix<f64>, usize) {
    let mut matrix = ThresholdMatrix::zeros(regions.n_regions());
    let mut applied: HashSet<(usize, usize)> = HashSet::new();

    for face_idx in 0..grid.n_interior_faces() {
        let face = FaceIndex::new(face_idx);
        let (inside, outside) = grid.face_cells(face);
        let ra = regions.region(inside);
        let rb = regions.region(outside);
        if ra == rb {
            continue;
        }
        if !options.has_region_barrier(ra + 1, rb + 1) {
            continue;
        }

        let value = options
            .explicit_value(ra + 1, rb + 1)
            .unwrap_or_else(|| defaults.get(ra, rb));
        matrix.set_pair(ra, rb, value);
        applied.insert((ra.min(rb), ra.max(rb)));
    }

    (matrix, applied.len())
}

// =============================================================================
// 测试
// =============================================================================
