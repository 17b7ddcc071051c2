// crates/pf_thpres/src/fault.rs

//! 断层阈值扩展
//!
//! THPRESFT 实验特性: 以断层为单位声明阈值压力，查询时优先于区域
//! 对矩阵。记录名与断层名精确匹配（大小写敏感），匹配不到的记录
//! 静默失效，调用方可通过匹配统计发现。
//!
//! 单元归属与取值是两套规则: 同一单元出现在多条断层里时归属声明
//! 顺序靠后的那条，而面的取值仍按两侧断层值的最大值合并。这一不
//! 对称沿袭现场长期依赖的行为，由回归测试钉住。

use pf_config::{FaultCollection, FaultThresholdRecord};
use pf_foundation::{PfError, PfResult};
use pf_runtime::FaultIndex;

/// 断层记录匹配统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultMatchStats {
    /// 成功匹配到断层的记录数
    pub matched: usize,
    /// 没有匹配断层的记录数
    pub unmatched: usize,
}

/// 断层阈值索引
///
/// `values` 按断层序号存放声明的阈值（`None` 表示未声明），
/// `cell_fault` 按全局单元编号存放断层归属。
#[derive(Debug, Clone, PartialEq)]
pub struct FaultThresholds {
    values: Vec<Option<f64>>,
    cell_fault: Vec<FaultIndex>,
}

impl FaultThresholds {
    /// 从断层集合与甲板记录构建索引
    ///
    /// 单元归属按断层声明顺序写入，靠后的断层覆盖共享单元；阈值
    /// 按记录顺序写入，同名记录后者覆盖前者。断层单元编号超出
    /// 全局单元数是错误。
    pub fn assemble(
        faults: &FaultCollection,
        records: &[FaultThresholdRecord],
        n_global_cells: usize,
    ) -> PfResult<(Self, FaultMatchStats)> {
        let mut values: Vec<Option<f64>> = vec![None; faults.len()];
        let mut cell_fault = vec![FaultIndex::INVALID; n_global_cells];
        let mut stats = FaultMatchStats::default();

        for (fault_idx, fault) in faults.iter().enumerate() {
            for &global in &fault.cells {
                PfError::check_index("全局单元", global, n_global_cells)?;
                cell_fault[global] = FaultIndex::new(fault_idx);
            }
        }

        for record in records {
            match faults.position(&record.fault_name) {
                Some(fault_idx) => {
                    values[fault_idx] = Some(record.value);
                    stats.matched += 1;
                }
                None => stats.unmatched += 1,
            }
        }

        Ok((Self { values, cell_fault }, stats))
    }

    /// 断层数量
    #[inline]
    pub fn n_faults(&self) -> usize {
        self.values.len()
    }

    /// 解析两个全局单元之间的断层阈值
    ///
    /// - 两侧同属一条断层: `Some(0)`，断层内部没有阈值，跨区域也是
    /// - 断层归属不同（含一侧无断层）: `Some(两侧断层值的最大值)`，
    ///   未声明值与无断层按 0 计
    /// - 两侧都不在任何断层内: `None`，回落到区域对矩阵
    pub fn resolve(&self, global_a: usize, global_b: usize) -> Option<f64> {
        let fa = self.cell_fault[global_a];
        let fb = self.cell_fault[global_b];

        if fa.is_invalid() && fb.is_invalid() {
            return None;
        }
        if fa == fb {
            return Some(0.0);
        }
        Some(self.fault_value(fa).max(self.fault_value(fb)))
    }

    /// 断层的生效阈值，无断层或未声明按 0
    fn fault_value(&self, fault: FaultIndex) -> f64 {
        if fault.is_invalid() {
            return 0.0;
        }
        self.values[fault.get()].unwrap_or(0.0)
    }
}

// =============================================================================
// 测试
// =============================================================================
