// crates/pf_grid/src/topology.rs

//! 网格拓扑抽象
//!
//! 阈值压力子系统对网格的全部需求：枚举本分区的内部面、
//! 取面两侧的单元、取面面积、把本地单元号映射到全局编号。
//!
//! 实现方约定：
//!
//! - 只枚举内部面，边界面（只有一侧有单元的面）不出现在 `[0, n_interior_faces)` 里
//! - 每个内部面恰好出现一次，方向（owner/neighbor 顺序）任意
//! - 全局编号指完整笛卡尔盒子里的单元序号，与分区方式无关，
//!   区域属性数组（EQLNUM）与断层单元集合都按全局编号寻址

use pf_runtime::{CellIndex, FaceIndex};

/// 网格拓扑 trait
pub trait GridTopology: Send + Sync {
    // ========== 基本信息 ==========

    /// 本分区单元数
    fn n_cells(&self) -> usize;

    /// 本分区内部面数量
    fn n_interior_faces(&self) -> usize;

    // ========== 拓扑数据 ==========

    /// 面两侧的单元 (owner, neighbor)
    fn face_cells(&self, face: FaceIndex) -> (CellIndex, CellIndex);

    /// 面面积
    fn face_area(&self, face: FaceIndex) -> f64;

    // ========== 全局编号 ==========

    /// 完整笛卡尔网格的单元总数
    fn n_global_cells(&self) -> usize;

    /// 本地单元对应的全局编号
    fn global_cell_id(&self, cell: CellIndex) -> usize;
}
