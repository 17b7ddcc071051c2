// crates/pf_thpres/src/traits.rs

//! 初始流动状态接口
//!
//! 默认阈值估算需要初始化时刻的相流动信息。真实模拟器由物性模块
//! 与初始平衡解实现本接口，测试使用常数桩实现。

use pf_runtime::FaceIndex;

/// 初始时刻的流动状态查询接口
///
/// 所有量使用 f64，面号为本分区内部面号。上游侧指该相压力势较高
/// 的一侧，由实现方根据势差符号确定。
pub trait InitialFlowState: Send + Sync {
    /// 活跃相数
    fn n_phases(&self) -> usize;

    /// 面传导率
    fn transmissibility(&self, face: FaceIndex) -> f64;

    /// 指定相在上游单元的流度
    fn upstream_mobility(&self, face: FaceIndex, phase: usize) -> f64;

    /// 指定相跨面的压力势差
    fn pressure_difference(&self, face: FaceIndex, phase: usize) -> f64;
}
