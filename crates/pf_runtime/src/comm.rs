// crates/pf_runtime/src/comm.rs

//! 分区通信抽象
//!
//! 阈值压力初始化只需要一个集合操作：对展平矩阵做全分区逐元素最大值归约。
//! 本模块把这个操作抽象为 [`PartitionComm`] trait，传输层（单进程、MPI）
//! 由实现方决定，核心算法不感知。
//!
//! # 设计原则
//!
//! 1. **单一集合操作**: 只暴露 `max_reduce_inplace`，不搭建通用消息层
//! 2. **串行即恒等**: [`SerialComm`] 是单分区运行的零开销替身，
//!    也是归约正确性测试的参照实现
//! 3. **进程内集群**: [`ThreadComm`] 用线程模拟多分区，供集成测试
//!    验证跨分区一致性，不依赖外部运行时
//!
//! # 示例
//!
//! ```
//! use pf_runtime::comm::{PartitionComm, SerialComm};
//!
//! let comm = SerialComm;
//! let mut matrix = vec![1.0, 2.0, 3.0];
//! comm.max_reduce_inplace(&mut matrix).unwrap();
//! assert_eq!(matrix, vec![1.0, 2.0, 3.0]);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

use parking_lot::Mutex;

use crate::error::{RuntimeError, RuntimeResult};

// =============================================================================
// 通信 Trait
// =============================================================================

/// 分区间集合通信接口
///
/// 一次初始化恰好调用一次 `max_reduce_inplace`，且所有分区必须同时参与。
/// 漏掉任何一个分区都会让各分区的矩阵永久分叉，没有事后修复手段。
pub trait PartitionComm: Send + Sync {
    /// 分区总数
    fn n_partitions(&self) -> usize;

    /// 本分区编号，范围 `[0, n_partitions)`
    fn rank(&self) -> usize;

    /// 本分区是否负责输出（串行运行或 0 号分区）
    #[inline]
    fn is_io_rank(&self) -> bool {
        self.rank() == 0
    }

    /// 全分区逐元素最大值归约（就地）
    ///
    /// 阻塞直到所有分区到达；返回后每个分区的 `data` 内容一致。
    /// 各分区提交的切片长度必须相同，不等长时所有参与方都得到错误。
    fn max_reduce_inplace(&self, data: &mut [f64]) -> RuntimeResult<()>;
}

// =============================================================================
// 串行实现
// =============================================================================

/// 单分区通信器：归约是恒等操作
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialComm;

impl PartitionComm for SerialComm {
    #[inline]
    fn n_partitions(&self) -> usize {
        1
    }

    #[inline]
    fn rank(&self) -> usize {
        0
    }

    #[inline]
    fn max_reduce_inplace(&self, _data: &mut [f64]) -> RuntimeResult<()> {
        Ok(())
    }
}

// =============================================================================
// 进程内多分区实现
// =============================================================================

/// 一轮归约的累积槽
#[derive(Default)]
struct ReduceSlot {
    /// 逐元素最大值累积缓冲
    acc: Option<Vec<f64>>,
    /// 长度不一致时记录 (期望, 实际)
    poisoned: Option<(usize, usize)>,
    /// 已取走结果的分区数，归零时重置槽
    drained: usize,
}

struct ClusterShared {
    n_ranks: usize,
    barrier: Barrier,
    // 按轮次奇偶交替使用两个槽：上一轮尚未取完结果时，
    // 先返回的分区可以安全地开始下一轮存入
    slots: [Mutex<ReduceSlot>; 2],
}

/// 进程内多分区通信器
///
/// 用 `cluster(n)` 创建 n 个句柄，每个句柄交给一个线程使用。
/// 归约分两个阶段：存入阶段各分区把数据按最大值并入共享缓冲，
/// 屏障同步后进入取出阶段，各分区把一致的结果拷回本地切片。
///
/// 仅用于测试与演示；生产环境的多进程归约由外部传输层实现
/// 同一个 trait 接入。
pub struct ThreadComm {
    rank: usize,
    epoch: AtomicUsize,
    shared: Arc<ClusterShared>,
}

impl ThreadComm {
    /// 创建 n 个分区句柄组成的集群
    pub fn cluster(n_ranks: usize) -> Vec<Self> {
        let shared = Arc::new(ClusterShared {
            n_ranks,
            barrier: Barrier::new(n_ranks),
            slots: [
                Mutex::new(ReduceSlot::default()),
                Mutex::new(ReduceSlot::default()),
            ],
        });

        (0..n_ranks)
            .map(|rank| Self {
                rank,
                epoch: AtomicUsize::new(0),
                shared: Arc::clone(&shared),
            })
            .collect()
    }
}

impl PartitionComm for ThreadComm {
    #[inline]
    fn n_partitions(&self) -> usize {
        self.shared.n_ranks
    }

    #[inline]
    fn rank(&self) -> usize {
        self.rank
    }

    fn max_reduce_inplace(&self, data: &mut [f64]) -> RuntimeResult<()> {
        let epoch = self.epoch.fetch_add(1, Ordering::Relaxed);
        let slot_mutex = &self.shared.slots[epoch % 2];

        // 存入阶段
        {
            let mut slot = slot_mutex.lock();
            let slot = &mut *slot;
            match slot.acc.as_mut() {
                None => slot.acc = Some(data.to_vec()),
                Some(acc) => {
                    if acc.len() != data.len() {
                        if slot.poisoned.is_none() {
                            slot.poisoned = Some((acc.len(), data.len()));
                        }
                    } else {
                        for (a, v) in acc.iter_mut().zip(data.iter()) {
                            *a = a.max(*v);
                        }
                    }
                }
            }
        }

        self.shared.barrier.wait();

        // 取出阶段
        let mut slot = slot_mutex.lock();
        let result = if let Some((expected, actual)) = slot.poisoned {
            Err(RuntimeError::BufferSizeMismatch { expected, actual })
        } else {
            if let Some(acc) = slot.acc.as_ref() {
                data.copy_from_slice(acc);
            }
            Ok(())
        };

        slot.drained += 1;
        if slot.drained == self.shared.n_ranks {
            *slot = ReduceSlot::default();
        }
        result
    }
}

// =============================================================================
// 测试
// =============================================================================
