//! 帧缓冲契约：硬件缓冲池的租借接口与观测指标。
//!
//! # 模块定位（Why）
//! - 发送路径不直接向通用分配器要内存：帧必须落在硬件可达（DMA 友好）的缓冲池槽位中，
//!   池的实现细节（slab、环、预注册内存区）对构帧逻辑完全透明；
//! - 契约层只约束语义——“租出一块至少 `frame_len` 字节的可写帧”，
//!   让传输实现与测试桩共用同一套类型。
//!
//! # 逻辑解析（How）
//! - [`FramePool::acquire`] 返回 `Box<dyn TxBuffer>`：租约期内调用方独占写权；
//! - 租约的归还走 `Drop`——帧要么随描述符移交硬件（发送完成后由实现回收），
//!   要么在构帧失败时原地销毁并立即回池。两条路径都不需要显式 `release` 调用。

use alloc::{borrow::Cow, boxed::Box, vec::Vec};
use core::fmt;

use crate::error::Result;

/// `TxBuffer` 是从硬件缓冲池租出的单块连续发送帧。
///
/// # 契约说明（What）
/// - **不变量**：`as_slice().len() == len()`，且在租约期内长度不变；
///   区间即整帧的最终线上内存，写入即构帧，无后续拷贝；
/// - **前置条件**：实现必须保证区间连续——游标与类型映射均假设单块内存；
/// - **后置条件**：租约对象销毁时，底层槽位回到池中（见实现方的回收协议）。
///
/// # 设计取舍（Trade-offs）
/// - Trait 对象以 `Box<dyn TxBuffer>` 流转而非泛型参数：出队描述符要跨越
///   “构帧层→硬件队列”的异构边界，单态化在此处收益有限而接口复杂度翻倍。
pub trait TxBuffer: Send + Sync + 'static {
    /// 帧区间的只读视图。
    fn as_slice(&self) -> &[u8];

    /// 帧区间的可写视图，构帧游标直接在其上推进。
    fn as_mut_slice(&mut self) -> &mut [u8];

    /// 帧长（字节）。
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// 帧长是否为零。
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for dyn TxBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxBuffer").field("len", &self.len()).finish()
    }
}

/// `FramePool` 规定硬件帧缓冲的租借接口。
///
/// # 设计背景（Why）
/// - 单次分配是发送路径的性能前提：一帧的头部与负载共用同一次 `acquire`，
///   池实现据此可以做槽位预分配与零碎片管理；
/// - 池耗尽是常态而非异常（硬件回收速度有上限），契约要求以可恢复错误上浮，
///   由上层决定退避还是丢弃。
///
/// # 契约说明（What）
/// - **输入参数**：`frame_len` 为本帧的完整长度（头部加负载）；
/// - **返回值**：`acquire` 成功时返回恰好 `frame_len` 字节可写的帧，调用方独占所有权；
/// - **错误**：池空返回 [`codes::POOL_EXHAUSTED`](crate::error::codes::POOL_EXHAUSTED)；
///   超过单槽容量返回 [`codes::POOL_FRAME_TOO_LARGE`](crate::error::codes::POOL_FRAME_TOO_LARGE)；
/// - **前置条件**：实现必须线程安全，租借可发生在任意发送线程。
pub trait FramePool: Send + Sync + 'static {
    /// 租借一块恰好 `frame_len` 字节的连续发送帧。
    fn acquire(&self, frame_len: usize) -> Result<Box<dyn TxBuffer>>;

    /// 返回池当前的统计快照。
    fn statistics(&self) -> Result<PoolStats>;
}

/// 池统计快照。值语义，代表调用瞬间的状态，不绑定池内部生命周期。
///
/// # 契约说明（What）
/// - `slot_bytes`：单槽容量，亦即 `acquire` 可接受的最大 `frame_len`；
/// - `total_slots` / `available_slots`：槽位总数与当前空闲数，`available_slots <= total_slots`；
/// - `active_leases`：尚未归还的租约数（含已移交硬件、等待发送完成的帧）；
/// - `failed_acquisitions`：累计租借失败次数，含耗尽与超长两类；
/// - `custom_dimensions`：实现特有指标的有序列表，键使用稳定的蛇形命名。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub slot_bytes: usize,
    pub total_slots: usize,
    pub available_slots: usize,
    pub active_leases: usize,
    pub failed_acquisitions: u64,
    pub custom_dimensions: Vec<PoolStatDimension>,
}

/// 扩展指标维度，承载具体池实现的定制数据。
///
/// 键对同一实现必须保持稳定，调用方可能据键名做监控映射。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolStatDimension {
    pub key: Cow<'static, str>,
    pub value: usize,
}
