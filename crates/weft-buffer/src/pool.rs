use alloc::{borrow::Cow, boxed::Box, sync::Arc, vec, vec::Vec};
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use bytes::BytesMut;
use spin::Mutex;

use weft_core::{
    LinkError, Result,
    buffer::{FramePool, PoolStatDimension, PoolStats, TxBuffer},
    error::codes,
};

use crate::pooled_frame::{FrameRecycler, PooledFrame};

/// `SlabFramePool` 是 [`FramePool`] 的默认实现：固定槽位数、固定单槽容量的自由链表池。
///
/// # 模块角色（Why）
/// - 模拟硬件发送缓冲区的形态：内存总量在初始化时一次性确定，运行期只有租借与归还，
///   没有增长路径。池空是常态化的背压信号而非异常；
/// - 借助 [`PooledFrame`] 的 `Drop` 钩子完成回收闭环，发送完成与构帧失败两条路径
///   共用同一归还入口。
///
/// # 核心机制（How）
/// - `spin::Mutex<Vec<BytesMut>>` 自由链表在构造时预填满全部槽位；
/// - 租借时弹出一个槽位，将长度调整为请求的帧长并清零；
/// - 指标全部走原子计数，`statistics` 返回调用瞬间的快照。
///
/// # 契约说明（What）
/// - **线程安全**：共享状态由自旋锁与原子计数保护，满足 `Send + Sync + 'static`；
/// - **后置条件**：`acquire` 成功时返回的帧恰为 `frame_len` 字节且内容全零；
/// - **错误**：池空返回 [`codes::POOL_EXHAUSTED`]，超过单槽容量返回
///   [`codes::POOL_FRAME_TOO_LARGE`]，两类失败都计入 `failed_acquisitions`。
///
/// # 设计权衡（Trade-offs）
/// - 自旋锁临界区只有一次 `Vec::pop`/`push`，持锁时间与槽位数无关；
/// - 归还时不做内容清理，清零推迟到下一次租借，避免在 `Drop` 路径上做多余工作。
#[derive(Clone)]
pub struct SlabFramePool {
    inner: Arc<PoolInner>,
}

impl SlabFramePool {
    /// 创建一个 `total_slots` 个槽位、单槽 `slot_bytes` 字节的池，内存即时预分配。
    pub fn new(total_slots: usize, slot_bytes: usize) -> Self {
        Self {
            inner: Arc::new(PoolInner::new(total_slots, slot_bytes)),
        }
    }

    /// 单槽容量，亦即 `acquire` 可接受的最大帧长。
    pub fn slot_bytes(&self) -> usize {
        self.inner.slot_bytes
    }
}

impl FramePool for SlabFramePool {
    fn acquire(&self, frame_len: usize) -> Result<Box<dyn TxBuffer>> {
        let raw = self.inner.acquire_slot(frame_len)?;
        let recycler: Arc<dyn FrameRecycler> = self.inner.clone();
        Ok(Box::new(PooledFrame::new(raw, recycler)))
    }

    fn statistics(&self) -> Result<PoolStats> {
        Ok(self.inner.snapshot())
    }
}

struct PoolInner {
    free_list: Mutex<Vec<BytesMut>>,
    slot_bytes: usize,
    total_slots: usize,
    metrics: PoolMetrics,
}

impl PoolInner {
    fn new(total_slots: usize, slot_bytes: usize) -> Self {
        let mut slots = Vec::with_capacity(total_slots);
        for _ in 0..total_slots {
            slots.push(BytesMut::zeroed(slot_bytes));
        }
        Self {
            free_list: Mutex::new(slots),
            slot_bytes,
            total_slots,
            metrics: PoolMetrics::default(),
        }
    }

    /// 从自由链表弹出一个槽位，调整为请求的帧长并清零。
    fn acquire_slot(&self, frame_len: usize) -> Result<BytesMut> {
        if frame_len > self.slot_bytes {
            self.metrics.record_failure();
            return Err(LinkError::new(
                codes::POOL_FRAME_TOO_LARGE,
                alloc::format!(
                    "请求帧长 {frame_len} 超过单槽容量 {}",
                    self.slot_bytes
                ),
            ));
        }

        let slot = self.free_list.lock().pop();
        let Some(mut slot) = slot else {
            self.metrics.record_failure();
            return Err(LinkError::new(
                codes::POOL_EXHAUSTED,
                "缓冲池无空闲槽位，等待硬件发送完成后回收",
            ));
        };

        slot.clear();
        slot.resize(frame_len, 0);
        self.metrics.increase_active_leases();
        Ok(slot)
    }

    fn snapshot(&self) -> PoolStats {
        let available_slots = self.free_list.lock().len();
        PoolStats {
            slot_bytes: self.slot_bytes,
            total_slots: self.total_slots,
            available_slots,
            active_leases: self.metrics.active_leases.load(Ordering::Relaxed),
            failed_acquisitions: self.metrics.failed_acquisitions.load(Ordering::Relaxed),
            custom_dimensions: vec![PoolStatDimension {
                key: Cow::Borrowed("reclaimed_frames"),
                value: self.metrics.reclaimed_frames.load(Ordering::Relaxed),
            }],
        }
    }
}

impl FrameRecycler for PoolInner {
    fn reclaim(&self, frame: BytesMut) {
        self.metrics.decrease_active_leases();
        self.metrics.reclaimed_frames.fetch_add(1, Ordering::Relaxed);
        self.free_list.lock().push(frame);
    }
}

#[derive(Default)]
struct PoolMetrics {
    active_leases: AtomicUsize,
    reclaimed_frames: AtomicUsize,
    failed_acquisitions: AtomicU64,
}

impl PoolMetrics {
    fn increase_active_leases(&self) {
        self.active_leases.fetch_add(1, Ordering::Relaxed);
    }

    fn decrease_active_leases(&self) {
        let _ = self
            .active_leases
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |prev| {
                Some(prev.saturating_sub(1))
            });
    }

    fn record_failure(&self) {
        self.failed_acquisitions.fetch_add(1, Ordering::Relaxed);
    }
}
