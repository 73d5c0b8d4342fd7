//! 官方测试桩：记录型出队环与计数型缓冲池。
//!
//! # 逻辑解析（How）
//! - [`RecordingQueue`] 在提交瞬间复制帧内容后立刻销毁描述符，
//!   等价于“硬件瞬时完成发送并释放缓冲”，因此回收路径（`Drop` 驱动）也被覆盖；
//! - [`CountingPool`] 在堆上切出帧并统计租借行为，用于断言“一次发送恰好一次分配”
//!   以及池耗尽/超长两类错误的传播。
//!
//! 桩对象面向断言设计，不追求性能；生产实现见 `weft-buffer` 与具体传输后端。

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use spin::Mutex;

use crate::buffer::{FramePool, PoolStatDimension, PoolStats, TxBuffer};
use crate::error::{codes, LinkError, Result};
use crate::queue::{EgressDescriptor, EgressQueue};

/// 一次提交的快照：完整帧字节与声明的传输长度。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmittedFrame {
    pub bytes: Vec<u8>,
    pub transfer_len: usize,
}

/// 记录型出队环。
///
/// # 契约说明（What）
/// - `submit` 复制帧内容后销毁描述符，模拟硬件瞬时发送完成；
/// - 可选容量上限：达到后返回 [`codes::QUEUE_FULL`]，用于验证背压传播；
/// - `batch_flushes` 统计 `submit_batch` 的调用次数，用于断言批量路径只触发一次提交交互。
pub struct RecordingQueue {
    submitted: Mutex<Vec<SubmittedFrame>>,
    capacity: Option<usize>,
    batch_flushes: AtomicUsize,
}

impl RecordingQueue {
    /// 无容量上限的记录队列。
    pub fn new() -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            capacity: None,
            batch_flushes: AtomicUsize::new(0),
        }
    }

    /// 容量上限为 `capacity` 的记录队列；`0` 表示拒绝一切提交。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            capacity: Some(capacity),
            batch_flushes: AtomicUsize::new(0),
        }
    }

    /// 已提交帧的快照副本。
    pub fn submitted(&self) -> Vec<SubmittedFrame> {
        self.submitted.lock().clone()
    }

    /// 已提交帧数。
    pub fn len(&self) -> usize {
        self.submitted.lock().len()
    }

    /// 是否尚无提交。
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `submit_batch` 被调用的次数。
    pub fn batch_flushes(&self) -> usize {
        self.batch_flushes.load(Ordering::Relaxed)
    }
}

impl Default for RecordingQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EgressQueue for RecordingQueue {
    fn submit(&self, descriptor: EgressDescriptor) -> Result<()> {
        let mut submitted = self.submitted.lock();
        if let Some(capacity) = self.capacity {
            if submitted.len() >= capacity {
                return Err(LinkError::new(codes::QUEUE_FULL, "记录队列已达容量上限"));
            }
        }
        submitted.push(SubmittedFrame {
            bytes: descriptor.buffer().as_slice().to_vec(),
            transfer_len: descriptor.transfer_len(),
        });
        // 描述符在此销毁：帧缓冲的 Drop 即硬件发送完成后的回收。
        Ok(())
    }

    fn submit_batch(&self, descriptors: Vec<EgressDescriptor>) -> Result<()> {
        self.batch_flushes.fetch_add(1, Ordering::Relaxed);
        for descriptor in descriptors {
            self.submit(descriptor)?;
        }
        Ok(())
    }
}

struct HeapFrame(Vec<u8>);

impl TxBuffer for HeapFrame {
    fn as_slice(&self) -> &[u8] {
        &self.0
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

/// 计数型缓冲池。
///
/// # 契约说明（What）
/// - 每次成功的 `acquire` 在堆上切出恰好 `frame_len` 字节的清零帧并计数；
/// - `exhaust` 可将池置为耗尽态，后续租借返回 [`codes::POOL_EXHAUSTED`]；
/// - 超过 `slot_bytes` 的请求返回 [`codes::POOL_FRAME_TOO_LARGE`]。
pub struct CountingPool {
    slot_bytes: usize,
    acquires: AtomicUsize,
    failures: AtomicU64,
    exhausted: AtomicBool,
}

impl CountingPool {
    /// 单槽容量为 `slot_bytes` 的计数池。
    pub fn new(slot_bytes: usize) -> Self {
        Self {
            slot_bytes,
            acquires: AtomicUsize::new(0),
            failures: AtomicU64::new(0),
            exhausted: AtomicBool::new(false),
        }
    }

    /// 成功租借的次数。
    pub fn acquire_count(&self) -> usize {
        self.acquires.load(Ordering::Relaxed)
    }

    /// 将池置为（或解除）耗尽态。
    pub fn set_exhausted(&self, exhausted: bool) {
        self.exhausted.store(exhausted, Ordering::Relaxed);
    }
}

impl FramePool for CountingPool {
    fn acquire(&self, frame_len: usize) -> Result<Box<dyn TxBuffer>> {
        if self.exhausted.load(Ordering::Relaxed) {
            self.failures.fetch_add(1, Ordering::Relaxed);
            return Err(LinkError::new(codes::POOL_EXHAUSTED, "计数池处于耗尽态"));
        }
        if frame_len > self.slot_bytes {
            self.failures.fetch_add(1, Ordering::Relaxed);
            return Err(LinkError::new(
                codes::POOL_FRAME_TOO_LARGE,
                "请求帧长超过计数池单槽容量",
            ));
        }
        self.acquires.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(HeapFrame(vec![0u8; frame_len])))
    }

    fn statistics(&self) -> Result<PoolStats> {
        Ok(PoolStats {
            slot_bytes: self.slot_bytes,
            total_slots: usize::MAX,
            available_slots: usize::MAX,
            active_leases: 0,
            failed_acquisitions: self.failures.load(Ordering::Relaxed),
            custom_dimensions: vec![PoolStatDimension {
                key: "counting_acquires".into(),
                value: self.acquire_count(),
            }],
        })
    }
}
