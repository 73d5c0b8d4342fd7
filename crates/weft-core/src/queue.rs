//! 出队契约：帧所有权向硬件的一次性移交。
//!
//! # 设计背景（Why）
//! - 发送即放手：帧一旦排入硬件出队环，软件侧不得再触碰其内存——硬件随后异步读取并发送。
//!   契约通过所有权表达这一点：[`EgressDescriptor`] 拥有帧缓冲，提交时整个描述符按值移入队列，
//!   “提交后继续使用帧”在类型层面不可表达；
//! - 帧回收由描述符的消亡驱动：硬件发送完成后销毁描述符，帧缓冲的 `Drop` 将槽位归还池中。
//!   软件侧无需配对的 `free` 调用，也不存在双重释放的窗口。
//!
//! # 契约说明（What）
//! - 每个描述符恰好承载一帧的**唯一分片**：本数据面不做分片链，
//!   单次租借的连续缓冲覆盖整帧，因此描述符与帧一一对应；
//! - 队列满是可恢复错误，上浮 [`codes::QUEUE_FULL`](crate::error::codes::QUEUE_FULL)，
//!   被拒绝的描述符随错误路径销毁，帧自动回池，不会泄漏。

use alloc::boxed::Box;
use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::buffer::TxBuffer;
use crate::error::{codes, LinkError, Result};

/// 出队描述符：一帧待发送数据及其传输参数的所有权载体。
///
/// # 契约说明（What）
/// - **不变量**：`transfer_len() <= buffer().len()`，由构造函数强制；
/// - **所有权**：描述符独占帧缓冲。提交即移交，销毁即回收，两者互斥且必居其一；
/// - **分片语义**：恒为整帧的唯一分片，不存在后继分片。
pub struct EgressDescriptor {
    buffer: Box<dyn TxBuffer>,
    transfer_len: usize,
}

impl core::fmt::Debug for EgressDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EgressDescriptor")
            .field("frame_len", &self.buffer.len())
            .field("transfer_len", &self.transfer_len)
            .finish()
    }
}

impl EgressDescriptor {
    /// 以帧缓冲与传输长度构造描述符。
    ///
    /// # 错误
    /// - `transfer_len` 超出帧区间时返回
    ///   [`codes::DESCRIPTOR_INVALID`](crate::error::codes::DESCRIPTOR_INVALID)，
    ///   帧缓冲随错误路径销毁并回池。
    pub fn new(buffer: Box<dyn TxBuffer>, transfer_len: usize) -> Result<Self> {
        if transfer_len > buffer.len() {
            return Err(LinkError::new(
                codes::DESCRIPTOR_INVALID,
                format!(
                    "传输长度 {transfer_len} 超出帧区间 {} 字节",
                    buffer.len()
                ),
            ));
        }
        Ok(Self {
            buffer,
            transfer_len,
        })
    }

    /// 硬件应读取并发送的字节数。
    pub fn transfer_len(&self) -> usize {
        self.transfer_len
    }

    /// 帧缓冲的只读视图（硬件视角的待发送内容）。
    pub fn buffer(&self) -> &dyn TxBuffer {
        self.buffer.as_ref()
    }
}

/// `EgressQueue` 规定描述符向硬件出队环的提交接口。
///
/// # 逻辑解析（How）
/// - `submit` 按值接收描述符：成功即移交硬件，失败则描述符随 `Err` 销毁、帧回池；
/// - `submit_batch` 是批量提交的汇合点。调用方先构造好全部描述符再一次提交，
///   将每帧一次的队列交互（通常伴随门铃写）摊薄为每批一次；
///   默认实现退化为逐个 `submit`，专用实现可覆盖为真正的批量门铃。
///
/// # 契约说明（What）
/// - **错误**：环满返回 [`codes::QUEUE_FULL`](crate::error::codes::QUEUE_FULL)（可恢复）；
/// - **批量语义**：`submit_batch` 遇到首个失败即停止，已提交的帧照常发送，
///   未提交的帧随 `Vec` 的销毁回池；调用方可据错误码决定整批重试或降级逐帧。
pub trait EgressQueue: Send + Sync + 'static {
    /// 提交单个描述符，成功即完成所有权移交。
    fn submit(&self, descriptor: EgressDescriptor) -> Result<()>;

    /// 批量提交描述符。
    fn submit_batch(&self, descriptors: Vec<EgressDescriptor>) -> Result<()> {
        for descriptor in descriptors {
            self.submit(descriptor)?;
        }
        Ok(())
    }
}

/// 共享句柄的转发实现：发送器与观测侧常以 `Arc` 共享同一条出队环。
impl<Q: EgressQueue + ?Sized> EgressQueue for Arc<Q> {
    fn submit(&self, descriptor: EgressDescriptor) -> Result<()> {
        (**self).submit(descriptor)
    }

    fn submit_batch(&self, descriptors: Vec<EgressDescriptor>) -> Result<()> {
        (**self).submit_batch(descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    struct FixedFrame(Vec<u8>);

    impl TxBuffer for FixedFrame {
        fn as_slice(&self) -> &[u8] {
            &self.0
        }

        fn as_mut_slice(&mut self) -> &mut [u8] {
            &mut self.0
        }
    }

    /// 传输长度不得超过帧区间。
    #[test]
    fn transfer_len_is_bounded_by_frame() {
        let frame: Box<dyn TxBuffer> = Box::new(FixedFrame(vec![0u8; 64]));
        let err = EgressDescriptor::new(frame, 65).expect_err("越界传输长度应被拒绝");
        assert_eq!(err.code(), codes::DESCRIPTOR_INVALID);

        let frame: Box<dyn TxBuffer> = Box::new(FixedFrame(vec![0u8; 64]));
        let desc = EgressDescriptor::new(frame, 64).expect("等长传输应合法");
        assert_eq!(desc.transfer_len(), 64);
        assert_eq!(desc.buffer().len(), 64);
    }
}
