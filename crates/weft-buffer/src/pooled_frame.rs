use alloc::sync::Arc;
use core::mem;

use bytes::BytesMut;

use weft_core::buffer::TxBuffer;

/// `FrameRecycler` 描述帧租约结束时的回收入口。
///
/// # 设计初衷（Why）
/// - `weft-core` 的 [`FramePool`](weft_core::buffer::FramePool) trait 仅约束“租借”侧，
///   不规定槽位如何归还。发送路径的回收点天然分散：构帧失败时在发送线程，
///   发送成功时在硬件完成回调销毁描述符的线程；
/// - 把回收统一收敛到 [`PooledFrame`] 的 `Drop`，两条路径共用一个钩子，
///   不可能出现“忘记归还”或“重复归还”。
///
/// # 契约说明（What）
/// - **前置条件**：实现必须线程安全，且 `reclaim` 过程不得 panic——
///   它运行在 `Drop` 路径上，panic 将导致进程异常终止；
/// - **后置条件**：归还的 `BytesMut` 即租借时发出的那块内存，容量未变，
///   池端清理后可直接复用。
pub trait FrameRecycler: Send + Sync + 'static {
    /// 归还一块帧内存。
    fn reclaim(&self, frame: BytesMut);
}

/// `PooledFrame` 是从 [`SlabFramePool`](crate::SlabFramePool) 租出的单块连续帧。
///
/// # 逻辑解析（How）
/// - 持有长度恰为 `frame_len` 的 `BytesMut`（容量为池的单槽大小），
///   游标写入直接落在这块最终内存上；
/// - `Drop` 时经 `mem::take` 夺回 `BytesMut` 并交给回收句柄，
///   无论帧是构帧失败原地销毁，还是随描述符完成发送后销毁，槽位都会回池。
pub struct PooledFrame {
    frame: BytesMut,
    recycler: Arc<dyn FrameRecycler>,
}

impl PooledFrame {
    /// 以帧内存与回收句柄构造租约对象。`frame` 的长度应已被池设置为帧长。
    pub(crate) fn new(frame: BytesMut, recycler: Arc<dyn FrameRecycler>) -> Self {
        Self { frame, recycler }
    }
}

impl TxBuffer for PooledFrame {
    fn as_slice(&self) -> &[u8] {
        &self.frame
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.frame
    }
}

impl Drop for PooledFrame {
    fn drop(&mut self) {
        let frame = mem::take(&mut self.frame);
        self.recycler.reclaim(frame);
    }
}
