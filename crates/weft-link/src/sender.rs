//! 以太网发送器：校验、租借、就地构帧与出队提交的汇合点。

use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use weft_core::{
    EtherType, LinkConfig, LinkError, MacAddr, Result, WriteCursor,
    buffer::FramePool,
    error::codes,
    queue::{EgressDescriptor, EgressQueue},
};

use crate::frame::{EthernetHeader, HEADER_LEN};

/// `FrameSender` 实现以太网帧的发送快路径。
///
/// # 设计背景（Why）
/// - 一次发送只做一次事：一次容量校验、一次池租借、一次顺序构帧、一次队列提交。
///   头部与负载共用同一块租借内存，路径上没有任何中间缓冲或拷贝；
/// - 失败语义靠所有权兜底：构帧或提交的任何失败都让帧缓冲随错误路径销毁并回池，
///   “半成品帧被发出”与“失败后泄漏槽位”都不可表达。
///
/// # 逻辑解析（How）
/// 1. 负载长度先对 MTU 校验，超长请求在租借前拒绝，不浪费池槽位；
/// 2. 租借恰好 `HEADER_LEN + payload_len` 字节的帧；
/// 3. 游标先映射 [`EthernetHeader`] 填三元组（目的、源、类型），
///    再把游标交给调用方的负载写入者，写入者必须恰好写满声明的负载长度；
/// 4. 构帧完成后包装为出队描述符提交，所有权一次性移交硬件。
///
/// # 契约说明（What）
/// - **错误**：超长负载返回 [`codes::FRAME_PAYLOAD_TOO_LARGE`]；
///   写入者少写返回 [`codes::FRAME_INCOMPLETE_PAYLOAD`]；多写在游标层
///   以 [`codes::CURSOR_OVERRUN`] 上浮；池与队列的错误原样传播；
/// - **后置条件**：返回 `Ok` 当且仅当整帧已排入出队环；任何 `Err` 都意味着
///   没有字节进入硬件，且帧槽位已回池。
pub struct FrameSender<Q> {
    pool: Arc<dyn FramePool>,
    queue: Q,
    config: LinkConfig,
}

impl<Q: EgressQueue> FrameSender<Q> {
    /// 以帧池、出队环与链路配置构造发送器。
    ///
    /// # 错误
    /// - 配置校验失败时返回 [`codes::CONFIG_INVALID`]，发送器不会被构造。
    pub fn new(pool: Arc<dyn FramePool>, queue: Q, config: LinkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pool,
            queue,
            config,
        })
    }

    /// 本端 MAC 地址（所有发出帧的源地址）。
    pub fn local_addr(&self) -> MacAddr {
        self.config.local_addr
    }

    /// 发送一帧：负载由写入者直接产出到帧内存。
    ///
    /// # 契约说明（What）
    /// - `payload_len`：声明的负载长度，可为零（纯头部帧）；
    /// - `payload_writer`：在恰好 `payload_len` 字节的游标上构造负载，
    ///   必须写满——少写与多写都是契约违例，帧不会被提交。
    pub fn send_frame<F>(
        &self,
        dst: MacAddr,
        ether_type: EtherType,
        payload_len: usize,
        payload_writer: F,
    ) -> Result<()>
    where
        F: for<'a> FnOnce(WriteCursor<'a>) -> Result<WriteCursor<'a>>,
    {
        let descriptor = self.build_frame(dst, ether_type, payload_len, payload_writer)?;
        self.queue.submit(descriptor)
    }

    /// 发送一帧既有字节负载的便捷入口。
    pub fn send_payload(&self, dst: MacAddr, ether_type: EtherType, payload: &[u8]) -> Result<()> {
        self.send_frame(dst, ether_type, payload.len(), |cursor| {
            cursor.write_bytes(payload)
        })
    }

    /// 批量发送：先构造全部帧，再以一次批量提交移交硬件。
    ///
    /// # 逻辑解析（How）
    /// - 把每帧一次的队列交互（通常伴随门铃写）摊薄为每批一次，这是批量路径的全部意义；
    /// - 任何一帧构造失败都让整批在提交前终止：已构造的描述符随错误路径销毁回池，
    ///   硬件看不到部分批次。提交阶段的失败语义由队列契约决定（先入队的帧照常发送）。
    pub fn send_batch(
        &self,
        dst: MacAddr,
        ether_type: EtherType,
        payloads: &[&[u8]],
    ) -> Result<()> {
        let mut batch = Vec::with_capacity(payloads.len());
        for payload in payloads {
            batch.push(self.build_frame(dst, ether_type, payload.len(), |cursor| {
                cursor.write_bytes(payload)
            })?);
        }
        self.queue.submit_batch(batch)
    }

    /// 构帧核心：校验、租借、写头部、写负载，产出待提交的描述符。
    fn build_frame<F>(
        &self,
        dst: MacAddr,
        ether_type: EtherType,
        payload_len: usize,
        payload_writer: F,
    ) -> Result<EgressDescriptor>
    where
        F: for<'a> FnOnce(WriteCursor<'a>) -> Result<WriteCursor<'a>>,
    {
        if payload_len > self.config.mtu {
            return Err(LinkError::new(
                codes::FRAME_PAYLOAD_TOO_LARGE,
                format!("负载 {payload_len} 字节超过 MTU {}", self.config.mtu),
            ));
        }

        let frame_len = HEADER_LEN + payload_len;
        let mut frame = self.pool.acquire(frame_len)?;

        let cursor = WriteCursor::new(frame.as_mut_slice());
        let cursor = cursor.write_with::<EthernetHeader>(|header| {
            header.dst = dst;
            header.src = self.config.local_addr;
            header.ether_type = ether_type;
        })?;
        let cursor = payload_writer(cursor)?;
        if cursor.remaining() != 0 {
            return Err(LinkError::new(
                codes::FRAME_INCOMPLETE_PAYLOAD,
                format!(
                    "负载写入者少写 {} 字节（声明 {payload_len} 字节）",
                    cursor.remaining()
                ),
            ));
        }

        EgressDescriptor::new(frame, frame_len)
    }
}
