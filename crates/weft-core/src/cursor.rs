//! 零拷贝写游标：在单块连续帧内存上按顺序就地构帧。
//!
//! # 设计背景（Why）
//! - 发送路径的硬性前提是**单次分配、就地填充**：帧缓冲由硬件缓冲池租出，
//!   头部与负载直接写入最终内存，不存在“先攒临时缓冲再拷贝”的慢路径；
//! - 手工维护偏移量是越界写的温床。游标把“当前位置”收进自身状态，
//!   每次写入原子地推进，越界在写入发生前被拒绝。
//!
//! # 逻辑解析（How）
//! - 游标采用消费式 API：每个写入方法取得 `self` 的所有权，成功后返回推进过的游标。
//!   失败时游标随错误一起消亡，已写入的前缀保持不变，不存在“半写入后继续推进”的状态；
//! - [`WriteCursor::write_with`] 将下一段字节重解释为 `#[repr(C)]` 线上结构体并交由闭包填充。
//!   结构体对齐必须为 1（全字段为字节数组或 [`NetValue`](crate::endian::NetValue)），
//!   该约束在编译期断言，因此任意偏移处的映射都不会因对齐失败。
//!
//! # 契约说明（What）
//! - 游标只借用内存（`&mut [u8]`），不拥有帧缓冲；缓冲的生命周期与回收由租借方负责；
//! - 写入区间在映射前整体清零：结构体中闭包未触及的字段落为确定的全零，而非租借内存的残留值。

use alloc::format;
use core::mem::{align_of, size_of};

use bytemuck::Pod;

use crate::error::{codes, LinkError, Result};

/// 顺序写游标。
///
/// # 契约说明（What）
/// - **前置条件**：`buf` 是帧的完整可写区间，游标从偏移 0 开始；
/// - **不变量**：`written() + remaining()` 恒等于初始容量；每次成功写入推进 `written()`，
///   失败的写入不改变缓冲内容；
/// - **后置条件**：游标消亡后，已写入前缀保留在 `buf` 中，调用方据 `written()` 判断构帧是否完整。
#[derive(Debug)]
pub struct WriteCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> WriteCursor<'a> {
    /// 在给定可写区间上创建游标，初始位置为区间起点。
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// 已写入的字节数（亦即下一次写入的起始偏移）。
    pub fn written(&self) -> usize {
        self.pos
    }

    /// 剩余可写的字节数。
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// 将接下来的 `size_of::<T>()` 字节映射为线上结构体并交由闭包填充。
    ///
    /// # 逻辑解析（How）
    /// - 目标区间先整体清零，再经 `bytemuck` 重解释为 `&mut T`，闭包直接写最终内存；
    /// - `T` 的对齐在编译期断言为 1：线上结构体的字段应全部由字节数组与
    ///   [`NetValue`](crate::endian::NetValue) 构成，违反者无法通过编译。
    ///
    /// # 错误
    /// - 剩余空间不足 `size_of::<T>()` 时返回 [`codes::CURSOR_OVERRUN`]，缓冲内容不变。
    pub fn write_with<T: Pod>(mut self, fill: impl FnOnce(&mut T)) -> Result<Self> {
        const {
            assert!(
                align_of::<T>() == 1,
                "线上结构体的对齐必须为 1，字段应使用字节数组或 NetValue"
            );
        }

        let len = size_of::<T>();
        if len > self.remaining() {
            return Err(LinkError::new(
                codes::CURSOR_OVERRUN,
                format!(
                    "类型写入越界：需要 {len} 字节，偏移 {} 处仅剩 {}",
                    self.pos,
                    self.remaining()
                ),
            ));
        }

        let slot = &mut self.buf[self.pos..self.pos + len];
        slot.fill(0);
        fill(bytemuck::from_bytes_mut::<T>(slot));
        self.pos += len;
        Ok(self)
    }

    /// 将字节切片原样追加到当前位置。
    ///
    /// # 错误
    /// - 剩余空间不足 `src.len()` 时返回 [`codes::CURSOR_OVERRUN`]，缓冲内容不变。
    pub fn write_bytes(mut self, src: &[u8]) -> Result<Self> {
        if src.len() > self.remaining() {
            return Err(LinkError::new(
                codes::CURSOR_OVERRUN,
                format!(
                    "字节写入越界：需要 {} 字节，偏移 {} 处仅剩 {}",
                    src.len(),
                    self.pos,
                    self.remaining()
                ),
            ));
        }

        self.buf[self.pos..self.pos + src.len()].copy_from_slice(src);
        self.pos += src.len();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::NetU16;
    use bytemuck::Zeroable;

    #[repr(C)]
    #[derive(Clone, Copy)]
    struct Header {
        tag: [u8; 2],
        length: NetU16,
    }

    #[allow(unsafe_code)]
    unsafe impl Zeroable for Header {}

    #[allow(unsafe_code)]
    unsafe impl Pod for Header {}

    /// 顺序写入推进位置，闭包未触及的字段落为零。
    #[test]
    fn sequential_writes_advance_cursor() {
        let mut buf = [0xAAu8; 8];
        let cursor = WriteCursor::new(&mut buf);
        assert_eq!(cursor.remaining(), 8);

        let cursor = cursor
            .write_with::<Header>(|h| {
                h.length = NetU16::from_host(0x1234);
            })
            .expect("头部应写入成功");
        assert_eq!(cursor.written(), 4);

        let cursor = cursor.write_bytes(&[0xDE, 0xAD]).expect("负载应写入成功");
        assert_eq!(cursor.remaining(), 2);

        // tag 未被闭包触及，必须是清零后的 0x00 而非残留的 0xAA。
        assert_eq!(&buf[..6], &[0x00, 0x00, 0x12, 0x34, 0xDE, 0xAD]);
    }

    /// 越界写入返回稳定错误码，且缓冲内容保持不变。
    #[test]
    fn overrun_is_rejected_without_corruption() {
        let mut buf = [0x55u8; 2];
        let cursor = WriteCursor::new(&mut buf);

        let err = cursor
            .write_with::<Header>(|_| {})
            .expect_err("2 字节区间容不下 4 字节头部");
        assert_eq!(err.code(), crate::error::codes::CURSOR_OVERRUN);
        assert_eq!(buf, [0x55, 0x55]);
    }

    /// 空切片写入是合法的空操作。
    #[test]
    fn empty_write_is_noop() {
        let mut buf = [0u8; 4];
        let cursor = WriteCursor::new(&mut buf);
        let cursor = cursor.write_bytes(&[]).expect("空写入不应失败");
        assert_eq!(cursor.written(), 0);
    }
}
