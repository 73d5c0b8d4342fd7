//! 以太网帧头的线上布局。

use bytemuck::{Pod, Zeroable};
use weft_core::{EtherType, MacAddr};

/// 以太网 II 帧头长度（目的地址 6 + 源地址 6 + EtherType 2）。
pub const HEADER_LEN: usize = 14;

/// 以太网 II 帧头，字段顺序与线上格式逐字节一致。
///
/// # 布局保证（What）
/// - `#[repr(C)]` 且所有字段对齐为 1：结构体无填充、总长恰为 [`HEADER_LEN`]，
///   可由写游标直接映射到帧缓冲的任意偏移处就地填充；
/// - 字段本身即线上表示：[`MacAddr`] 按线上字节序存储，[`EtherType`] 内部恒为网络序，
///   赋值即构帧，不存在序列化步骤。
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EthernetHeader {
    /// 目的 MAC 地址。
    pub dst: MacAddr,
    /// 源 MAC 地址。
    pub src: MacAddr,
    /// 负载的协议类型。
    pub ether_type: EtherType,
}

#[allow(unsafe_code)]
unsafe impl Zeroable for EthernetHeader {}

#[allow(unsafe_code)]
unsafe impl Pod for EthernetHeader {}

const _: () = assert!(core::mem::size_of::<EthernetHeader>() == HEADER_LEN);
const _: () = assert!(core::mem::align_of::<EthernetHeader>() == 1);
