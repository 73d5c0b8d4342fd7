#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![allow(private_bounds)]

//! `weft-core`: 用户态 NIC 数据面核心契约。
//!
//! 本 crate 定义数据面发送路径的三类契约：
//! 1. 网络字节序类型系统（[`endian`]）：多字节线上字段的存储恒为大端，宿主语义运算透明转换；
//! 2. 零拷贝写游标（[`cursor`]）：在硬件分配的单块连续内存上按类型顺序构帧，越界显式报错；
//! 3. 外部协作者边界（[`buffer`] / [`queue`]）：缓冲池租借与出队描述符提交，
//!    所有权在提交时一次性移交硬件。
//!
//! # 内存分配依赖
//! `weft-core` 定位于 `no_std + alloc` 场景：契约对象安全依赖 `Box`、`Vec` 等堆类型。
//! 纯 `no_std`（无分配器）环境暂不支持；硬件队列与缓冲池的初始化、链路配置下发均由外部完成。

extern crate alloc;

mod sealed;

pub mod buffer;
pub mod config;
pub mod cursor;
pub mod endian;
pub mod error;
pub mod link;
pub mod queue;
/// 测试桩命名空间，集中暴露官方维护的 `Recording`/`Counting` 实现，供集成测试与示例复用。
///
/// # 设计背景（Why）
/// - 统一维护常见桩对象，避免在各处重复定义记录型队列与计数型缓冲池；
/// - 当核心契约演进时，通过单点更新保证所有测试同步适配。
pub mod test_stubs;

pub use buffer::{FramePool, PoolStatDimension, PoolStats, TxBuffer};
pub use config::LinkConfig;
pub use cursor::WriteCursor;
pub use endian::{HostUint, NetU8, NetU16, NetU32, NetU64, NetValue};
pub use error::{ErrorKind, LinkError, Result};
pub use link::{EtherType, MacAddr};
pub use queue::{EgressDescriptor, EgressQueue};
