#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

//! `weft-buffer` 提供面向 `FramePool` 契约的固定槽位缓冲池实现。
//!
//! # 模块定位（Why）
//! - 为 `weft-core` 的抽象帧池契约落地一个基于 `bytes::BytesMut` 的实体：
//!   槽位数量与单槽容量在构造时固定，贴合硬件缓冲区“预注册、不增长”的形态；
//! - 借助 `PooledFrame` 的 `Drop` 钩子实现回收闭环——帧随出队描述符移交硬件，
//!   发送完成后描述符销毁，槽位自动归还池中，调用方不存在显式 `free` 步骤。
//!
//! # 设计概要（How）
//! - `pool` 模块实现 [`SlabFramePool`]：`spin::Mutex` 保护的自由链表加原子指标；
//! - `pooled_frame` 模块实现 [`PooledFrame`] 与回收入口 [`FrameRecycler`]，
//!   与池之间通过 `Arc<dyn FrameRecycler>` 松耦合协作。

extern crate alloc;

mod pool;
mod pooled_frame;

pub use pool::SlabFramePool;
pub use pooled_frame::{FrameRecycler, PooledFrame};
