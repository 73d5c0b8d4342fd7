#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

//! `weft-link` 实现以太网发送路径：帧头布局、单次分配的就地构帧与出队提交。
//!
//! # 模块定位（Why）
//! - 承接 `weft-core` 的三类契约（字节序类型、写游标、池与队列），
//!   把“发一帧以太网报文”落成一条固定的快路径：
//!   校验 → 租借 → 就地写头部 → 就地写负载 → 移交硬件；
//! - 全路径零中间缓冲：头部经 [`EthernetHeader`] 类型映射直写帧内存，
//!   负载由调用方的写入者直接产出到帧内存，提交即放手。
//!
//! # 设计概要（How）
//! - `frame` 模块定义线上头部布局，布局正确性由编译期断言保证；
//! - `sender` 模块实现 [`FrameSender`]，单帧与批量共用同一构帧核心，
//!   批量路径把每帧一次的队列交互摊薄为每批一次。

extern crate alloc;

mod frame;
mod sender;

pub use frame::{EthernetHeader, HEADER_LEN};
pub use sender::FrameSender;
