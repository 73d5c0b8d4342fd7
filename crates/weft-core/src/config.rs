//! 链路配置。
//!
//! 配置对象只描述静态参数（本端地址、MTU），由装配层在构建发送器时传入；
//! 运行期不支持热更新，数据面不在发送路径上读任何可变配置。

use serde::{Deserialize, Serialize};

use crate::error::{codes, LinkError, Result};
use crate::link::MacAddr;

/// 标准以太网负载 MTU。
pub const DEFAULT_MTU: usize = 1500;

/// 巨型帧允许的负载上限。
pub const MAX_MTU: usize = 9216;

/// 链路静态配置。
///
/// # 契约说明（What）
/// - `local_addr`：本端 MAC 地址，作为所有发出帧的源地址；
/// - `mtu`：单帧**负载**上限（不含以太网头部），发送器在租借缓冲前据此拒绝超长负载；
/// - 反序列化得到的配置未经校验，装配层必须先调用 [`validate`](Self::validate) 再投入使用。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub local_addr: MacAddr,
    #[serde(default = "default_mtu")]
    pub mtu: usize,
}

fn default_mtu() -> usize {
    DEFAULT_MTU
}

impl LinkConfig {
    /// 以默认 MTU 构造配置。
    pub fn new(local_addr: MacAddr) -> Self {
        Self {
            local_addr,
            mtu: DEFAULT_MTU,
        }
    }

    /// 覆盖 MTU，链式使用。
    pub fn with_mtu(mut self, mtu: usize) -> Self {
        self.mtu = mtu;
        self
    }

    /// 校验配置合法性。
    ///
    /// # 错误
    /// - MTU 为零或超过 [`MAX_MTU`] 时返回
    ///   [`codes::CONFIG_INVALID`](crate::error::codes::CONFIG_INVALID)。
    pub fn validate(&self) -> Result<()> {
        if self.mtu == 0 || self.mtu > MAX_MTU {
            return Err(LinkError::new(
                codes::CONFIG_INVALID,
                alloc::format!("MTU {} 超出合法区间 1..={MAX_MTU}", self.mtu),
            ));
        }
        Ok(())
    }
}
