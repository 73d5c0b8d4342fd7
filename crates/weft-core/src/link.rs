//! 链路层基础类型：MAC 地址与 EtherType。
//!
//! 两个类型都满足“可嵌入线上结构体”的布局要求：对齐为 1、尺寸与线上字段一致、
//! 实现 `Pod`/`Zeroable`，以太网头部可以直接由它们拼装后经游标就地写入帧内存。

use core::fmt;
use core::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::endian::{NetU16, NetValue};
use crate::error::{codes, LinkError};

/// 48 位以太网 MAC 地址，按线上字节序存储。
///
/// # 契约说明（What）
/// - 内部即线上表示（6 字节，无字节序转换问题），可直接作为帧头字段；
/// - 文本形式固定为小写冒号分隔十六进制（`aa:bb:cc:dd:ee:ff`），
///   `Display` 与 `FromStr` 互为逆运算，serde 序列化采用同一文本形式以便配置文件书写。
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr([u8; 6]);

#[allow(unsafe_code)]
unsafe impl Zeroable for MacAddr {}

#[allow(unsafe_code)]
unsafe impl Pod for MacAddr {}

impl MacAddr {
    /// 广播地址 `ff:ff:ff:ff:ff:ff`。
    pub const BROADCAST: MacAddr = MacAddr([0xFF; 6]);

    /// 以线上字节序的 6 字节构造地址。
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// 返回线上字节序的 6 字节。
    pub const fn octets(self) -> [u8; 6] {
        self.0
    }

    /// 是否为广播地址。
    pub fn is_broadcast(self) -> bool {
        self == Self::BROADCAST
    }

    /// 是否为组播地址（首字节最低位为 1，广播是其特例）。
    pub fn is_multicast(self) -> bool {
        self.0[0] & 0x01 != 0
    }

    /// 是否为单播地址。
    pub fn is_unicast(self) -> bool {
        !self.is_multicast()
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl fmt::Debug for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddr({self})")
    }
}

impl FromStr for MacAddr {
    type Err = LinkError;

    /// 解析 `aa:bb:cc:dd:ee:ff` 形式的文本地址，大小写不敏感。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || LinkError::new(codes::CONFIG_INVALID, "MAC 地址应为 aa:bb:cc:dd:ee:ff 形式");

        let mut octets = [0u8; 6];
        let mut parts = s.split(':');
        for slot in &mut octets {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 {
                return Err(invalid());
            }
            *slot = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(octets))
    }
}

impl Serialize for MacAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = alloc::string::String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// 以太网帧类型字段（EtherType），存储恒为网络序。
///
/// 常见取值以关联常量给出；未登记的值同样合法，上层协议自行解释。
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EtherType(NetU16);

#[allow(unsafe_code)]
unsafe impl Zeroable for EtherType {}

#[allow(unsafe_code)]
unsafe impl Pod for EtherType {}

impl EtherType {
    /// IPv4（0x0800）。
    pub const IPV4: EtherType = EtherType::from_net_octets([0x08, 0x00]);
    /// ARP（0x0806）。
    pub const ARP: EtherType = EtherType::from_net_octets([0x08, 0x06]);
    /// IPv6（0x86DD）。
    pub const IPV6: EtherType = EtherType::from_net_octets([0x86, 0xDD]);

    /// 以宿主序值构造。
    pub fn new(host: u16) -> Self {
        Self(NetU16::from_host(host))
    }

    /// 以网络序的 2 字节构造，供本 crate 定义编译期常量使用。
    pub const fn from_net_octets(octets: [u8; 2]) -> Self {
        Self(NetValue { net: octets })
    }

    /// 宿主序值。
    pub fn host(self) -> u16 {
        self.0.host()
    }

    /// 网络序包装值，可直接赋给帧头字段。
    pub fn net(self) -> NetU16 {
        self.0
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.host())
    }
}

impl fmt::Debug for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EtherType({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    /// 文本形式与 `FromStr` 互为逆运算，大小写不敏感。
    #[test]
    fn mac_display_parse_roundtrip() {
        let mac = MacAddr::new([0x02, 0x1A, 0xFF, 0x00, 0x9B, 0x7C]);
        assert_eq!(mac.to_string(), "02:1a:ff:00:9b:7c");
        assert_eq!("02:1A:FF:00:9B:7C".parse::<MacAddr>().expect("应可解析"), mac);

        assert!("02:1a:ff".parse::<MacAddr>().is_err());
        assert!("02:1a:ff:00:9b:7c:00".parse::<MacAddr>().is_err());
        assert!("zz:1a:ff:00:9b:7c".parse::<MacAddr>().is_err());
    }

    /// 广播、组播与单播的判定关系。
    #[test]
    fn mac_address_classes() {
        assert!(MacAddr::BROADCAST.is_broadcast());
        assert!(MacAddr::BROADCAST.is_multicast());
        assert!(MacAddr::new([0x01, 0, 0x5E, 0, 0, 1]).is_multicast());
        assert!(MacAddr::new([0x02, 0, 0, 0, 0, 1]).is_unicast());
    }

    /// 内置 EtherType 常量的网络序字节与宿主值一致。
    #[test]
    fn ether_type_constants() {
        assert_eq!(EtherType::IPV4.host(), 0x0800);
        assert_eq!(EtherType::IPV4.net().net_bytes(), [0x08, 0x00]);
        assert_eq!(EtherType::IPV6, EtherType::new(0x86DD));
        assert_eq!(EtherType::ARP.to_string(), "0x0806");
    }
}
