//! 网络字节序类型系统。
//!
//! # 模块定位（Why）
//! - 手写二进制协议最常见的缺陷来自字节序：某个 16/32 位字段在构帧时忘记转换，
//!   在小端宿主上悄悄写出错误的线上表示。本模块把“存储恒为网络序（大端）”
//!   编码进类型，使该类缺陷在编译期整体消失；
//! - 包装器可直接嵌入 `#[repr(C)]` 线上结构体：内部以字节数组存储，
//!   尺寸与字段宽度严格一致、对齐恒为 1、无任何填充，因此任意偏移处的就地写入都合法。
//!
//! # 核心机制（How）
//! - [`HostUint`] 是封闭的宽度集合（u8/u16/u32/u64），经由私有 `Sealed` 标记密封；
//!   在集合之外实例化 [`NetValue`] 是编译期错误，不存在运行期的“宽度不支持”分支。
//! - 各宽度实现复用平台优化的 `to_be_bytes`/`from_be_bytes` 内建转换，
//!   相当于 htons/htonl 的快速路径；通用的逐字节反转在 Rust 内建函数之下已无存在必要。
//! - 等值、哈希与加减法全部定义在**宿主逻辑值**上：`NetValue::from_host(5) == 5`
//!   在任何宿主字节序下成立；算术携带宽度 W 的回绕语义。
//!
//! # 契约说明（What）
//! - 两个构造入口不可混用：[`NetValue::from_host`] 在构造时转换；
//!   [`NetValue::from_net_bytes`] 将已是网络序的原始字节原样存入，用于从另一网络序来源逐字节复制的字段。
//! - 对封闭的无符号集合，大端编码是双射，因此“宿主值相等”与“原始字节相等”等价；
//!   哈希取宿主值计算，与等值定义保持一致。

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Add, Sub};

use bytemuck::{Pod, Zeroable};

use crate::sealed::Sealed;

/// `HostUint` 描述可被 [`NetValue`] 包装的宿主无符号整数宽度。
///
/// # 契约说明（What）
/// - `Bytes`：宽度对应的大端字节数组表示，尺寸恰为 `WIDTH_BITS / 8`；
/// - `to_net_bytes` / `from_net_bytes`：宿主值与网络序字节的互换，必须互为逆运算；
/// - `wrapping_add` / `wrapping_sub`：宽度 W 的回绕算术（例如 16 位下 `0xFFFF + 1 == 0x0000`）。
///
/// # 扩展边界（Trade-offs）
/// - Trait 经 `Sealed` 密封：等值与哈希的一致性论证只覆盖无符号定宽集合，
///   有符号或变宽字段在复核该论证前不得加入。
pub trait HostUint:
    Sealed + Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// 网络序（大端）字节数组表示。
    type Bytes: Copy + Eq + AsRef<[u8]> + AsMut<[u8]> + fmt::Debug + Pod + Send + Sync + 'static;

    /// 字段宽度（比特）。
    const WIDTH_BITS: u32;

    /// 将宿主值转换为网络序字节。
    fn to_net_bytes(self) -> Self::Bytes;

    /// 将网络序字节解释为宿主值。
    fn from_net_bytes(bytes: Self::Bytes) -> Self;

    /// 宽度 W 的回绕加法。
    fn wrapping_add(self, rhs: Self) -> Self;

    /// 宽度 W 的回绕减法。
    fn wrapping_sub(self, rhs: Self) -> Self;
}

/// 存储恒为网络字节序的定宽无符号整数。
///
/// # 布局保证（What）
/// - `#[repr(transparent)]` 包装大端字节数组：`size_of::<NetValue<T>>()` 恰等于字段宽度，
///   `align_of` 恒为 1，无填充，可直接作为 `#[repr(C)]` 线上结构体的字段参与就地构帧；
/// - 实现 [`Pod`]/[`Zeroable`]，允许游标将其所在的结构体整体映射到帧缓冲内部。
///
/// # 运算语义（How）
/// - 等值：对包装值之间的比较即原始字节比较（与宿主值比较等价）；
///   与裸宿主值的双向比较先解码再比较；
/// - 算术：操作数解码为宿主值，按宽度 W 回绕运算，结果重新编码为网络序；
/// - 哈希：取宿主值计算，逻辑值相等的包装必然哈希相等。
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct NetValue<T: HostUint> {
    pub(crate) net: T::Bytes,
}

#[allow(unsafe_code)]
unsafe impl<T: HostUint> Zeroable for NetValue<T> {}

/// `NetValue` 的任意位组合都是合法值：内部仅是定宽字节数组，无非法状态。
#[allow(unsafe_code)]
unsafe impl<T: HostUint> Pod for NetValue<T> {}

impl<T: HostUint> NetValue<T> {
    /// 以宿主序值构造，存储时转换为网络序。
    pub fn from_host(value: T) -> Self {
        Self {
            net: value.to_net_bytes(),
        }
    }

    /// 以**已是网络序**的原始字节构造，不做任何转换。
    ///
    /// 适用于从另一网络序来源（收到的帧、另一条配置通路）逐字节复制的字段；
    /// 若传入宿主序字节，产生的线上表示将是错的——调用方必须区分两个入口。
    pub fn from_net_bytes(net: T::Bytes) -> Self {
        Self { net }
    }

    /// 解码为宿主序值。纯函数，无副作用。
    pub fn host(self) -> T {
        T::from_net_bytes(self.net)
    }

    /// 返回网络序原始字节。
    ///
    /// 保真性：`from_net_bytes(x).net_bytes() == x`，全程无转换。
    pub fn net_bytes(self) -> T::Bytes {
        self.net
    }
}

impl<T: HostUint> PartialEq<T> for NetValue<T> {
    fn eq(&self, other: &T) -> bool {
        self.host() == *other
    }
}

impl<T: HostUint> Hash for NetValue<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.host().hash(state);
    }
}

impl<T: HostUint> fmt::Debug for NetValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NetValue").field(&self.host()).finish()
    }
}

impl<T: HostUint> fmt::Display for NetValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host(), f)
    }
}

impl<T: HostUint> Add for NetValue<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_host(self.host().wrapping_add(rhs.host()))
    }
}

impl<T: HostUint> Add<T> for NetValue<T> {
    type Output = Self;

    fn add(self, rhs: T) -> Self {
        Self::from_host(self.host().wrapping_add(rhs))
    }
}

impl<T: HostUint> Sub for NetValue<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_host(self.host().wrapping_sub(rhs.host()))
    }
}

impl<T: HostUint> Sub<T> for NetValue<T> {
    type Output = Self;

    fn sub(self, rhs: T) -> Self {
        Self::from_host(self.host().wrapping_sub(rhs))
    }
}

/// 为封闭集合内的每个宽度生成 [`HostUint`] 实现及裸值侧的混合运算。
///
/// 这是原型系统中“按宽度特化字节交换”的 Rust 形态：
/// 特化集合在编译期展开为有限的静态实现，而非运行期派发表。
macro_rules! host_uint {
    ($($ty:ty => $bits:literal bits, $len:literal bytes;)+) => {
        $(
            impl Sealed for $ty {}

            impl HostUint for $ty {
                type Bytes = [u8; $len];

                const WIDTH_BITS: u32 = $bits;

                #[inline]
                fn to_net_bytes(self) -> Self::Bytes {
                    self.to_be_bytes()
                }

                #[inline]
                fn from_net_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }

                #[inline]
                fn wrapping_add(self, rhs: Self) -> Self {
                    <$ty>::wrapping_add(self, rhs)
                }

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$ty>::wrapping_sub(self, rhs)
                }
            }

            impl PartialEq<NetValue<$ty>> for $ty {
                fn eq(&self, other: &NetValue<$ty>) -> bool {
                    *self == other.host()
                }
            }

            impl Add<NetValue<$ty>> for $ty {
                type Output = NetValue<$ty>;

                fn add(self, rhs: NetValue<$ty>) -> NetValue<$ty> {
                    NetValue::from_host(<$ty>::wrapping_add(self, rhs.host()))
                }
            }

            impl Sub<NetValue<$ty>> for $ty {
                type Output = NetValue<$ty>;

                fn sub(self, rhs: NetValue<$ty>) -> NetValue<$ty> {
                    NetValue::from_host(<$ty>::wrapping_sub(self, rhs.host()))
                }
            }
        )+
    };
}

host_uint! {
    u8  => 8 bits, 1 bytes;
    u16 => 16 bits, 2 bytes;
    u32 => 32 bits, 4 bytes;
    u64 => 64 bits, 8 bytes;
}

/// 8 位网络序值。单字节无字节序之分，保留此别名是为了线上结构体字段风格统一。
pub type NetU8 = NetValue<u8>;
/// 16 位网络序值（EtherType、端口号、校验和等字段的载体）。
pub type NetU16 = NetValue<u16>;
/// 32 位网络序值（IPv4 地址、序列号等字段的载体）。
pub type NetU32 = NetValue<u32>;
/// 64 位网络序值。
pub type NetU64 = NetValue<u64>;

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{align_of, size_of};

    /// 布局不变量：尺寸恰为宽度、对齐恒为 1，保证可嵌入任意偏移的线上结构体。
    #[test]
    fn layout_matches_wire_width() {
        assert_eq!(size_of::<NetU8>(), 1);
        assert_eq!(size_of::<NetU16>(), 2);
        assert_eq!(size_of::<NetU32>(), 4);
        assert_eq!(size_of::<NetU64>(), 8);
        assert_eq!(align_of::<NetU16>(), 1);
        assert_eq!(align_of::<NetU64>(), 1);
    }

    /// `from_host` 在构造时转换为大端存储。
    #[test]
    fn from_host_stores_big_endian() {
        assert_eq!(NetU16::from_host(0x0800).net_bytes(), [0x08, 0x00]);
        assert_eq!(
            NetU32::from_host(0xC0A8_0001).net_bytes(),
            [0xC0, 0xA8, 0x00, 0x01]
        );
    }

    /// 与裸宿主值的双向比较都定义在逻辑值上。
    #[test]
    fn mixed_equality_uses_host_value() {
        let wrapped = NetU16::from_host(5);
        assert!(wrapped == 5u16);
        assert!(5u16 == wrapped);
        assert!(wrapped != 6u16);
    }

    /// 16 位回绕：`0xFFFF + 1 == 0x0000`，混合操作数两个方向均成立。
    #[test]
    fn arithmetic_wraps_at_width() {
        assert_eq!(NetU16::from_host(0xFFFF) + 1u16, NetU16::from_host(0x0000));
        assert_eq!(1u16 + NetU16::from_host(0xFFFF), NetU16::from_host(0x0000));
        assert_eq!(NetU16::from_host(0) - 1u16, NetU16::from_host(0xFFFF));
        assert_eq!(
            NetU32::from_host(u32::MAX) + NetU32::from_host(2),
            NetU32::from_host(1)
        );
    }

    /// 原始字节入口不做转换，保真返回。
    #[test]
    fn raw_bytes_roundtrip_verbatim() {
        let raw = [0xDE, 0xAD];
        assert_eq!(NetU16::from_net_bytes(raw).net_bytes(), raw);
        assert_eq!(NetU16::from_net_bytes(raw).host(), 0xDEAD);
    }
}
