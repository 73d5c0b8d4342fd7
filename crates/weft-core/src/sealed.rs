//! 内部 sealed 模块用于控制外部扩展边界。
//!
//! # 设计背景（Why）
//! - [`crate::endian::HostUint`] 的宽度集合是封闭的（8/16/32/64 位无符号整数）：
//!   字节序包装器的等值、哈希与回绕算术契约只对这一集合做过验证，
//!   任意外部实现都可能破坏“宿主值与网络字节表示一一对应”的前提。
//! - 通过私有 `Sealed` 标记让“在不支持的宽度上实例化”成为编译期错误，而非运行期检查。
//!
//! # 逻辑解析（How）
//! - 定义私有模块级 Trait `Sealed`，仅在 [`crate::endian`] 的宽度宏中为封闭集合内的类型实现；
//! - 公开 Trait 通过 `: crate::sealed::Sealed` 间接依赖该标记，调用方无法补充实现。
//!
//! # 契约说明（What）
//! - 若未来引入有符号或变宽字段，必须先复核等值/哈希定义域的一致性（参见 DESIGN.md 的开放问题），
//!   再在此集合中登记新类型。
pub(crate) trait Sealed {}
