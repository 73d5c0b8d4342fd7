use alloc::{borrow::Cow, boxed::Box};
use core::error::Error;
use core::fmt;

/// `LinkError` 表示数据面发送路径的稳定错误域，是所有可观察故障的最终形态。
///
/// # 设计背景（Why）
/// - 发送失败必须原样上浮：上层协议（例如依赖重传的传输层）需要准确知道一帧是否真正交给了硬件，
///   任何“仅记录日志后吞掉”的处理都会破坏其状态机；
/// - 错误码区分两类语义：资源耗尽（可恢复，调用方施加背压后重试）与契约违例（编程错误，应当致命），
///   上层据此选择退避还是断言。
///
/// # 逻辑解析（How）
/// - 错误码 `code` 始终为 `'static` 字符串，承载稳定语义；`message` 面向排障人员；
///   `cause` 可选地挂接底层原因，通过 `source()` 暴露完整链路。
/// - [`ErrorKind`] 由错误码查表推导，避免在构造点重复声明分类。
///
/// # 契约说明（What）
/// - **前置条件**：调用方必须使用 [`codes`] 模块中登记的码值，或遵循 `<域>.<语义>` 约定扩展；
/// - **返回值**：构造函数返回拥有所有权的 `LinkError`，可安全跨线程移动（`Send + Sync + 'static`）。
///
/// # 设计取舍（Trade-offs）
/// - 本层只有一级错误结构：发送路径短，不存在值得分层的域/实现边界，
///   三层错误链在这里只会制造样板代码。
#[derive(Debug)]
pub struct LinkError {
    code: &'static str,
    message: Cow<'static, str>,
    cause: Option<ErrorCause>,
}

/// `ErrorCause` 封装底层原因，保持 `Send + Sync` 以方便跨线程传递。
pub type ErrorCause = Box<dyn Error + Send + Sync + 'static>;

/// `Result` 为数据面统一的返回值别名，在所有层级提供稳定的错误边界。
pub type Result<T, E = LinkError> = core::result::Result<T, E>;

/// 错误分类，驱动调用方的自动化处置策略。
///
/// # 契约说明（What）
/// - [`ErrorKind::Exhausted`]：资源暂时耗尽（缓冲池空、出队环满），可恢复；
///   重试与退避策略属于上层，本层绝不内置重试。
/// - [`ErrorKind::Violation`]：契约违例（越界写、负载长度不符、非法配置），
///   属于编程错误，重试没有意义。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    Exhausted,
    Violation,
}

impl LinkError {
    /// 构造数据面错误。
    ///
    /// # 契约说明（What）
    /// - `code`：遵循 `<域>.<语义>` 约定的稳定错误码，建议取自 [`codes`]；
    /// - `message`：面向排障人员的自然语言描述，可为 `&'static str` 或堆分配字符串；
    /// - **后置条件**：返回的错误不含底层原因，可通过 [`with_cause`](Self::with_cause) 附加。
    pub fn new(code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// 附带底层原因并返回新的错误。
    pub fn with_cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// 获取稳定错误码。
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// 获取描述。
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 获取底层原因。
    pub fn cause(&self) -> Option<&ErrorCause> {
        self.cause.as_ref()
    }

    /// 按错误码推导分类。
    ///
    /// # 返回契约
    /// - [`codes`] 中登记的耗尽类码值返回 [`ErrorKind::Exhausted`]；
    /// - 其余一律视为 [`ErrorKind::Violation`]，未登记的自定义码默认不可重试。
    pub fn kind(&self) -> ErrorKind {
        match self.code {
            codes::POOL_EXHAUSTED | codes::QUEUE_FULL => ErrorKind::Exhausted,
            _ => ErrorKind::Violation,
        }
    }

    /// 判断该错误是否适合由调用方退避后重试。
    pub fn is_recoverable(&self) -> bool {
        self.kind() == ErrorKind::Exhausted
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for LinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|boxed| boxed.as_ref() as &(dyn Error + 'static))
    }
}

/// 数据面内置的错误码常量集合，确保可观测性系统具有稳定识别符。
///
/// # 契约说明（What）
/// - **使用前提**：错误码应由实现者封装进 [`LinkError`]，并在链路日志、度量中携带完整上下文；
/// - **返回承诺**：调用方收到这些错误码后，可据此触发补救措施（退避、扩容或人工介入）。
pub mod codes {
    /// 缓冲池耗尽：当前没有空闲帧槽可租借。可恢复，建议施加背压。
    pub const POOL_EXHAUSTED: &str = "pool.exhausted";
    /// 请求的帧长超过池的单槽容量。
    pub const POOL_FRAME_TOO_LARGE: &str = "pool.frame_too_large";
    /// 出队环满：硬件消费速度跟不上提交速度。可恢复。
    pub const QUEUE_FULL: &str = "queue.full";
    /// 出队描述符非法（传输长度超出帧区间等）。编程错误。
    pub const DESCRIPTOR_INVALID: &str = "queue.descriptor_invalid";
    /// 游标越界：一次写入将超出帧预留长度。编程错误。
    pub const CURSOR_OVERRUN: &str = "cursor.overrun";
    /// 负载写入者产出的字节数少于声明的负载长度。编程错误。
    pub const FRAME_INCOMPLETE_PAYLOAD: &str = "frame.incomplete_payload";
    /// 负载长度超过链路 MTU。
    pub const FRAME_PAYLOAD_TOO_LARGE: &str = "frame.payload_too_large";
    /// 链路配置非法（MTU 越界、地址解析失败等）。
    pub const CONFIG_INVALID: &str = "config.invalid";
}

const _: fn() = || {
    fn assert_error_traits<T: Error + Send + Sync + 'static>() {}

    assert_error_traits::<LinkError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    /// 验证耗尽类码值与违例类码值分别映射到正确的分类。
    #[test]
    fn kind_is_derived_from_code() {
        assert_eq!(
            LinkError::new(codes::POOL_EXHAUSTED, "no slot").kind(),
            ErrorKind::Exhausted
        );
        assert_eq!(
            LinkError::new(codes::QUEUE_FULL, "ring full").kind(),
            ErrorKind::Exhausted
        );
        assert_eq!(
            LinkError::new(codes::CURSOR_OVERRUN, "out of range").kind(),
            ErrorKind::Violation
        );
        assert!(LinkError::new(codes::POOL_EXHAUSTED, "no slot").is_recoverable());
        assert!(!LinkError::new(codes::CONFIG_INVALID, "mtu").is_recoverable());
    }

    /// 验证 Display 输出携带稳定码值，且 `source()` 能回溯底层原因。
    #[test]
    fn display_and_cause_chain() {
        let err = LinkError::new(codes::QUEUE_FULL, "egress ring full")
            .with_cause(LinkError::new(codes::POOL_EXHAUSTED, "inner"));
        assert_eq!(alloc::format!("{err}"), "[queue.full] egress ring full");

        let source = (&err as &dyn Error).source().expect("应暴露底层原因");
        assert_eq!(alloc::format!("{source}"), "[pool.exhausted] inner");
    }
}
