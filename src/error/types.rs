/// 总线传输错误
///
/// 由 [`SmbusTransport`](crate::drivers::SmbusTransport) 实现返回，
/// 驱动核心原样向上传递，不做重试。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// 从设备未应答（地址或数据阶段 NACK）
    Nack,
    /// 总线忙
    Busy,
    /// 传输超时
    Timeout,
    /// 多主仲裁失败
    ArbitrationLost,
    /// 设备已被移除
    DeviceRemoved,
    /// 其他 I/O 错误
    Io,
}

/// 十进制文本解析错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// 不是合法的十进制整数
    Invalid,
    /// 数值超出 `i32` 范围
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipError {
    // 硬件访问
    Transport(BusError),

    // 输入校验
    Parse(ParseError),

    // 绑定相关
    OutOfMemory,
    NoDevice,
    InvalidHandle,

    // 属性相关
    NoSuchAttribute,
    PermissionDenied,
}

// errno 取值与 Linux asm-generic/errno 保持一致
const EIO: i32 = 5;
const ENXIO: i32 = 6;
const EAGAIN: i32 = 11;
const ENOMEM: i32 = 12;
const EACCES: i32 = 13;
const EBUSY: i32 = 16;
const ENODEV: i32 = 19;
const EINVAL: i32 = 22;
const ERANGE: i32 = 34;
const ENOENT: i32 = 2;
const ETIMEDOUT: i32 = 110;

impl BusError {
    /// 对应的负 errno
    pub const fn errno(self) -> i32 {
        match self {
            BusError::Nack => -ENXIO,
            BusError::Busy => -EBUSY,
            BusError::Timeout => -ETIMEDOUT,
            BusError::ArbitrationLost => -EAGAIN,
            BusError::DeviceRemoved => -ENODEV,
            BusError::Io => -EIO,
        }
    }
}

impl ParseError {
    pub const fn errno(self) -> i32 {
        match self {
            ParseError::Invalid => -EINVAL,
            ParseError::Overflow => -ERANGE,
        }
    }
}

impl ChipError {
    /// 转换为负 errno，供宿主框架直接返回给用户态
    ///
    /// 永远小于 0，调用方可以据此区分错误与合法的 0 读数。
    pub const fn errno(self) -> i32 {
        match self {
            ChipError::Transport(e) => e.errno(),
            ChipError::Parse(e) => e.errno(),
            ChipError::OutOfMemory => -ENOMEM,
            ChipError::NoDevice => -ENODEV,
            ChipError::InvalidHandle => -ENOENT,
            ChipError::NoSuchAttribute => -ENOENT,
            ChipError::PermissionDenied => -EACCES,
        }
    }

    /// 是否为总线传输错误
    pub const fn is_transport(&self) -> bool {
        matches!(self, ChipError::Transport(_))
    }
}

impl From<BusError> for ChipError {
    fn from(err: BusError) -> Self {
        ChipError::Transport(err)
    }
}

impl From<ParseError> for ChipError {
    fn from(err: ParseError) -> Self {
        ChipError::Parse(err)
    }
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BusError::Nack => write!(f, "no acknowledge from device"),
            BusError::Busy => write!(f, "bus busy"),
            BusError::Timeout => write!(f, "bus transfer timed out"),
            BusError::ArbitrationLost => write!(f, "bus arbitration lost"),
            BusError::DeviceRemoved => write!(f, "device removed"),
            BusError::Io => write!(f, "bus I/O error"),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::Invalid => write!(f, "invalid decimal integer"),
            ParseError::Overflow => write!(f, "integer out of range"),
        }
    }
}

impl core::fmt::Display for ChipError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChipError::Transport(e) => write!(f, "Transport error: {}", e),
            ChipError::Parse(e) => write!(f, "Parse error: {}", e),

            ChipError::OutOfMemory => write!(f, "Out of memory"),
            ChipError::NoDevice => write!(f, "No such device"),
            ChipError::InvalidHandle => write!(f, "Invalid device handle"),

            ChipError::NoSuchAttribute => write!(f, "No such attribute"),
            ChipError::PermissionDenied => write!(f, "Permission denied"),
        }
    }
}

pub type Result<T> = core::result::Result<T, ChipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_is_negative() {
        let all = [
            ChipError::Transport(BusError::Nack),
            ChipError::Transport(BusError::Busy),
            ChipError::Transport(BusError::Timeout),
            ChipError::Transport(BusError::ArbitrationLost),
            ChipError::Transport(BusError::DeviceRemoved),
            ChipError::Transport(BusError::Io),
            ChipError::Parse(ParseError::Invalid),
            ChipError::Parse(ParseError::Overflow),
            ChipError::OutOfMemory,
            ChipError::NoDevice,
            ChipError::InvalidHandle,
            ChipError::NoSuchAttribute,
            ChipError::PermissionDenied,
        ];
        for err in all {
            assert!(err.errno() < 0, "{:?}", err);
        }
    }

    #[test]
    fn test_errno_values() {
        assert_eq!(ChipError::Parse(ParseError::Invalid).errno(), -22);
        assert_eq!(ChipError::OutOfMemory.errno(), -12);
        assert_eq!(ChipError::NoDevice.errno(), -19);
        assert_eq!(ChipError::Transport(BusError::Nack).errno(), -6);
    }

    #[test]
    fn test_from_bus_error() {
        let err: ChipError = BusError::Timeout.into();
        assert_eq!(err, ChipError::Transport(BusError::Timeout));
        assert!(err.is_transport());
    }

    #[test]
    fn test_display() {
        let err = ChipError::Transport(BusError::Busy);
        assert_eq!(std::format!("{}", err), "Transport error: bus busy");
        let err = ChipError::Parse(ParseError::Invalid);
        assert!(std::format!("{}", err).contains("invalid decimal"));
    }
}
