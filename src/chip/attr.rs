//! # 设备属性
//!
//! 两个对外属性，语义与 sysfs 文件一致：
//!
//! | 名称 | 权限 | 读 | 写 |
//! |------|------|----|----|
//! | `led` | 0o222 | - | 十进制整数，写入 PORTA 输出锁存 |
//! | `switch` | 0o444 | PORTB 引脚值，十进制加换行 | - |
//!
//! 属性只负责文本与整数之间的转换，寄存器访问交给 [`ChipData`]。

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;

use crate::chip::engine::ChipData;
use crate::chip::regs::Register;
use crate::config::{LED_ATTR_NAME, SWITCH_ATTR_NAME};
use crate::drivers::SmbusTransport;
use crate::error::{ChipError, ParseError, Result};

/// 所有人可写
pub const S_IWUGO: u16 = 0o222;
/// 所有人可读
pub const S_IRUGO: u16 = 0o444;

/// 按内核 `kstrtoint(buf, 10, ..)` 的规则解析十进制整数
///
/// 接受可选的 `+`/`-` 号和至少一位数字，末尾允许一个换行；
/// 其他任何字符（包括空白）都是非法输入。超出 `i32` 范围返回 `Overflow`。
pub fn parse_int(text: &str) -> core::result::Result<i32, ParseError> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::Invalid);
    }

    let mut value: i64 = 0;
    for b in digits.bytes() {
        value = value * 10 + i64::from(b - b'0');
        if value > i64::from(i32::MAX) + 1 {
            return Err(ParseError::Overflow);
        }
    }
    let value = if negative { -value } else { value };
    i32::try_from(value).map_err(|_| ParseError::Overflow)
}

/// `led` 属性，只写
pub struct LedAttribute<T> {
    chip: Arc<ChipData<T>>,
}

impl<T: SmbusTransport> LedAttribute<T> {
    pub fn new(chip: Arc<ChipData<T>>) -> Self {
        Self { chip }
    }

    pub const fn name(&self) -> &'static str {
        LED_ATTR_NAME
    }

    pub const fn mode(&self) -> u16 {
        S_IWUGO
    }

    /// 写入属性
    ///
    /// 解析失败时不访问硬件。解析出的整数按 16 位传给引擎，
    /// 再由总线帧截断为低 8 位，即写入 `value mod 256`。
    ///
    /// # 返回值
    ///
    /// 成功返回消耗的字节数（整个输入）
    pub fn store(&self, buf: &str) -> Result<usize> {
        crate::debug!("{:02x}: set_chip_led", self.chip.address());

        let value = parse_int(buf)?;
        crate::debug!("{:02x}: set_chip_led: write to i2c with val {}", self.chip.address(), value);

        self.chip.write(Register::PortALatchOut.addr(), value as u16)?;
        Ok(buf.len())
    }
}

impl<T> Clone for LedAttribute<T> {
    fn clone(&self) -> Self {
        Self { chip: Arc::clone(&self.chip) }
    }
}

/// `switch` 属性，只读
pub struct SwitchAttribute<T> {
    chip: Arc<ChipData<T>>,
}

impl<T: SmbusTransport> SwitchAttribute<T> {
    pub fn new(chip: Arc<ChipData<T>>) -> Self {
        Self { chip }
    }

    pub const fn name(&self) -> &'static str {
        SWITCH_ATTR_NAME
    }

    pub const fn mode(&self) -> u16 {
        S_IRUGO
    }

    /// 读取属性，返回十进制文本加换行
    ///
    /// 总线失败时返回错误而不是文本，调用方不会把错误当成 0 读数。
    pub fn show(&self) -> Result<String> {
        crate::debug!("{:02x}: get_chip_switch", self.chip.address());

        let value = self.chip.read(Register::PortBLatchIn.addr())?;
        crate::info!("{:02x}: get_chip_switch: read returned with {}!", self.chip.address(), value);
        Ok(format!("{}\n", value))
    }
}

impl<T> Clone for SwitchAttribute<T> {
    fn clone(&self) -> Self {
        Self { chip: Arc::clone(&self.chip) }
    }
}

/// 一个设备实例上注册的全部属性
///
/// 按名称分发读写，并按权限位拒绝方向不对的访问。
pub struct AttributeGroup<T> {
    led: LedAttribute<T>,
    switch: SwitchAttribute<T>,
}

impl<T: SmbusTransport> AttributeGroup<T> {
    pub fn new(chip: Arc<ChipData<T>>) -> Self {
        Self {
            led: LedAttribute::new(Arc::clone(&chip)),
            switch: SwitchAttribute::new(chip),
        }
    }

    pub fn led(&self) -> &LedAttribute<T> {
        &self.led
    }

    pub fn switch(&self) -> &SwitchAttribute<T> {
        &self.switch
    }

    /// 属性名列表
    pub fn names(&self) -> [&'static str; 2] {
        [self.led.name(), self.switch.name()]
    }

    /// 查询属性权限
    pub fn mode(&self, name: &str) -> Result<u16> {
        match name {
            LED_ATTR_NAME => Ok(self.led.mode()),
            SWITCH_ATTR_NAME => Ok(self.switch.mode()),
            _ => Err(ChipError::NoSuchAttribute),
        }
    }

    /// 按名称写属性
    pub fn store(&self, name: &str, buf: &str) -> Result<usize> {
        match name {
            LED_ATTR_NAME => self.led.store(buf),
            SWITCH_ATTR_NAME => Err(ChipError::PermissionDenied),
            _ => Err(ChipError::NoSuchAttribute),
        }
    }

    /// 按名称读属性
    pub fn show(&self, name: &str) -> Result<String> {
        match name {
            SWITCH_ATTR_NAME => self.switch.show(),
            LED_ATTR_NAME => Err(ChipError::PermissionDenied),
            _ => Err(ChipError::NoSuchAttribute),
        }
    }
}

impl<T> Clone for AttributeGroup<T> {
    fn clone(&self) -> Self {
        Self {
            led: self.led.clone(),
            switch: self.switch.clone(),
        }
    }
}

// ============================================================================
// 单元测试
// ============================================================================
