//! MCP23017 寄存器表（IOCON.BANK = 0）
//!
//! 只列出驱动用到的寄存器。表是与芯片数据手册之间的静态约定，运行时不可修改。

/// 芯片寄存器
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Register {
    /// PORTA 方向寄存器（IODIRA），位为 1 表示输入
    DirPortA = 0x00,
    /// PORTB 方向寄存器（IODIRB）
    DirPortB = 0x01,
    /// PORTA 引脚采样（GPIOA）
    PortALatchIn = 0x12,
    /// PORTB 引脚采样（GPIOB），拨码开关
    PortBLatchIn = 0x13,
    /// PORTA 输出锁存（OLATA），LED
    PortALatchOut = 0x14,
    /// PORTB 输出锁存（OLATB）
    PortBLatchOut = 0x15,
}

impl Register {
    pub const ALL: [Register; 6] = [
        Register::DirPortA,
        Register::DirPortB,
        Register::PortALatchIn,
        Register::PortBLatchIn,
        Register::PortALatchOut,
        Register::PortBLatchOut,
    ];

    /// 寄存器地址
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// 数据手册中的名称
    pub const fn name(self) -> &'static str {
        match self {
            Register::DirPortA => "IODIRA",
            Register::DirPortB => "IODIRB",
            Register::PortALatchIn => "GPIOA",
            Register::PortBLatchIn => "GPIOB",
            Register::PortALatchOut => "OLATA",
            Register::PortBLatchOut => "OLATB",
        }
    }

    /// 按地址查表，不在表中的地址返回 `None`
    pub fn from_addr(addr: u8) -> Option<Register> {
        Self::ALL.into_iter().find(|reg| reg.addr() == addr)
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> Self {
        reg.addr()
    }
}
