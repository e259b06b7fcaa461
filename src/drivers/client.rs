//! # I2C 客户端
//!
//! 把原始 [`I2c`] 总线和一个从设备地址绑定在一起，
//! 在其上按 SMBus byte-data 协议组帧，实现 [`SmbusTransport`]。
//!
//! ## 帧格式
//!
//! ```text
//! write byte data:  S addr+W  cmd  value  P
//! read byte data:   S addr+W  cmd  Sr addr+R  value  P
//! ```

use crate::drivers::{Functionality, I2c, SmbusTransport};
use crate::error::BusError;

/// 绑定到单个从地址的 I2C 客户端
pub struct I2cClient<B> {
    bus: B,
    addr: u8,
}

impl<B> I2cClient<B>
where
    B: I2c,
    B::Error: Into<BusError>,
{
    /// 创建客户端
    ///
    /// # 参数
    ///
    /// - `bus`: 原始 I2C 总线
    /// - `addr`: 7位从设备地址
    pub fn new(bus: B, addr: u8) -> Self {
        Self { bus, addr }
    }

    /// 获取底层总线引用
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// 获取底层总线可变引用
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// 拆分出底层总线
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B> SmbusTransport for I2cClient<B>
where
    B: I2c,
    B::Error: Into<BusError>,
{
    fn address(&self) -> u8 {
        self.addr
    }

    fn functionality(&self) -> Functionality {
        Functionality::plain_i2c()
    }

    fn read_byte_data(&mut self, command: u8) -> Result<u8, BusError> {
        let mut value = [0u8; 1];
        self.bus
            .write_read(self.addr, &[command], &mut value)
            .map_err(Into::into)?;
        Ok(value[0])
    }

    fn write_byte_data(&mut self, command: u8, value: u8) -> Result<(), BusError> {
        self.bus
            .write(self.addr, &[command, value])
            .map_err(Into::into)
    }
}
