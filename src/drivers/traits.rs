//! # 总线驱动 Trait 定义
//!
//! 驱动核心通过这里的 trait 访问芯片寄存器，不关心底层是哪种控制器。
//!
//! ## Trait 层次结构
//!
//! ```text
//! Device (基础设备)
//!    └── I2c (原始 I2C 总线：按字节流收发)
//!
//! SmbusTransport (绑定到单个从地址的寄存器访问通道)
//!    └── I2cClient<B: I2c> 在原始总线上组帧实现
//! ```
//!
//! ## 使用示例
//!
//! ```rust
//! use chip_i2c::drivers::{Functionality, SmbusTransport};
//! use chip_i2c::error::BusError;
//!
//! struct Loopback {
//!     regs: [u8; 256],
//! }
//!
//! impl SmbusTransport for Loopback {
//!     fn address(&self) -> u8 {
//!         0x21
//!     }
//!
//!     fn functionality(&self) -> Functionality {
//!         Functionality::byte_data()
//!     }
//!
//!     fn read_byte_data(&mut self, command: u8) -> Result<u8, BusError> {
//!         Ok(self.regs[command as usize])
//!     }
//!
//!     fn write_byte_data(&mut self, command: u8, value: u8) -> Result<(), BusError> {
//!         self.regs[command as usize] = value;
//!         Ok(())
//!     }
//! }
//! ```

use crate::bitfield;
use crate::config::BUS_FREQUENCY_HZ;
use crate::error::BusError;

// ============================================================================
// 基础设备 Trait
// ============================================================================

/// 基础设备 trait
///
/// 总线控制器实现此 trait，提供基本的设备管理功能。
pub trait Device {
    /// 设备错误类型
    type Error;

    /// 初始化设备
    ///
    /// 在使用设备之前必须调用此方法进行初始化。
    fn init(&mut self) -> Result<(), Self::Error>;

    /// 获取设备名称
    ///
    /// 返回设备的静态名称字符串，用于调试和日志。
    fn name(&self) -> &'static str;

    /// 检查设备是否就绪
    fn is_ready(&self) -> bool {
        true
    }

    /// 重置设备
    ///
    /// 将设备恢复到初始状态。默认实现调用 `init()`。
    fn reset(&mut self) -> Result<(), Self::Error> {
        self.init()
    }
}

// ============================================================================
// I2C Trait
// ============================================================================

/// I2C 配置
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// 时钟频率 (Hz)
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: BUS_FREQUENCY_HZ,
        }
    }
}

/// I2C 总线 trait
///
/// 按字节流收发，不理解寄存器语义。
pub trait I2c: Device {
    /// 配置 I2C
    fn configure(&mut self, config: I2cConfig) -> Result<(), Self::Error>;

    /// 写入数据到指定地址
    ///
    /// # 参数
    ///
    /// - `addr`: 7位设备地址
    /// - `data`: 要写入的数据
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// 从指定地址读取数据
    fn read(&mut self, addr: u8, data: &mut [u8]) -> Result<(), Self::Error>;

    /// 写入后读取
    ///
    /// 先写入数据，然后以重复起始条件读取响应（中间不发送停止位）
    fn write_read(&mut self, addr: u8, write: &[u8], read: &mut [u8]) -> Result<(), Self::Error>;
}

// ============================================================================
// SMBus 寄存器访问
// ============================================================================

bitfield! {
    /// 适配器功能位，位号与 Linux `I2C_FUNC_*` 一致
    pub struct Functionality(u32) {
        /// 支持原始 I2C 消息
        i2c: 0,
        /// SMBus read byte
        smbus_read_byte: 17,
        /// SMBus write byte
        smbus_write_byte: 18,
        /// SMBus read byte data
        smbus_read_byte_data: 19,
        /// SMBus write byte data
        smbus_write_byte_data: 20,
    }
}

impl Functionality {
    /// 只支持 SMBus byte-data 读写的适配器
    pub const fn byte_data() -> Self {
        Self::from_raw((1 << 19) | (1 << 20))
    }

    /// 原始 I2C 控制器：任何 SMBus 事务都可以用 I2C 消息模拟
    pub const fn plain_i2c() -> Self {
        Self::from_raw(1 | (1 << 17) | (1 << 18) | (1 << 19) | (1 << 20))
    }

    /// 同时支持 byte-data 读和写
    pub const fn supports_byte_data(&self) -> bool {
        self.smbus_read_byte_data() && self.smbus_write_byte_data()
    }
}

/// 寄存器访问通道
///
/// 绑定到一个固定的从设备地址，每次调用恰好是一个总线事务。
/// 总线本身的仲裁由实现者负责；同一芯片上的互斥由驱动核心的锁负责。
pub trait SmbusTransport {
    /// 从设备地址（7位）
    fn address(&self) -> u8;

    /// 适配器支持的功能
    fn functionality(&self) -> Functionality;

    /// 读取一个寄存器字节
    fn read_byte_data(&mut self, command: u8) -> Result<u8, BusError>;

    /// 写入一个寄存器字节
    fn write_byte_data(&mut self, command: u8, value: u8) -> Result<(), BusError>;
}

impl<T: SmbusTransport + ?Sized> SmbusTransport for &mut T {
    fn address(&self) -> u8 {
        (**self).address()
    }

    fn functionality(&self) -> Functionality {
        (**self).functionality()
    }

    fn read_byte_data(&mut self, command: u8) -> Result<u8, BusError> {
        (**self).read_byte_data(command)
    }

    fn write_byte_data(&mut self, command: u8, value: u8) -> Result<(), BusError> {
        (**self).write_byte_data(command, value)
    }
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct RegFile {
        regs: [u8; 32],
        addr: u8,
    }

    impl SmbusTransport for RegFile {
        fn address(&self) -> u8 {
            self.addr
        }

        fn functionality(&self) -> Functionality {
            Functionality::byte_data()
        }

        fn read_byte_data(&mut self, command: u8) -> Result<u8, BusError> {
            self.regs.get(command as usize).copied().ok_or(BusError::Nack)
        }

        fn write_byte_data(&mut self, command: u8, value: u8) -> Result<(), BusError> {
            let slot = self.regs.get_mut(command as usize).ok_or(BusError::Nack)?;
            *slot = value;
            Ok(())
        }
    }

    #[test]
    fn test_i2c_config_default() {
        let config = I2cConfig::default();
        assert_eq!(config.frequency, 100_000);
    }

    #[test]
    fn test_functionality_bits() {
        let func = Functionality::byte_data();
        assert!(func.supports_byte_data());
        assert!(!func.i2c());

        let mut func = Functionality::from_raw(0);
        assert!(!func.supports_byte_data());
        func.set_smbus_read_byte_data(true);
        assert!(!func.supports_byte_data());
        func.set_smbus_write_byte_data(true);
        assert!(func.supports_byte_data());

        assert!(Functionality::plain_i2c().i2c());
        assert!(Functionality::plain_i2c().supports_byte_data());
    }

    #[test]
    fn test_transport_through_mut_ref() {
        let mut file = RegFile { regs: [0; 32], addr: 0x21 };
        {
            let mut t = &mut file;
            t.write_byte_data(0x14, 0x5A).unwrap();
            assert_eq!(t.address(), 0x21);
        }
        assert_eq!(file.regs[0x14], 0x5A);
        assert_eq!(file.read_byte_data(0x40), Err(BusError::Nack));
    }
}
