//! # 总线驱动框架
//!
//! 驱动核心访问芯片寄存器所需的总线抽象。
//!
//! ## 模块结构
//!
//! - [`traits`]: 设备与总线 trait 定义
//! - [`client`]: 在原始 I2C 总线上实现 SMBus byte-data 的客户端
//! - [`macros`]: 位域宏
//! - [`mock`]: Mock 总线
//!
//! ## 使用示例
//!
//! ```rust
//! use chip_i2c::drivers::mock::MockI2cBus;
//! use chip_i2c::drivers::{Device, I2cClient, SmbusTransport};
//!
//! let mut bus = MockI2cBus::new();
//! bus.init().unwrap();
//!
//! let mut client = I2cClient::new(bus, 0x21);
//! client.write_byte_data(0x00, 0x00).unwrap();
//! ```

pub mod traits;
pub mod client;
pub mod macros;
pub mod mock;

pub use traits::{
    Device,
    I2c,
    I2cConfig,
    Functionality,
    SmbusTransport,
};
pub use client::I2cClient;
