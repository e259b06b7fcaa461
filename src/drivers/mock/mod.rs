//! # Mock 总线
//!
//! 没有真实硬件时用于开发和测试。
//!
//! | 驱动 | 说明 |
//! |------|------|
//! | [`MockSmbus`] | 寄存器级 Mock 通道，可注入错误、统计并发重叠 |
//! | [`MockI2cBus`] | 字节流级 Mock I2C 控制器，配合 [`I2cClient`](crate::drivers::I2cClient) 使用 |

mod mock_i2c;
mod mock_smbus;

pub use mock_i2c::{I2cOp, MockI2cBus};
pub use mock_smbus::{MockSmbus, SmbusOp};
