//! # GPIO 扩展芯片驱动
//!
//! MCP23017 的 PORTA 接 LED（输出），PORTB 接拨码开关（输入），
//! 芯片固定挂在 0x21。
//!
//! ## 模块结构
//!
//! - [`regs`]: 寄存器表
//! - [`engine`]: 寄存器访问引擎（设备实例、加锁读写、初始化）
//! - [`observer`]: 访问观测钩子
//! - [`attr`]: `led` / `switch` 属性
//! - [`registry`]: 已绑定设备表
//! - [`driver`]: 探测、绑定、解绑

pub mod regs;
pub mod engine;
pub mod observer;
pub mod attr;
pub mod registry;
pub mod driver;

pub use regs::Register;
pub use engine::{ChipData, InitReport};
pub use observer::{LogObserver, NullObserver, RegisterObserver};
pub use attr::{AttributeGroup, LedAttribute, SwitchAttribute, parse_int, S_IRUGO, S_IWUGO};
pub use registry::{DeviceHandle, DeviceRegistry};
pub use driver::{ChipDriver, DeviceId, ID_TABLE};
