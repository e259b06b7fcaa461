// 驱动配置，全部为编译期常量

/// 驱动名称，也是 id 表中唯一的条目
pub const DRIVER_NAME: &str = "chip_i2c";
/// 芯片硬连线的总线地址
pub const CHIP_ADDRESS: u8 = 0x21;
/// 探测时扫描的地址列表
pub const NORMAL_I2C: [u8; 2] = [0x20, 0x21];

/// 同时绑定的最大设备数
pub const MAX_DEVICES: usize = 4;

/// PORTA 全部配置为锁存输出（LED）
pub const DIR_PORTA_INIT: u8 = 0x00;
/// PORTB 全部配置为高阻输入（拨码开关，外部上拉）
pub const DIR_PORTB_INIT: u8 = 0xFF;

pub const LED_ATTR_NAME: &str = "led";
pub const SWITCH_ATTR_NAME: &str = "switch";

/// 标准模式 100kHz
pub const BUS_FREQUENCY_HZ: u32 = 100_000;
