//! # Mock I2C 总线
//!
//! 模拟原始 I2C 控制器，总线上的每个从设备都是一个带地址指针的
//! 256 字节寄存器文件（与 MCP23017 在 BANK=0、SEQOP 关闭时的行为一致：
//! 写入的第一个字节是寄存器地址，其后的字节依次写入；读取从当前地址开始）。
//!
//! ## 使用示例
//!
//! ```rust
//! use chip_i2c::drivers::mock::MockI2cBus;
//! use chip_i2c::drivers::{Device, I2c};
//!
//! let mut bus = MockI2cBus::new();
//! bus.init().unwrap();
//! bus.write(0x21, &[0x14, 0xAA]).unwrap();
//!
//! let mut value = [0u8; 1];
//! bus.write_read(0x21, &[0x14], &mut value).unwrap();
//! assert_eq!(value, [0xAA]);
//! ```

use alloc::collections::BTreeMap;
use alloc::collections::BTreeSet;
use alloc::sync::Arc;
use alloc::vec::Vec;
use spin::Mutex;

use crate::drivers::{Device, I2c, I2cConfig};
use crate::error::BusError;

/// 一次被记录的 I2C 操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cOp {
    Write { addr: u8, data: Vec<u8> },
    Read { addr: u8, len: usize },
    WriteRead { addr: u8, write: Vec<u8>, read_len: usize },
}

struct BusState {
    config: I2cConfig,
    /// 每个从地址的寄存器文件
    targets: BTreeMap<u8, [u8; 256]>,
    /// 每个从地址的寄存器指针
    pointers: BTreeMap<u8, u8>,
    /// 不应答的地址
    absent: BTreeSet<u8>,
    ops: Vec<I2cOp>,
    initialized: bool,
}

impl BusState {
    fn target_mut(&mut self, addr: u8) -> &mut [u8; 256] {
        self.targets.entry(addr).or_insert([0; 256])
    }

    fn check(&self, addr: u8) -> Result<(), BusError> {
        if !self.initialized {
            return Err(BusError::Io);
        }
        if self.absent.contains(&addr) {
            return Err(BusError::Nack);
        }
        Ok(())
    }

    fn load_pointer_and_write(&mut self, addr: u8, data: &[u8]) {
        let Some((&reg, payload)) = data.split_first() else {
            return;
        };
        let mut ptr = reg;
        let regs = self.target_mut(addr);
        for &byte in payload {
            regs[ptr as usize] = byte;
            ptr = ptr.wrapping_add(1);
        }
        self.pointers.insert(addr, ptr);
    }

    fn read_from_pointer(&mut self, addr: u8, buf: &mut [u8]) {
        let mut ptr = self.pointers.get(&addr).copied().unwrap_or(0);
        let regs = *self.target_mut(addr);
        for byte in buf.iter_mut() {
            *byte = regs[ptr as usize];
            ptr = ptr.wrapping_add(1);
        }
        self.pointers.insert(addr, ptr);
    }
}

/// Mock I2C 总线
///
/// 克隆共享同一条总线：一个交给驱动，另一个留在测试里查看寄存器和操作记录。
#[derive(Clone)]
pub struct MockI2cBus {
    state: Arc<Mutex<BusState>>,
}

impl MockI2cBus {
    /// 创建新的 Mock I2C 总线，所有地址默认都有设备应答
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(BusState {
                config: I2cConfig::default(),
                targets: BTreeMap::new(),
                pointers: BTreeMap::new(),
                absent: BTreeSet::new(),
                ops: Vec::new(),
                initialized: false,
            })),
        }
    }

    /// 设置从设备是否应答
    pub fn mock_set_present(&self, addr: u8, present: bool) {
        let mut state = self.state.lock();
        if present {
            state.absent.remove(&addr);
        } else {
            state.absent.insert(addr);
        }
    }

    /// 预设从设备寄存器值
    pub fn mock_set_register(&self, addr: u8, reg: u8, value: u8) {
        self.state.lock().target_mut(addr)[reg as usize] = value;
    }

    /// 读取从设备寄存器值，不产生总线操作
    pub fn register(&self, addr: u8, reg: u8) -> u8 {
        self.state
            .lock()
            .targets
            .get(&addr)
            .map(|regs| regs[reg as usize])
            .unwrap_or(0)
    }

    /// 已记录的操作
    pub fn ops(&self) -> Vec<I2cOp> {
        self.state.lock().ops.clone()
    }

    /// 获取当前配置
    pub fn config(&self) -> I2cConfig {
        self.state.lock().config
    }
}

impl Default for MockI2cBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for MockI2cBus {
    type Error = BusError;

    fn init(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.lock();
        state.ops.clear();
        state.pointers.clear();
        state.initialized = true;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "MockI2C"
    }

    fn is_ready(&self) -> bool {
        self.state.lock().initialized
    }
}

impl I2c for MockI2cBus {
    fn configure(&mut self, config: I2cConfig) -> Result<(), Self::Error> {
        let mut state = self.state.lock();
        if !state.initialized {
            return Err(BusError::Io);
        }
        if config.frequency == 0 {
            return Err(BusError::Io);
        }
        state.config = config;
        Ok(())
    }

    fn write(&mut self, addr: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.state.lock();
        state.check(addr)?;
        state.ops.push(I2cOp::Write { addr, data: data.to_vec() });
        state.load_pointer_and_write(addr, data);
        Ok(())
    }

    fn read(&mut self, addr: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        let mut state = self.state.lock();
        state.check(addr)?;
        state.ops.push(I2cOp::Read { addr, len: data.len() });
        state.read_from_pointer(addr, data);
        Ok(())
    }

    fn write_read(&mut self, addr: u8, write: &[u8], read: &mut [u8]) -> Result<(), Self::Error> {
        let mut state = self.state.lock();
        state.check(addr)?;
        state.ops.push(I2cOp::WriteRead {
            addr,
            write: write.to_vec(),
            read_len: read.len(),
        });
        state.load_pointer_and_write(addr, write);
        state.read_from_pointer(addr, read);
        Ok(())
    }
}

// ============================================================================
// 单元测试
// ============================================================================
