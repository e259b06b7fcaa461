//! # 寄存器访问引擎
//!
//! 每个绑定的芯片对应一个 [`ChipData`]。所有寄存器访问都经过它的
//! `update_lock`，一次加锁恰好包住一个总线事务。
//!
//! ## 使用示例
//!
//! ```rust
//! use chip_i2c::chip::{ChipData, Register};
//! use chip_i2c::drivers::mock::{MockSmbus, SmbusOp};
//!
//! let bus = MockSmbus::new(0x21);
//! let chip = ChipData::new(bus.clone(), 0);
//!
//! chip.initialize();
//! chip.write(Register::PortALatchOut.addr(), 0x0F).unwrap();
//!
//! assert_eq!(bus.register(0x14), 0x0F);
//! assert_eq!(bus.op_count(), 3);
//! ```

use alloc::boxed::Box;
use spin::Mutex;

use crate::chip::observer::{LogObserver, RegisterObserver};
use crate::chip::regs::Register;
use crate::config::{DIR_PORTA_INIT, DIR_PORTB_INIT};
use crate::drivers::SmbusTransport;
use crate::error::{ChipError, Result};
use crate::time::Systick;

/// 锁保护的状态
struct ChipState<T> {
    /// 总线客户端
    client: T,
    /// 最近一次成功写寄存器的 tick
    led_last_updated: Option<u64>,
    /// 最近一次成功读寄存器的 tick
    switch_last_read: Option<u64>,
}

/// 芯片初始化结果
///
/// 初始化失败不会中止绑定，调用方可以据此决定是否额外告警。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitReport {
    pub dir_porta: Result<()>,
    pub dir_portb: Result<()>,
}

impl InitReport {
    /// 两个方向寄存器都写入成功
    pub fn is_ok(&self) -> bool {
        self.dir_porta.is_ok() && self.dir_portb.is_ok()
    }
}

/// 设备实例
///
/// 由绑定框架独占持有，通过 `Arc` 借给各个属性处理函数。
/// 当 `T: Send` 时 `ChipData<T>` 可以在线程间共享。
pub struct ChipData<T> {
    update_lock: Mutex<ChipState<T>>,
    /// 芯片型号标记，来自 id 表的 driver_data，目前只做保存
    kind: usize,
    addr: u8,
    observer: Box<dyn RegisterObserver>,
}

impl<T: SmbusTransport> ChipData<T> {
    /// 创建设备实例，访问结果写入全局日志
    ///
    /// 不访问硬件；绑定流程随后调用 [`ChipData::initialize`]。
    pub fn new(client: T, kind: usize) -> Self {
        Self::with_observer(client, kind, Box::new(LogObserver))
    }

    /// 创建设备实例，访问结果交给指定的观测者
    pub fn with_observer(client: T, kind: usize, observer: Box<dyn RegisterObserver>) -> Self {
        let addr = client.address();
        Self {
            update_lock: Mutex::new(ChipState {
                client,
                led_last_updated: None,
                switch_last_read: None,
            }),
            kind,
            addr,
            observer,
        }
    }

    /// 读取一个寄存器
    ///
    /// 寄存器地址不做校验，传错地址就会读到错误的物理寄存器。
    /// 每次调用都是一次新的总线事务，不做缓存。
    ///
    /// # 返回值
    ///
    /// - `Ok(u8)`: 寄存器原始值
    /// - `Err(ChipError::Transport)`: 总线错误，原样返回，不重试
    pub fn read(&self, reg: u8) -> Result<u8> {
        crate::trace!("{:02x}: chip_read_value", self.addr);

        let result = {
            let mut state = self.update_lock.lock();
            let result = state.client.read_byte_data(reg).map_err(ChipError::from);
            if result.is_ok() {
                state.switch_last_read = Some(Systick::get_current_time());
            }
            result
        };

        self.observer.on_read(self.addr, reg, result);
        result
    }

    /// 写入一个寄存器
    ///
    /// `value` 按总线字节帧截断为低 8 位，超过 255 的值不会报错。
    /// 锁存寄存器整字节覆盖，不做读-改-写。
    pub fn write(&self, reg: u8, value: u16) -> Result<()> {
        crate::trace!("{:02x}: chip_write_value", self.addr);

        let result = {
            let mut state = self.update_lock.lock();
            let result = state
                .client
                .write_byte_data(reg, value as u8)
                .map_err(ChipError::from);
            if result.is_ok() {
                state.led_last_updated = Some(Systick::get_current_time());
            }
            result
        };

        self.observer.on_write(self.addr, reg, value, result);
        result
    }

    /// 初始化芯片：PORTA 全部输出，PORTB 全部输入
    ///
    /// 依次写 IODIRA ← 0x00、IODIRB ← 0xFF。任一写入失败只记录日志，
    /// 不重试也不中止，第二个写入总会执行。
    pub fn initialize(&self) -> InitReport {
        crate::info!("{:02x}: chip_init_client", self.addr);

        let report = InitReport {
            dir_porta: self.write(Register::DirPortA.addr(), DIR_PORTA_INIT as u16),
            dir_portb: self.write(Register::DirPortB.addr(), DIR_PORTB_INIT as u16),
        };
        if !report.is_ok() {
            crate::warn!("{:02x}: chip left in unknown direction state", self.addr);
        }
        report
    }
}

impl<T> ChipData<T> {
    /// 从设备地址
    pub fn address(&self) -> u8 {
        self.addr
    }

    /// 芯片型号标记
    pub fn kind(&self) -> usize {
        self.kind
    }

    /// 最近一次成功写入的 tick，从未写入返回 `None`
    pub fn led_last_updated(&self) -> Option<u64> {
        self.update_lock.lock().led_last_updated
    }

    /// 最近一次成功读取的 tick，从未读取返回 `None`
    pub fn switch_last_read(&self) -> Option<u64> {
        self.update_lock.lock().switch_last_read
    }
}

impl<T> core::fmt::Debug for ChipData<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChipData")
            .field("addr", &self.addr)
            .field("kind", &self.kind)
            .finish()
    }
}

// ============================================================================
// 单元测试
// ============================================================================
