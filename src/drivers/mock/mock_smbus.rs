//! # Mock SMBus 通道
//!
//! 模拟一个挂在总线上的寄存器文件，用于测试和演示。
//!
//! ## 功能特性
//!
//! - 实现 `SmbusTransport` trait
//! - 256 字节寄存器文件，写入后可读回
//! - 记录每一次总线事务（包括失败的事务）
//! - 支持注入一次性或持续的传输错误
//! - 统计并发重叠的事务，用于验证调用方的互斥
//!
//! `MockSmbus` 可以 `clone`，所有克隆共享同一份状态：
//! 一个交给驱动，另一个留在测试里做断言。
//!
//! ## 使用示例
//!
//! ```rust
//! use chip_i2c::drivers::mock::{MockSmbus, SmbusOp};
//! use chip_i2c::drivers::SmbusTransport;
//!
//! let probe = MockSmbus::new(0x21);
//! let mut bus = probe.clone();
//!
//! probe.mock_set_register(0x13, 0x0F);
//! assert_eq!(bus.read_byte_data(0x13).unwrap(), 0x0F);
//! bus.write_byte_data(0x14, 0xFF).unwrap();
//!
//! assert_eq!(probe.ops(), vec![
//!     SmbusOp::Read { reg: 0x13 },
//!     SmbusOp::Write { reg: 0x14, value: 0xFF },
//! ]);
//! ```

use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use spin::Mutex;

use crate::drivers::{Functionality, SmbusTransport};
use crate::error::BusError;

/// 一次被记录的总线事务
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmbusOp {
    Read { reg: u8 },
    Write { reg: u8, value: u8 },
}

struct MockState {
    /// 寄存器文件
    regs: [u8; 256],
    /// 事务日志
    ops: Vec<SmbusOp>,
    /// 一次性错误，按顺序消耗
    pending_errors: VecDeque<BusError>,
    /// 持续的读错误
    read_error: Option<BusError>,
    /// 持续的写错误
    write_error: Option<BusError>,
    functionality: Functionality,
}

struct Shared {
    addr: u8,
    state: Mutex<MockState>,
    /// 正在进行的事务数
    in_flight: AtomicUsize,
    /// 观察到的重叠事务数
    overlaps: AtomicUsize,
    /// 每个事务内部的忙等次数，放大并发窗口
    delay_spins: AtomicUsize,
}

/// Mock SMBus 通道
#[derive(Clone)]
pub struct MockSmbus {
    shared: Arc<Shared>,
}

impl MockSmbus {
    /// 创建绑定到 `addr` 的 Mock 通道，寄存器初值全部为 0
    pub fn new(addr: u8) -> Self {
        Self {
            shared: Arc::new(Shared {
                addr,
                state: Mutex::new(MockState {
                    regs: [0; 256],
                    ops: Vec::new(),
                    pending_errors: VecDeque::new(),
                    read_error: None,
                    write_error: None,
                    functionality: Functionality::byte_data(),
                }),
                in_flight: AtomicUsize::new(0),
                overlaps: AtomicUsize::new(0),
                delay_spins: AtomicUsize::new(0),
            }),
        }
    }

    /// 预设寄存器值（测试用）
    pub fn mock_set_register(&self, reg: u8, value: u8) {
        self.shared.state.lock().regs[reg as usize] = value;
    }

    /// 读取寄存器当前值，不产生总线事务
    pub fn register(&self, reg: u8) -> u8 {
        self.shared.state.lock().regs[reg as usize]
    }

    /// 下一次事务失败，可多次调用排队
    pub fn fail_next(&self, err: BusError) {
        self.shared.state.lock().pending_errors.push_back(err);
    }

    /// 之后所有读事务都失败（`None` 恢复）
    pub fn set_read_error(&self, err: Option<BusError>) {
        self.shared.state.lock().read_error = err;
    }

    /// 之后所有写事务都失败（`None` 恢复）
    pub fn set_write_error(&self, err: Option<BusError>) {
        self.shared.state.lock().write_error = err;
    }

    /// 设置适配器功能位
    pub fn set_functionality(&self, functionality: Functionality) {
        self.shared.state.lock().functionality = functionality;
    }

    /// 设置事务内部的忙等次数
    pub fn set_transaction_delay(&self, spins: usize) {
        self.shared.delay_spins.store(spins, Ordering::Relaxed);
    }

    /// 获取事务日志副本
    pub fn ops(&self) -> Vec<SmbusOp> {
        self.shared.state.lock().ops.clone()
    }

    /// 获取事务次数
    pub fn op_count(&self) -> usize {
        self.shared.state.lock().ops.len()
    }

    /// 清空事务日志
    pub fn clear_ops(&self) {
        self.shared.state.lock().ops.clear();
    }

    /// 观察到的重叠事务数
    pub fn overlaps(&self) -> usize {
        self.shared.overlaps.load(Ordering::SeqCst)
    }

    fn transaction<R>(&self, op: SmbusOp, f: impl FnOnce(&mut MockState) -> Result<R, BusError>) -> Result<R, BusError> {
        if self.shared.in_flight.fetch_add(1, Ordering::SeqCst) != 0 {
            self.shared.overlaps.fetch_add(1, Ordering::SeqCst);
        }

        // 日志在延迟之前写入，延迟期间别的事务开始就会被计为重叠
        self.shared.state.lock().ops.push(op);
        for _ in 0..self.shared.delay_spins.load(Ordering::Relaxed) {
            core::hint::spin_loop();
        }

        let result = {
            let mut state = self.shared.state.lock();
            match state.pending_errors.pop_front() {
                Some(err) => Err(err),
                None => f(&mut state),
            }
        };

        self.shared.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

impl SmbusTransport for MockSmbus {
    fn address(&self) -> u8 {
        self.shared.addr
    }

    fn functionality(&self) -> Functionality {
        self.shared.state.lock().functionality
    }

    fn read_byte_data(&mut self, command: u8) -> Result<u8, BusError> {
        self.transaction(SmbusOp::Read { reg: command }, |state| match state.read_error {
            Some(err) => Err(err),
            None => Ok(state.regs[command as usize]),
        })
    }

    fn write_byte_data(&mut self, command: u8, value: u8) -> Result<(), BusError> {
        self.transaction(SmbusOp::Write { reg: command, value }, |state| match state.write_error {
            Some(err) => Err(err),
            None => {
                state.regs[command as usize] = value;
                Ok(())
            }
        })
    }
}

// ============================================================================
// 单元测试
// ============================================================================
