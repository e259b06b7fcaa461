//! 寄存器访问观测钩子
//!
//! 引擎在每次事务结束、释放锁之后回调观测者。观测者只用于诊断，
//! 不能影响访问结果。

use crate::chip::regs::Register;
use crate::error::ChipError;

/// 寄存器访问观测者
pub trait RegisterObserver: Send + Sync {
    /// 一次读事务结束
    fn on_read(&self, addr: u8, reg: u8, result: Result<u8, ChipError>);

    /// 一次写事务结束，`value` 是调用方传入的未截断值
    fn on_write(&self, addr: u8, reg: u8, value: u16, result: Result<(), ChipError>);
}

/// 把访问结果写入全局日志
///
/// 成功的事务记为 debug，失败的记为 error。寄存器按数据手册名称输出，
/// 不在寄存器表里的地址输出为 `?`。
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

fn reg_name(reg: u8) -> &'static str {
    Register::from_addr(reg).map_or("?", Register::name)
}

impl RegisterObserver for LogObserver {
    fn on_read(&self, addr: u8, reg: u8, result: Result<u8, ChipError>) {
        let name = reg_name(reg);
        match result {
            Ok(value) => crate::debug!("{:02x}: read reg {} [{:02x}] returned [{}]", addr, name, reg, value),
            Err(err) => crate::error!(
                "{:02x}: read reg {} [{:02x}] failed [{}]: {}",
                addr, name, reg, err.errno(), err
            ),
        }
    }

    fn on_write(&self, addr: u8, reg: u8, value: u16, result: Result<(), ChipError>) {
        let name = reg_name(reg);
        match result {
            Ok(()) => crate::debug!(
                "{:02x}: write reg {} [{:02x}] with val [{:02x}] returned [0]",
                addr, name, reg, value
            ),
            Err(err) => crate::error!(
                "{:02x}: write reg {} [{:02x}] with val [{:02x}] failed [{}]: {}",
                addr, name, reg, value, err.errno(), err
            ),
        }
    }
}

/// 丢弃所有事件
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl RegisterObserver for NullObserver {
    fn on_read(&self, _addr: u8, _reg: u8, _result: Result<u8, ChipError>) {}

    fn on_write(&self, _addr: u8, _reg: u8, _value: u16, _result: Result<(), ChipError>) {}
}
