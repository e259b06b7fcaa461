//! 已绑定设备表
//!
//! 固定容量的槽位表，宿主通过 [`DeviceHandle`] 访问设备实例，
//! 不按总线地址做全局查找。槽位被复用时代数递增，旧句柄随之失效。

use alloc::sync::Arc;
use spin::Mutex;

use crate::chip::attr::AttributeGroup;
use crate::chip::engine::ChipData;
use crate::config::MAX_DEVICES;
use crate::drivers::SmbusTransport;
use crate::error::{ChipError, Result};

/// 不透明的设备句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle {
    slot: usize,
    generation: u32,
}

impl DeviceHandle {
    /// 槽位编号，仅用于日志
    pub fn slot(&self) -> usize {
        self.slot
    }
}

struct Entry<T> {
    chip: Arc<ChipData<T>>,
    attrs: AttributeGroup<T>,
    generation: u32,
}

struct Slots<T> {
    entries: [Option<Entry<T>>; MAX_DEVICES],
    next_generation: u32,
}

pub struct DeviceRegistry<T> {
    slots: Mutex<Slots<T>>,
}

impl<T: SmbusTransport> DeviceRegistry<T> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Slots {
                entries: core::array::from_fn(|_| None),
                next_generation: 0,
            }),
        }
    }

    /// 登记设备实例并创建它的属性
    ///
    /// 槽位已满时返回 `OutOfMemory`，实例随之丢弃。
    pub fn insert(&self, chip: Arc<ChipData<T>>) -> Result<DeviceHandle> {
        let mut slots = self.slots.lock();
        let slot = slots
            .entries
            .iter()
            .position(Option::is_none)
            .ok_or(ChipError::OutOfMemory)?;

        let generation = slots.next_generation;
        slots.next_generation = generation.wrapping_add(1);
        slots.entries[slot] = Some(Entry {
            attrs: AttributeGroup::new(Arc::clone(&chip)),
            chip,
            generation,
        });
        Ok(DeviceHandle { slot, generation })
    }

    /// 获取设备实例
    pub fn get(&self, handle: DeviceHandle) -> Result<Arc<ChipData<T>>> {
        self.with_entry(handle, |entry| Arc::clone(&entry.chip))
    }

    /// 获取设备属性
    pub fn attributes(&self, handle: DeviceHandle) -> Result<AttributeGroup<T>> {
        self.with_entry(handle, |entry| entry.attrs.clone())
    }

    /// 注销设备，返回实例；属性随槽位一起移除
    pub fn remove(&self, handle: DeviceHandle) -> Result<Arc<ChipData<T>>> {
        let mut slots = self.slots.lock();
        let entry = slots
            .entries
            .get_mut(handle.slot)
            .filter(|entry| matches!(entry, Some(e) if e.generation == handle.generation))
            .and_then(Option::take)
            .ok_or(ChipError::InvalidHandle)?;
        Ok(entry.chip)
    }

    /// 已绑定设备数
    pub fn len(&self) -> usize {
        self.slots.lock().entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        MAX_DEVICES
    }

    fn with_entry<R>(&self, handle: DeviceHandle, f: impl FnOnce(&Entry<T>) -> R) -> Result<R> {
        let slots = self.slots.lock();
        match slots.entries.get(handle.slot) {
            Some(Some(entry)) if entry.generation == handle.generation => Ok(f(entry)),
            _ => Err(ChipError::InvalidHandle),
        }
    }
}

impl<T: SmbusTransport> Default for DeviceRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
