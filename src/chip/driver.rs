//! # 绑定流程
//!
//! 宿主框架在总线枚举时调用 [`ChipDriver::detect`]，确认地址后调用
//! [`ChipDriver::probe`] 绑定设备，卸载时调用 [`ChipDriver::remove`]。
//!
//! ```text
//! detect(addr, func) ──► probe(client, id) ──► store/show ... ──► remove(handle)
//!                          │
//!                          ├─ 分配槽位（满则 -ENOMEM，不访问硬件）
//!                          ├─ initialize()：IODIRA ← 0x00, IODIRB ← 0xFF
//!                          └─ 注册 led / switch 属性
//! ```
//!
//! ## 使用示例
//!
//! ```rust
//! use chip_i2c::chip::{ChipDriver, ID_TABLE};
//! use chip_i2c::drivers::mock::MockSmbus;
//!
//! let driver = ChipDriver::new();
//! let bus = MockSmbus::new(0x21);
//!
//! let handle = driver.probe(bus.clone(), &ID_TABLE[0]).unwrap();
//! driver.store(handle, "led", "255\n").unwrap();
//! assert_eq!(bus.register(0x14), 255);
//!
//! driver.remove(handle).unwrap();
//! ```

use alloc::string::String;
use alloc::sync::Arc;

use crate::chip::engine::ChipData;
use crate::chip::registry::{DeviceHandle, DeviceRegistry};
use crate::config::{CHIP_ADDRESS, DRIVER_NAME, NORMAL_I2C};
use crate::drivers::{Functionality, SmbusTransport};
use crate::error::{ChipError, Result};

/// id 表条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId {
    pub name: &'static str,
    /// 写入设备实例的型号标记
    pub driver_data: usize,
}

/// 驱动支持的设备
pub static ID_TABLE: [DeviceId; 1] = [DeviceId {
    name: DRIVER_NAME,
    driver_data: 0,
}];

/// 芯片驱动
pub struct ChipDriver<T> {
    registry: DeviceRegistry<T>,
}

impl<T: SmbusTransport> ChipDriver<T> {
    pub fn new() -> Self {
        Self {
            registry: DeviceRegistry::new(),
        }
    }

    pub const fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    /// 枚举时扫描的地址
    pub const fn address_list(&self) -> &'static [u8] {
        &NORMAL_I2C
    }

    /// 按名称查 id 表
    pub fn match_id(name: &str) -> Option<&'static DeviceId> {
        ID_TABLE.iter().find(|id| id.name == name)
    }

    /// 探测地址上是否是本驱动的芯片
    ///
    /// 适配器必须支持 SMBus byte-data，地址必须是硬连线的 0x21。
    /// 成功返回应绑定的设备名。
    pub fn detect(address: u8, functionality: Functionality) -> Result<&'static str> {
        crate::debug!("{}: detect at 0x{:02x}", DRIVER_NAME, address);

        if !functionality.supports_byte_data() {
            return Err(ChipError::NoDevice);
        }
        if address != CHIP_ADDRESS {
            return Err(ChipError::NoDevice);
        }

        crate::info!("Chip device found at 0x{:02x}", address);
        Ok(DRIVER_NAME)
    }

    /// 按客户端自身的地址和功能位探测
    pub fn detect_client(client: &T) -> Result<&'static str> {
        Self::detect(client.address(), client.functionality())
    }

    /// 绑定设备
    ///
    /// 槽位分配失败时直接返回，不创建实例也不访问硬件。
    /// 芯片初始化失败只记日志，绑定照常完成。
    pub fn probe(&self, client: T, id: &DeviceId) -> Result<DeviceHandle> {
        self.probe_instance(ChipData::new(client, id.driver_data))
    }

    /// 绑定一个已构造好的设备实例（例如带自定义观测者）
    pub fn probe_instance(&self, chip: ChipData<T>) -> Result<DeviceHandle> {
        crate::info!("{}: probe 0x{:02x}", DRIVER_NAME, chip.address());

        let chip = Arc::new(chip);
        let handle = self.registry.insert(Arc::clone(&chip))?;

        let report = chip.initialize();
        if !report.is_ok() {
            crate::warn!("{}: 0x{:02x} bound with failed init", DRIVER_NAME, chip.address());
        }
        Ok(handle)
    }

    /// 解绑设备，注销属性；不需要任何硬件操作
    pub fn remove(&self, handle: DeviceHandle) -> Result<()> {
        let chip = self.registry.remove(handle)?;
        crate::info!("{}: remove 0x{:02x}", DRIVER_NAME, chip.address());
        Ok(())
    }

    /// 写属性
    pub fn store(&self, handle: DeviceHandle, name: &str, buf: &str) -> Result<usize> {
        self.registry.attributes(handle)?.store(name, buf)
    }

    /// 读属性
    pub fn show(&self, handle: DeviceHandle, name: &str) -> Result<String> {
        self.registry.attributes(handle)?.show(name)
    }

    /// 获取设备实例
    pub fn device(&self, handle: DeviceHandle) -> Result<Arc<ChipData<T>>> {
        self.registry.get(handle)
    }

    /// 已绑定设备数
    pub fn bound_count(&self) -> usize {
        self.registry.len()
    }
}

impl<T: SmbusTransport> Default for ChipDriver<T> {
    fn default() -> Self {
        Self::new()
    }
}
