use chip_i2c::chip::{ChipDriver, ID_TABLE};
use chip_i2c::drivers::mock::{I2cOp, MockI2cBus};
use chip_i2c::drivers::{Device, I2cClient};
use chip_i2c::error::{BusError, ChipError};

fn ready_bus() -> MockI2cBus {
    let mut bus = MockI2cBus::new();
    bus.init().unwrap();
    bus
}

#[test]
fn test_driver_over_raw_i2c() {
    let bus = ready_bus();
    bus.mock_set_register(0x21, 0x13, 0x3C);
    let client = I2cClient::new(bus.clone(), 0x21);

    assert_eq!(ChipDriver::detect_client(&client), Ok("chip_i2c"));

    let driver = ChipDriver::new();
    let handle = driver.probe(client, &ID_TABLE[0]).unwrap();
    driver.store(handle, "led", "129").unwrap();
    assert_eq!(driver.show(handle, "switch").unwrap(), "60\n");

    assert_eq!(bus.register(0x21, 0x00), 0x00);
    assert_eq!(bus.register(0x21, 0x01), 0xFF);
    assert_eq!(bus.register(0x21, 0x14), 129);
    assert_eq!(
        bus.ops(),
        vec![
            I2cOp::Write { addr: 0x21, data: vec![0x00, 0x00] },
            I2cOp::Write { addr: 0x21, data: vec![0x01, 0xFF] },
            I2cOp::Write { addr: 0x21, data: vec![0x14, 129] },
            I2cOp::WriteRead { addr: 0x21, write: vec![0x13], read_len: 1 },
        ]
    );
}

#[test]
fn test_every_access_is_one_stamped_transaction() {
    let bus = ready_bus();
    let driver = ChipDriver::new();
    let handle = driver.probe(I2cClient::new(bus.clone(), 0x21), &ID_TABLE[0]).unwrap();
    let chip = driver.device(handle).unwrap();
    let before = bus.ops().len();

    driver.store(handle, "led", "170").unwrap();
    driver.show(handle, "switch").unwrap();

    // 每次属性访问恰好一个总线事务，方向寄存器不受影响
    assert_eq!(bus.ops().len(), before + 2);
    assert_eq!(bus.register(0x21, 0x00), 0x00);
    assert_eq!(bus.register(0x21, 0x14), 0xAA);
    assert!(chip.led_last_updated().is_some());
    assert!(chip.switch_last_read().is_some());
}

#[test]
fn test_absent_chip_surfaces_nack() {
    let bus = ready_bus();
    bus.mock_set_present(0x21, false);

    let driver = ChipDriver::new();
    // 初始化失败不影响绑定
    let handle = driver.probe(I2cClient::new(bus, 0x21), &ID_TABLE[0]).unwrap();

    assert_eq!(
        driver.show(handle, "switch"),
        Err(ChipError::Transport(BusError::Nack))
    );
    assert_eq!(
        driver.store(handle, "led", "1"),
        Err(ChipError::Transport(BusError::Nack))
    );
    assert_eq!(driver.device(handle).unwrap().led_last_updated(), None);
}

#[test]
fn test_wrong_address_not_detected() {
    let client = I2cClient::new(ready_bus(), 0x20);
    assert_eq!(ChipDriver::detect_client(&client), Err(ChipError::NoDevice));
}
