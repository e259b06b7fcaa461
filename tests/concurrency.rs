use std::sync::Arc;
use std::thread;

use chip_i2c::chip::{ChipData, ChipDriver, NullObserver, Register, ID_TABLE};
use chip_i2c::drivers::mock::MockSmbus;

const THREADS: usize = 4;
const ROUNDS: usize = 50;

#[test]
fn test_register_access_is_serialized() {
    let bus = MockSmbus::new(0x21);
    bus.set_transaction_delay(2_000);
    let chip = Arc::new(ChipData::with_observer(bus.clone(), 0, Box::new(NullObserver)));

    let workers: Vec<_> = (0..THREADS)
        .map(|i| {
            let chip = Arc::clone(&chip);
            thread::spawn(move || {
                for round in 0..ROUNDS {
                    if (i + round) % 2 == 0 {
                        chip.write(Register::PortALatchOut.addr(), round as u16).unwrap();
                    } else {
                        chip.read(Register::PortBLatchIn.addr()).unwrap();
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(bus.op_count(), THREADS * ROUNDS);
    assert_eq!(bus.overlaps(), 0);
}

#[test]
fn test_attribute_access_from_many_threads() {
    let driver = Arc::new(ChipDriver::new());
    let bus = MockSmbus::new(0x21);
    let handle = driver.probe(bus.clone(), &ID_TABLE[0]).unwrap();
    bus.clear_ops();
    bus.set_transaction_delay(1_000);
    bus.mock_set_register(0x13, 0xA5);

    let workers: Vec<_> = (0..THREADS)
        .map(|i| {
            let driver = Arc::clone(&driver);
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    if i % 2 == 0 {
                        driver.store(handle, "led", "7\n").unwrap();
                    } else {
                        assert_eq!(driver.show(handle, "switch").unwrap(), "165\n");
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(bus.register(0x14), 7);
    assert_eq!(bus.op_count(), THREADS * ROUNDS);
    assert_eq!(bus.overlaps(), 0);
}

#[test]
fn test_independent_devices_do_not_share_lock() {
    let first = MockSmbus::new(0x21);
    let second = MockSmbus::new(0x21);
    let a = Arc::new(ChipData::with_observer(first.clone(), 0, Box::new(NullObserver)));
    let b = Arc::new(ChipData::with_observer(second.clone(), 0, Box::new(NullObserver)));

    let ta = {
        let a = Arc::clone(&a);
        thread::spawn(move || (0..ROUNDS).for_each(|v| a.write(0x14, v as u16).unwrap()))
    };
    let tb = {
        let b = Arc::clone(&b);
        thread::spawn(move || (0..ROUNDS).for_each(|v| b.write(0x14, v as u16).unwrap()))
    };
    ta.join().unwrap();
    tb.join().unwrap();

    assert_eq!(first.op_count(), ROUNDS);
    assert_eq!(second.op_count(), ROUNDS);
    assert_eq!(first.register(0x14), (ROUNDS - 1) as u8);
}
