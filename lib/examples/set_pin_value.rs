// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of driving a single pin.

use gpiosysfs::pin::{Direction, Level};
use gpiosysfs::registry::{PinRange, Registry};
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pin = 22;
    let mut registry = Registry::new();
    let dev = registry.register(PinRange::new(0, 120))?;

    registry.setup(dev, pin, Direction::Output)?;
    registry.set_value(dev, pin, Level::High)?;
    thread::sleep(Duration::from_secs(1));
    registry.set_value(dev, pin, Level::Low)?;

    registry.cleanup(dev, pin)?;
    registry.unregister(dev)?;
    Ok(())
}
