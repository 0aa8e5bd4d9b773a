// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of reading a single pin.

use gpiosysfs::pin::Direction;
use gpiosysfs::registry::{PinRange, Registry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pin = 22;
    let mut registry = Registry::new();
    let dev = registry.register(PinRange::new(0, 120))?;

    // export the pin and read it as an input
    registry.setup(dev, pin, Direction::Input)?;
    match registry.value(dev, pin)? {
        Some(level) => println!("{pin}={level}"),
        None => println!("{pin}=unknown"),
    }

    registry.cleanup(dev, pin)?;
    registry.unregister(dev)?;
    Ok(())
}
