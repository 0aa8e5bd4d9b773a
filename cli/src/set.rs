// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common;
use anyhow::{Context, Result};
use clap::Parser;
use gpiosysfs::pin::{Direction, Level, Offset};
use gpiosysfs::registry::{Device, Registry};
use std::thread;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(alias("s"))]
pub struct Opts {
    /// The pin to drive.
    #[arg(value_name = "pin")]
    pin: Offset,

    /// The level to drive the pin to: '0', '1', 'low' or 'high'.
    #[arg(value_name = "level", value_parser = common::parse_level)]
    level: Level,

    /// Hold the level for a period, then drive the pin to the opposite
    /// level.
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(short = 'p', long, value_name = "period", value_parser = common::parse_duration)]
    hold_period: Option<Duration>,

    /// Leave the pin exported and driving on exit.
    #[arg(short = 'k', long)]
    keep: bool,
}

pub fn cmd(opts: &Opts) -> Result<()> {
    let mut registry = Registry::new();
    let dev = common::claim(&mut registry, opts.pin)?;

    registry
        .setup(dev, opts.pin, Direction::Output)
        .with_context(|| format!("failed to set up pin {} as an output", opts.pin))?;
    drive(&registry, dev, opts.pin, opts.level)?;

    if let Some(period) = opts.hold_period {
        thread::sleep(period);
        drive(&registry, dev, opts.pin, opts.level.not())?;
    }

    if opts.keep {
        return Ok(());
    }
    registry
        .cleanup(dev, opts.pin)
        .with_context(|| format!("failed to clean up pin {}", opts.pin))?;
    registry.unregister(dev)?;
    Ok(())
}

// drive the pin and report the level read back
fn drive(registry: &Registry, dev: Device, pin: Offset, level: Level) -> Result<()> {
    registry
        .set_value(dev, pin, level)
        .with_context(|| format!("failed to drive pin {} {}", pin, level))?;
    match registry
        .value(dev, pin)
        .with_context(|| format!("failed to read back pin {}", pin))?
    {
        Some(level) => println!("{}={}", pin, level),
        None => println!("{}=unknown", pin),
    }
    Ok(())
}
