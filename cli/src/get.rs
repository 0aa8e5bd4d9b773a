// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common;
use anyhow::{Context, Result};
use clap::Parser;
use gpiosysfs::pin::{Direction, Offset};
use gpiosysfs::registry::Registry;

#[derive(Debug, Parser)]
#[command(alias("g"))]
pub struct Opts {
    /// The pin to read.
    #[arg(value_name = "pin")]
    pin: Offset,
}

pub fn cmd(opts: &Opts) -> Result<()> {
    let mut registry = Registry::new();
    let dev = common::claim(&mut registry, opts.pin)?;

    registry
        .setup(dev, opts.pin, Direction::Input)
        .with_context(|| format!("failed to set up pin {} as an input", opts.pin))?;
    let res = registry
        .value(dev, opts.pin)
        .with_context(|| format!("failed to read pin {}", opts.pin));
    match &res {
        Ok(Some(level)) => println!("{}={}", opts.pin, level),
        Ok(None) => println!("{}=unknown", opts.pin),
        Err(_) => {}
    }

    registry
        .cleanup(dev, opts.pin)
        .with_context(|| format!("failed to clean up pin {}", opts.pin))?;
    registry.unregister(dev)?;
    res.map(|_| ())
}
