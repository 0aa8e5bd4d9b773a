// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{bail, Context, Result};
use gpiosysfs::pin::{Level, Offset};
use gpiosysfs::registry::{Device, PinRange, Registry};
use std::time::Duration;
use thiserror::Error;

/// The pins provided by the SoC itself.
pub const CPU_PINS: PinRange = PinRange { min: 0, max: 120 };

/// The pins provided by the I/O expander.
pub const EXPANDER_PINS: PinRange = PinRange { min: 121, max: 128 };

/// Register a device for the board range containing the pin.
pub fn claim(registry: &mut Registry, pin: Offset) -> Result<Device> {
    let range = if CPU_PINS.contains(pin) {
        CPU_PINS
    } else if EXPANDER_PINS.contains(pin) {
        EXPANDER_PINS
    } else {
        bail!("pin {} is not available on this board", pin);
    };
    registry
        .register(range)
        .with_context(|| format!("failed to register a device for range {}", range))
}

#[derive(Debug, Error)]
pub enum ParseLevelError {
    #[error("'{0}' is not one of '0', '1', 'low' or 'high'")]
    Unrecognized(String),
}

pub fn parse_level(s: &str) -> std::result::Result<Level, ParseLevelError> {
    match s {
        "0" | "low" => Ok(Level::Low),
        "1" | "high" => Ok(Level::High),
        _ => Err(ParseLevelError::Unrecognized(s.into())),
    }
}

#[derive(Debug, Error)]
pub enum ParseDurationError {
    #[error("'{0}' unknown units - use 'ms' or 's'.")]
    Units(String),
    #[error("'{0}' must start with a digit")]
    NoDigits(String),
    #[error("'{0}' {1}")]
    ParseDigits(String, std::num::ParseIntError),
}

/// Parse a duration, taken as milliseconds unless units are specified.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, ParseDurationError> {
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    let t = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(0) => return Err(ParseDurationError::NoDigits(s.into())),
        Some(n) => {
            let (num, units) = s.split_at(n);
            let t = num
                .parse::<u64>()
                .map_err(|e| ParseDurationError::ParseDigits(num.into(), e))?;
            t * match units {
                "ms" => 1,
                "s" => 1000,
                _ => return Err(ParseDurationError::Units(s.into())),
            }
        }
        None => s
            .parse::<u64>()
            .map_err(|e| ParseDurationError::ParseDigits(s.into(), e))?,
    };
    Ok(Duration::from_millis(t))
}
