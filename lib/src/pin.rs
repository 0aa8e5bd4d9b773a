// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// The number identifying a pin within the sysfs GPIO namespace.
pub type Offset = u32;

/// The direction of a pin.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// The pin reads a logic level.
    #[default]
    Input,

    /// The pin drives a logic level.
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Input => "in",
            Direction::Output => "out",
        };
        write!(f, "{}", s)
    }
}

/// The logic level of a pin.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    /// The pin is low.
    #[default]
    Low,

    /// The pin is high.
    High,
}

impl Level {
    /// The level opposite the current level.
    pub fn not(&self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Low => "low",
            Level::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl From<Level> for bool {
    fn from(l: Level) -> bool {
        match l {
            Level::Low => false,
            Level::High => true,
        }
    }
}

impl From<Level> for u8 {
    fn from(l: Level) -> u8 {
        match l {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

impl From<bool> for Level {
    fn from(b: bool) -> Level {
        match b {
            false => Level::Low,
            true => Level::High,
        }
    }
}
