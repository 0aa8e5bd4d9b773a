// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: MIT

//! A library for controlling GPIO pins on Linux platforms
//! using the sysfs GPIO interface.
//!
//! Devices claim contiguous, non-overlapping ranges of pins through the
//! [`registry`] module, and drive them via the filesystem backend in the
//! [`sysfs`] module.
//!
//! To claim a range and drive a pin:
//! ```no_run
//! use gpiosysfs::pin::{Direction, Level};
//! use gpiosysfs::registry::{PinRange, Registry};
//!
//! # fn main() -> gpiosysfs::Result<()> {
//! let mut registry = Registry::new();
//! let dev = registry.register(PinRange::new(0, 120))?;
//! registry.setup(dev, 17, Direction::Output)?;
//! registry.set_value(dev, 17, Level::High)?;
//! registry.cleanup(dev, 17)?;
//! registry.unregister(dev)?;
//! # Ok(())
//! # }
//! ```
//!
//! [`registry`]: module@registry
//! [`sysfs`]: module@sysfs

use crate::pin::Offset;
use crate::registry::PinRange;
use std::io;
use std::path::PathBuf;

/// Pin-level types - offsets, directions and levels.
pub mod pin;

/// The primitive operations provided by a pin control backend.
pub mod ops;

/// The sysfs-bound implementation of the backend operations.
pub mod sysfs;

/// Types and functions for registering devices and dispatching pin
/// operations to the backend.
///
/// The [`Registry`] owns the set of live devices and enforces that no two
/// devices ever claim overlapping pin ranges.  Callers hold a [`Device`]
/// token and address pins through it.
///
/// [`Device`]: struct.Device.html
/// [`Registry`]: struct.Registry.html
pub mod registry;

/// Errors returned by [`gpiosysfs`] functions.
///
/// [`gpiosysfs`]: crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The pin's control files are not present in sysfs.
    ///
    /// The pin has not been exported, or has been unexported.
    /// Recoverable by exporting the pin.
    #[error("gpio{0} control files are unavailable")]
    Unavailable(Offset),

    /// A control file could not be opened.
    #[error("failed to open \"{0}\": {1}")]
    Open(PathBuf, #[source] io::Error),

    /// A write to a control file failed.
    #[error("failed to write \"{0}\": {1}")]
    Write(PathBuf, #[source] io::Error),

    /// A read from a control file failed.
    #[error("failed to read \"{0}\": {1}")]
    Read(PathBuf, #[source] io::Error),

    /// The range is inverted.
    #[error("invalid pin range {0}")]
    InvalidRange(PinRange),

    /// The range intersects the range claimed by a live device.
    #[error("range {0} overlaps the live range {1}")]
    Overlap(PinRange, PinRange),

    /// The registry has no free device slots.
    #[error("registry is at capacity ({0} devices)")]
    Exhausted(usize),

    /// The pin lies outside the range claimed by the device.
    #[error("pin {0} is outside the device range {1}")]
    OutOfRange(Offset, PinRange),

    /// The device token has been unregistered.
    ///
    /// Tokens are only meaningful to the registry that issued them;
    /// presenting a token to a different registry is not detected.
    #[error("device token is stale")]
    StaleDevice,
}

/// The result for [`gpiosysfs`] functions.
///
/// [`gpiosysfs`]: crate
pub type Result<T> = std::result::Result<T, Error>;
