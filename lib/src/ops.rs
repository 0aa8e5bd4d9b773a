// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::pin::{Direction, Level, Offset};
use crate::Result;

/// The primitive operations a pin control backend provides.
///
/// The [`Registry`] dispatches through this trait, so a backend bound to a
/// different control surface, such as direct register access, can be
/// substituted without touching dispatch.  The [`Sysfs`] backend is the
/// only implementation provided.
///
/// [`Registry`]: crate::registry::Registry
/// [`Sysfs`]: crate::sysfs::Sysfs
pub trait PinOps {
    /// Make the pin's control files available.
    fn export(&self, pin: Offset) -> Result<()>;

    /// Withdraw the pin's control files.
    fn unexport(&self, pin: Offset) -> Result<()>;

    /// Configure the pin as an input or an output.
    ///
    /// The pin must be exported.
    fn set_direction(&self, pin: Offset, direction: Direction) -> Result<()>;

    /// The configured direction of the pin.
    ///
    /// Returns `None` if the control file content is unrecognized.
    fn direction(&self, pin: Offset) -> Result<Option<Direction>>;

    /// Drive the pin to a level.
    ///
    /// Driving a pin configured as an input is a no-op that reports
    /// success.
    fn set_value(&self, pin: Offset, level: Level) -> Result<()>;

    /// The logic level of the pin.
    ///
    /// Returns `None` if the control file content is unrecognized.
    fn value(&self, pin: Offset) -> Result<Option<Level>>;
}
