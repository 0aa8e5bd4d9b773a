// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ops::PinOps;
use crate::pin::{Direction, Level, Offset};
use crate::sysfs::Sysfs;
use crate::{Error, Result};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// The maximum number of simultaneously registered devices.
pub const MAX_DEVICES: usize = 10;

/// A contiguous range of pins, inclusive of both bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinRange {
    /// The lowest pin in the range.
    pub min: Offset,

    /// The highest pin in the range.
    pub max: Offset,
}

impl PinRange {
    /// Basic constructor.
    pub fn new(min: Offset, max: Offset) -> PinRange {
        PinRange { min, max }
    }

    /// Return true if the pin lies within the range.
    pub fn contains(&self, pin: Offset) -> bool {
        self.min <= pin && pin <= self.max
    }

    /// Return true if the closed intervals of the two ranges intersect.
    pub fn overlaps(&self, other: &PinRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl fmt::Display for PinRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// An opaque token identifying a registered device.
///
/// Issued by [`Registry::register`] and addressed by every pin operation.
/// The token records the registry slot and its generation, so operations
/// through a token whose device has been unregistered fail with
/// [`Error::StaleDevice`] rather than reaching another device that has
/// since reused the slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Device {
    slot: usize,
    generation: u32,
}

// The state held for a live device.
#[derive(Debug)]
struct Entry {
    range: PinRange,
    // pins exported through this device and not yet cleaned up
    exported: Vec<Offset>,
}

// A registry slot.  The generation survives the entry so stale tokens
// remain detectable after the slot is reused.
#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// The set of live devices and the dispatch path to the backend.
///
/// Devices claim non-overlapping pin ranges at registration, and every
/// subsequent operation is validated against the owning device's range
/// before any filesystem action is attempted.
///
/// The registry is an explicitly passed context, not process-global
/// state.  It performs no internal locking - multi-threaded callers must
/// provide their own synchronization around it.
#[derive(Debug)]
pub struct Registry<P: PinOps = Sysfs> {
    ops: P,
    slots: Vec<Slot>,
}

impl Registry<Sysfs> {
    /// Constructs a registry dispatching to the platform sysfs GPIO
    /// class directory.
    pub fn new() -> Registry<Sysfs> {
        Registry::from_ops(Sysfs::new())
    }
}

impl Default for Registry<Sysfs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PinOps> Registry<P> {
    /// Constructs a registry dispatching to the given backend.
    pub fn from_ops(ops: P) -> Registry<P> {
        Registry {
            ops,
            slots: (0..MAX_DEVICES).map(|_| Slot::default()).collect(),
        }
    }

    /// Register a device claiming a range of pins.
    ///
    /// Fails if the registry is at capacity, or if the range intersects
    /// the range of any live device.
    pub fn register(&mut self, range: PinRange) -> Result<Device> {
        if range.min > range.max {
            return Err(Error::InvalidRange(range));
        }
        let slot = self
            .slots
            .iter()
            .position(|s| s.entry.is_none())
            .ok_or(Error::Exhausted(MAX_DEVICES))?;
        if let Some(live) = self
            .slots
            .iter()
            .filter_map(|s| s.entry.as_ref())
            .find(|e| e.range.overlaps(&range))
        {
            return Err(Error::Overlap(range, live.range));
        }
        let s = &mut self.slots[slot];
        s.generation = s.generation.wrapping_add(1);
        s.entry = Some(Entry {
            range,
            exported: Vec::new(),
        });
        Ok(Device {
            slot,
            generation: s.generation,
        })
    }

    /// Unregister a device, freeing its slot for reuse.
    ///
    /// Any pins still exported through the device are unexported first,
    /// so a device cannot leave orphaned control files behind.  The token
    /// is invalidated even if an unexport fails.
    pub fn unregister(&mut self, device: Device) -> Result<()> {
        self.entry(device)?;
        let entry = self.slots[device.slot].entry.take().unwrap();
        for pin in entry.exported {
            self.ops.unexport(pin)?;
        }
        Ok(())
    }

    /// Export a pin and configure its direction.
    ///
    /// The pin must lie within the device's range.  If the export fails
    /// the direction is not configured.
    pub fn setup(&mut self, device: Device, pin: Offset, direction: Direction) -> Result<()> {
        self.contained(device, pin)?;
        self.ops.export(pin)?;
        let entry = self.slots[device.slot].entry.as_mut().unwrap();
        if !entry.exported.contains(&pin) {
            entry.exported.push(pin);
        }
        self.ops.set_direction(pin, direction)
    }

    /// Unexport a pin.
    ///
    /// The pin must lie within the device's range.
    pub fn cleanup(&mut self, device: Device, pin: Offset) -> Result<()> {
        self.contained(device, pin)?;
        self.ops.unexport(pin)?;
        let entry = self.slots[device.slot].entry.as_mut().unwrap();
        entry.exported.retain(|p| *p != pin);
        Ok(())
    }

    /// Drive a pin to a level.
    ///
    /// Driving a pin configured as an input reports success without
    /// touching the pin.
    pub fn set_value(&self, device: Device, pin: Offset, level: Level) -> Result<()> {
        self.contained(device, pin)?;
        self.ops.set_value(pin, level)
    }

    /// The logic level of a pin.
    ///
    /// Returns `None` if the level read back is unrecognized.
    pub fn value(&self, device: Device, pin: Offset) -> Result<Option<Level>> {
        self.contained(device, pin)?;
        self.ops.value(pin)
    }

    /// The configured direction of a pin.
    ///
    /// Returns `None` if the direction read back is unrecognized.
    pub fn direction(&self, device: Device, pin: Offset) -> Result<Option<Direction>> {
        self.contained(device, pin)?;
        self.ops.direction(pin)
    }

    /// The range claimed by a device.
    pub fn range(&self, device: Device) -> Result<PinRange> {
        Ok(self.entry(device)?.range)
    }

    fn entry(&self, device: Device) -> Result<&Entry> {
        self.slots
            .get(device.slot)
            .filter(|s| s.generation == device.generation)
            .and_then(|s| s.entry.as_ref())
            .ok_or(Error::StaleDevice)
    }

    // validate the token and that the pin lies within the device's range
    fn contained(&self, device: Device, pin: Offset) -> Result<()> {
        let range = self.entry(device)?.range;
        if !range.contains(pin) {
            return Err(Error::OutOfRange(pin, range));
        }
        Ok(())
    }
}
