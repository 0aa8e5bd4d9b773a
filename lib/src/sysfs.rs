// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ops::PinOps;
use crate::pin::{Direction, Level, Offset};
use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// The default location of the GPIO class directory.
pub const SYSFS_CLASS_GPIO: &str = "/sys/class/gpio";

// attribute read sizes fixed by the wire protocol
const DIRECTION_LEN: usize = 4;
const VALUE_LEN: usize = 3;

/// A pin control backend bound to a sysfs GPIO class directory.
///
/// Each operation opens the control file for exactly one read or one
/// write; the file is closed on every exit path when the handle drops.
///
/// # Examples
/// ```no_run
/// use gpiosysfs::ops::PinOps;
///
/// # fn main() -> gpiosysfs::Result<()> {
/// let sysfs = gpiosysfs::sysfs::Sysfs::new();
/// sysfs.export(17)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sysfs {
    /// The root of the GPIO class directory.
    root: PathBuf,
}

impl Sysfs {
    /// Constructs a backend bound to the platform GPIO class directory.
    pub fn new() -> Sysfs {
        Sysfs {
            root: SYSFS_CLASS_GPIO.into(),
        }
    }

    /// Constructs a backend bound to an alternative class directory.
    ///
    /// Useful where sysfs is mounted in a non-standard location, or to
    /// drive a test double of the class directory.
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Sysfs {
        Sysfs { root: root.into() }
    }

    /// The root of the GPIO class directory.
    pub fn root(&self) -> &Path {
        self.root.as_ref()
    }

    /// Check that the pin's control directory is present.
    ///
    /// A lighter-weight probe than opening an attribute, and performed
    /// before any attribute access so an unexported pin is reported as
    /// unavailable rather than as an open failure.
    fn exported(&self, pin: Offset) -> Result<()> {
        if self.pin_dir(pin).exists() {
            return Ok(());
        }
        Err(Error::Unavailable(pin))
    }

    fn pin_dir(&self, pin: Offset) -> PathBuf {
        self.root.join(format!("gpio{}", pin))
    }

    fn attr_path(&self, pin: Offset, attr: &str) -> PathBuf {
        self.pin_dir(pin).join(attr)
    }

    fn write_attr(&self, path: PathBuf, data: &[u8]) -> Result<()> {
        let mut f = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| Error::Open(path.clone(), e))?;
        f.write_all(data).map_err(|e| Error::Write(path, e))
    }

    fn read_attr(&self, path: PathBuf, len: usize) -> Result<String> {
        let mut f = File::open(&path).map_err(|e| Error::Open(path.clone(), e))?;
        let mut buf = vec![0; len];
        let n = f.read(&mut buf).map_err(|e| Error::Read(path, e))?;
        Ok(String::from_utf8_lossy(&buf[..n]).trim_end().to_string())
    }
}

impl Default for Sysfs {
    fn default() -> Self {
        Self::new()
    }
}

impl PinOps for Sysfs {
    fn export(&self, pin: Offset) -> Result<()> {
        self.write_attr(self.root.join("export"), pin.to_string().as_bytes())
    }

    fn unexport(&self, pin: Offset) -> Result<()> {
        self.write_attr(self.root.join("unexport"), pin.to_string().as_bytes())
    }

    fn set_direction(&self, pin: Offset, direction: Direction) -> Result<()> {
        self.exported(pin)?;
        let token: &[u8] = match direction {
            Direction::Input => b"in",
            Direction::Output => b"out",
        };
        self.write_attr(self.attr_path(pin, "direction"), token)
    }

    fn direction(&self, pin: Offset) -> Result<Option<Direction>> {
        self.exported(pin)?;
        let token = self.read_attr(self.attr_path(pin, "direction"), DIRECTION_LEN)?;
        Ok(match token.as_str() {
            "in" => Some(Direction::Input),
            "out" => Some(Direction::Output),
            _ => None,
        })
    }

    fn set_value(&self, pin: Offset, level: Level) -> Result<()> {
        self.exported(pin)?;
        // driving an input pin is defined to quietly succeed
        if self.direction(pin)? == Some(Direction::Input) {
            return Ok(());
        }
        let token: &[u8] = match level {
            Level::Low => b"0",
            Level::High => b"1",
        };
        self.write_attr(self.attr_path(pin, "value"), token)
    }

    fn value(&self, pin: Offset) -> Result<Option<Level>> {
        self.exported(pin)?;
        let token = self.read_attr(self.attr_path(pin, "value"), VALUE_LEN)?;
        Ok(match token.parse::<u8>() {
            Ok(0) => Some(Level::Low),
            Ok(1) => Some(Level::High),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // a stand-in for the class directory, with the given pins exported
    fn class_dir(pins: &[Offset]) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("export"), "").unwrap();
        fs::write(dir.path().join("unexport"), "").unwrap();
        for pin in pins {
            let pin_dir = dir.path().join(format!("gpio{}", pin));
            fs::create_dir(&pin_dir).unwrap();
            fs::write(pin_dir.join("direction"), "in\n").unwrap();
            fs::write(pin_dir.join("value"), "0\n").unwrap();
        }
        dir
    }

    #[test]
    fn export() {
        let dir = class_dir(&[]);
        let s = Sysfs::with_root(dir.path());
        assert!(s.export(17).is_ok());
        assert_eq!(fs::read_to_string(dir.path().join("export")).unwrap(), "17");
    }

    #[test]
    fn export_open_fail() {
        let dir = TempDir::new().unwrap();
        // no export file in the root
        let s = Sysfs::with_root(dir.path());
        assert!(matches!(s.export(17), Err(Error::Open(_, _))));
    }

    #[test]
    fn unexport() {
        let dir = class_dir(&[21]);
        let s = Sysfs::with_root(dir.path());
        assert!(s.unexport(21).is_ok());
        assert_eq!(
            fs::read_to_string(dir.path().join("unexport")).unwrap(),
            "21"
        );
    }

    #[test]
    fn set_direction() {
        let dir = class_dir(&[4]);
        let s = Sysfs::with_root(dir.path());
        assert!(s.set_direction(4, Direction::Output).is_ok());
        assert_eq!(
            fs::read_to_string(dir.path().join("gpio4/direction")).unwrap(),
            "out"
        );
        assert!(s.set_direction(4, Direction::Input).is_ok());
        assert_eq!(
            fs::read_to_string(dir.path().join("gpio4/direction")).unwrap(),
            "in"
        );
    }

    #[test]
    fn set_direction_unavailable() {
        let dir = class_dir(&[4]);
        let s = Sysfs::with_root(dir.path());
        assert!(matches!(
            s.set_direction(5, Direction::Output),
            Err(Error::Unavailable(5))
        ));
        assert!(!dir.path().join("gpio5").exists());
    }

    #[test]
    fn direction() {
        let dir = class_dir(&[4]);
        let s = Sysfs::with_root(dir.path());
        assert_eq!(s.direction(4).unwrap(), Some(Direction::Input));
        fs::write(dir.path().join("gpio4/direction"), "out\n").unwrap();
        assert_eq!(s.direction(4).unwrap(), Some(Direction::Output));
    }

    #[test]
    fn direction_unknown() {
        let dir = class_dir(&[4]);
        let s = Sysfs::with_root(dir.path());
        fs::write(dir.path().join("gpio4/direction"), "up\n").unwrap();
        assert_eq!(s.direction(4).unwrap(), None);
    }

    #[test]
    fn direction_read_fail() {
        let dir = class_dir(&[4]);
        let s = Sysfs::with_root(dir.path());
        // a directory opens but cannot be read, failing the read itself
        fs::remove_file(dir.path().join("gpio4/direction")).unwrap();
        fs::create_dir(dir.path().join("gpio4/direction")).unwrap();
        assert!(matches!(s.direction(4), Err(Error::Read(_, _))));
    }

    #[test]
    fn direction_unavailable() {
        let dir = class_dir(&[]);
        let s = Sysfs::with_root(dir.path());
        assert!(matches!(s.direction(4), Err(Error::Unavailable(4))));
    }

    #[test]
    fn set_value() {
        let dir = class_dir(&[7]);
        let s = Sysfs::with_root(dir.path());
        fs::write(dir.path().join("gpio7/direction"), "out\n").unwrap();
        assert!(s.set_value(7, Level::High).is_ok());
        assert_eq!(
            fs::read_to_string(dir.path().join("gpio7/value")).unwrap(),
            "1"
        );
        assert!(s.set_value(7, Level::Low).is_ok());
        assert_eq!(
            fs::read_to_string(dir.path().join("gpio7/value")).unwrap(),
            "0"
        );
    }

    #[test]
    fn set_value_input_is_noop() {
        let dir = class_dir(&[7]);
        let s = Sysfs::with_root(dir.path());
        assert!(s.set_value(7, Level::High).is_ok());
        // value file untouched
        assert_eq!(
            fs::read_to_string(dir.path().join("gpio7/value")).unwrap(),
            "0\n"
        );
    }

    #[test]
    fn set_value_unavailable() {
        let dir = class_dir(&[]);
        let s = Sysfs::with_root(dir.path());
        assert!(matches!(
            s.set_value(7, Level::High),
            Err(Error::Unavailable(7))
        ));
    }

    #[test]
    fn value() {
        let dir = class_dir(&[7]);
        let s = Sysfs::with_root(dir.path());
        assert_eq!(s.value(7).unwrap(), Some(Level::Low));
        fs::write(dir.path().join("gpio7/value"), "1\n").unwrap();
        assert_eq!(s.value(7).unwrap(), Some(Level::High));
    }

    #[test]
    fn value_unknown() {
        let dir = class_dir(&[7]);
        let s = Sysfs::with_root(dir.path());
        fs::write(dir.path().join("gpio7/value"), "2\n").unwrap();
        assert_eq!(s.value(7).unwrap(), None);
        fs::write(dir.path().join("gpio7/value"), "junk").unwrap();
        assert_eq!(s.value(7).unwrap(), None);
    }

    #[test]
    fn value_unavailable() {
        let dir = class_dir(&[]);
        let s = Sysfs::with_root(dir.path());
        assert!(matches!(s.value(7), Err(Error::Unavailable(7))));
    }
}
