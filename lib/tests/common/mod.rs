// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use gpiosysfs::pin::Offset;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A stand-in for the sysfs GPIO class directory.
///
/// Pins listed at construction have their control directories created up
/// front, simulating the kernel-side state once those pins are exported.
/// Pins start as inputs reading low.
pub struct Sim {
    dir: TempDir,
}

#[allow(dead_code)]
impl Sim {
    pub fn new(pins: &[Offset]) -> Sim {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("export"), "").unwrap();
        fs::write(dir.path().join("unexport"), "").unwrap();
        for pin in pins {
            let pin_dir = dir.path().join(format!("gpio{}", pin));
            fs::create_dir(&pin_dir).unwrap();
            fs::write(pin_dir.join("direction"), "in\n").unwrap();
            fs::write(pin_dir.join("value"), "0\n").unwrap();
        }
        Sim { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// The raw content of a pin attribute file.
    pub fn attr(&self, pin: Offset, attr: &str) -> String {
        fs::read_to_string(self.dir.path().join(format!("gpio{}/{}", pin, attr))).unwrap()
    }

    /// Overwrite a pin attribute file, simulating a kernel-side change.
    pub fn set_attr(&self, pin: Offset, attr: &str, content: &str) {
        fs::write(
            self.dir.path().join(format!("gpio{}/{}", pin, attr)),
            content,
        )
        .unwrap();
    }

    /// The last pin number written to the export file.
    pub fn exports(&self) -> String {
        fs::read_to_string(self.dir.path().join("export")).unwrap()
    }

    /// The last pin number written to the unexport file.
    pub fn unexports(&self) -> String {
        fs::read_to_string(self.dir.path().join("unexport")).unwrap()
    }
}
