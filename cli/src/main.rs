// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A command line tool for driving GPIO pins via sysfs.

use clap::Parser;
use std::process::ExitCode;

mod common;
mod get;
mod set;

fn main() -> ExitCode {
    match Opts::try_parse() {
        Ok(opts) => {
            let res = match &opts.cmd {
                Command::Get(cfg) => get::cmd(cfg),
                Command::Set(cfg) => set::cmd(cfg),
            };
            match res {
                Ok(()) => return ExitCode::SUCCESS,
                Err(e) if opts.verbose => eprintln!("{:?}", e),
                Err(e) => eprintln!("{:#}", e),
            }
        }
        Err(e) => eprintln!("{e}"),
    }
    ExitCode::FAILURE
}

#[derive(Parser)]
#[command(
    name = "gpiosysfs",
    about = "A utility to control GPIO pins on Linux using the sysfs GPIO interface.",
    version,
    propagate_version = true
)]
struct Opts {
    /// Provide more detailed error messages.
    #[arg(short = 'v', long, global = true, display_order = 800)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
enum Command {
    /// Read the level of a GPIO pin.
    Get(get::Opts),

    /// Drive the level of a GPIO pin.
    Set(set::Opts),
}
