// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Get the tuned Si4010 PA cap bank setting.
//!
//! Runs the tuning firmware on the target through si4010prog. The firmware
//! steps the cap bank until the antenna is tuned and leaves the result in
//! XRAM, which si4010prog dumps at the end of the run. The value can later be
//! passed to `vPa_Setup()` as wNominalCap.
//!
//! Usage:
//!   tune_cap_bank 433.92
//!   tune_cap_bank 868.3 --level 60 --programmer usb:001/004
//!   tune_cap_bank 315 --reset-workaround --dry-run

mod cli;
mod firmware;
mod invoke;

use std::process;

use clap::Parser;

fn main() {
    let args = cli::Cli::parse();
    init_logging(args.verbose);

    match cli::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
