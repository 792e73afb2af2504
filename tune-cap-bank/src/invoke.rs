// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Process invoker for si4010prog.

use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

use tune_cap_bank_common::CommandLine;

/// Exit code used when the child ends without one (killed by a signal).
pub const EXIT_NO_CODE: i32 = 1;

/// Run the command line with inherited stdio and wait for it to finish.
///
/// Returns the exit code to hand back to our own caller.
pub fn run(cmd: &CommandLine) -> Result<i32> {
    let status = Command::new(cmd.program())
        .args(cmd.args())
        .status()
        .with_context(|| format!("Failed to run {}", cmd.program()))?;

    log::debug!("{} finished: {}", cmd.program(), status);
    Ok(exit_code(status))
}

/// Map a child exit status onto our own exit code.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(EXIT_NO_CODE)
}
