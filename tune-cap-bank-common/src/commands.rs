// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! si4010prog command line for a tuning run.
//!
//! si4010prog executes its positional arguments as a script of steps in
//! order. A tuning run resets the target, loads the tuning firmware, writes
//! both records, sets a breakpoint at the end of the tuning routine, runs to
//! it and dumps the resulting cap bank value.

use core::fmt;

use crate::fw_map::FirmwareMap;
use crate::records::ValidatedRequest;

/// Default programmer executable.
pub const DEFAULT_EXEC: &str = "si4010prog";
/// Tuning firmware image shipped next to the tool.
pub const DEFAULT_FIRMWARE: &str = "tune_cap_bank.ihx";
/// Time given to the firmware to finish tuning.
pub const RUN_DELAY_MS: u32 = 1000;
/// XRAM address of the tuned wNominalCap result.
pub const RESULT_ADDR: u16 = 0x400c;
/// Size of the result in bytes.
pub const RESULT_LEN: u16 = 2;

/// Never prompt for confirmation.
const ASSUME_YES: &str = "-y";
/// Select the programmer device by URI.
const DEVICE: &str = "-d";

/// A single si4010prog step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Reset,
    Run,
    Halt,
    SetPc(u16),
    /// Load an Intel HEX image into code memory.
    Program(String),
    /// Write hex data to internal RAM.
    WriteRam { addr: u8, data: String },
    /// Write hex data to XRAM.
    WriteXram { addr: u16, data: String },
    Break(u16),
    Delay(u32),
    /// Dump `len` bytes of XRAM.
    DumpXram { addr: u16, len: u16 },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Reset => f.write_str("reset"),
            Step::Run => f.write_str("run"),
            Step::Halt => f.write_str("halt"),
            Step::SetPc(pc) => write!(f, "setpc:{}", pc),
            Step::Program(file) => write!(f, "prg:{}", file),
            Step::WriteRam { addr, data } => write!(f, "wram:{:#x},{}", addr, data),
            Step::WriteXram { addr, data } => write!(f, "wxram:{:#x},{}", addr, data),
            Step::Break(addr) => write!(f, "break:{:#x}", addr),
            Step::Delay(ms) => write!(f, "delay:{}", ms),
            Step::DumpXram { addr, len } => write!(f, "dxram:{:#x},{}", addr, len),
        }
    }
}

/// Everything about a tuning run that is not a tuning parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgrammerConfig {
    /// Path of the si4010prog executable.
    pub exec: String,
    /// Programmer URI passed with `-d`.
    pub programmer: Option<String>,
    /// Run, halt and rewind the CPU after reset, for parts that boot into
    /// code stored in NVM.
    pub reset_workaround: bool,
    pub firmware: String,
    pub map: FirmwareMap,
    pub run_delay_ms: u32,
    pub result_addr: u16,
    pub result_len: u16,
}

impl ProgrammerConfig {
    /// Default settings for a firmware build described by `map`.
    pub fn new(map: FirmwareMap) -> Self {
        Self {
            exec: DEFAULT_EXEC.to_string(),
            programmer: None,
            reset_workaround: false,
            firmware: DEFAULT_FIRMWARE.to_string(),
            map,
            run_delay_ms: RUN_DELAY_MS,
            result_addr: RESULT_ADDR,
            result_len: RESULT_LEN,
        }
    }

    /// Steps of a tuning run, in execution order.
    pub fn steps(&self, request: &ValidatedRequest) -> Vec<Step> {
        let mut steps = vec![Step::Reset];

        if self.reset_workaround {
            steps.extend([Step::Run, Step::Halt, Step::SetPc(0)]);
        }

        steps.extend([
            Step::Program(self.firmware.clone()),
            Step::WriteRam {
                addr: self.map.addr_freq,
                data: request.frequency_record().to_hex(),
            },
            Step::WriteXram {
                addr: self.map.addr_pa_config,
                data: request.pa_config_record().to_hex(),
            },
            Step::Break(self.map.bp_addr),
            Step::Run,
            Step::Delay(self.run_delay_ms),
            Step::DumpXram {
                addr: self.result_addr,
                len: self.result_len,
            },
        ]);

        steps
    }
}

/// Complete si4010prog invocation: executable followed by its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Assemble the invocation for `request`.
    pub fn build(config: &ProgrammerConfig, request: &ValidatedRequest) -> Self {
        let mut tokens = vec![config.exec.clone(), ASSUME_YES.to_string()];

        // An empty URI means no device selection
        if let Some(uri) = config.programmer.as_deref().filter(|u| !u.is_empty()) {
            tokens.push(DEVICE.to_string());
            tokens.push(uri.to_string());
        }

        tokens.extend(config.steps(request).iter().map(Step::to_string));

        Self { tokens }
    }

    /// Executable path.
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Arguments following the executable.
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}
