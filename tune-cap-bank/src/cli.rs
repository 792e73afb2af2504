// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::fs;
use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use tune_cap_bank_common::records::{
    DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_LEVEL, DEFAULT_MAX_DRV, DEFAULT_NOMINAL_CAP,
};
use tune_cap_bank_common::{
    CommandLine, FirmwareMap, ProgrammerConfig, TuningRequest, DEFAULT_EXEC, DEFAULT_FIRMWARE,
    DEFAULT_MAP_FILE,
};

use crate::{firmware, invoke};

/// Exit code for rejected parameters.
pub const EXIT_INVALID: i32 = -1;

/// Tool version, independent of the crate version.
pub const VERSION: &str = "0.0";

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "tune_cap_bank", version = VERSION)]
#[command(about = "Get Si4010 tuned antenna cap bank setting")]
pub struct Cli {
    /// Frequency in MHz at which to tune the antenna
    #[arg(value_name = "FREQ", allow_negative_numbers = true)]
    pub freq: f64,

    /// PA fAlpha value
    #[arg(long, value_name = "FLOAT", default_value_t = DEFAULT_ALPHA, allow_negative_numbers = true)]
    pub alpha: f64,

    /// PA fBeta value
    #[arg(long, value_name = "FLOAT", default_value_t = DEFAULT_BETA, allow_negative_numbers = true)]
    pub beta: f64,

    /// PA bLevel value
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_LEVEL, value_parser = parse_int, allow_negative_numbers = true)]
    pub level: i64,

    /// PA bMaxDrv value
    #[arg(long, value_name = "0-1", default_value_t = DEFAULT_MAX_DRV, value_parser = parse_int, allow_negative_numbers = true)]
    pub max_drv: i64,

    /// PA initial wNominalCap value
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_NOMINAL_CAP, value_parser = parse_int, allow_negative_numbers = true)]
    pub nominal_cap: i64,

    /// Path of the si4010prog executable
    #[arg(long = "si4010prog-exec", value_name = "PATH", default_value = DEFAULT_EXEC)]
    pub si4010prog_exec: String,

    /// Si4010 programmer URI to pass to si4010prog
    #[arg(long, value_name = "URI")]
    pub programmer: Option<String>,

    /// Perform workaround for devices that automatically run program in NVM on boot
    #[arg(long)]
    pub reset_workaround: bool,

    /// Firmware symbol map (NAME = VALUE lines), default: tune_cap_bank_map.py next to the firmware
    #[arg(long, value_name = "PATH")]
    pub fw_map: Option<PathBuf>,

    /// Tuning firmware image loaded by si4010prog
    #[arg(long, value_name = "PATH", default_value = DEFAULT_FIRMWARE)]
    pub firmware: String,

    /// Print the si4010prog command line without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Tuning parameters, not yet validated.
    pub fn request(&self) -> TuningRequest {
        TuningRequest {
            freq_mhz: self.freq,
            alpha: self.alpha,
            beta: self.beta,
            level: self.level,
            max_drv: self.max_drv,
            nominal_cap: self.nominal_cap,
        }
    }

    /// Programmer settings for the given firmware map.
    pub fn programmer_config(&self, map: FirmwareMap) -> ProgrammerConfig {
        ProgrammerConfig {
            exec: self.si4010prog_exec.clone(),
            programmer: self.programmer.clone(),
            reset_workaround: self.reset_workaround,
            firmware: self.firmware.clone(),
            ..ProgrammerConfig::new(map)
        }
    }

    /// Map file given with `--fw-map`, else the one next to the firmware image.
    pub fn map_path(&self) -> PathBuf {
        match &self.fw_map {
            Some(path) => path.clone(),
            None => Path::new(&self.firmware).with_file_name(DEFAULT_MAP_FILE),
        }
    }
}

/// Integer option parser.
///
/// Values too large for an i64 saturate, so they are rejected by the range
/// checks with the usual message rather than by clap.
fn parse_int(s: &str) -> Result<i64, String> {
    match s.trim().parse::<i64>() {
        Ok(value) => Ok(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(format!("invalid int value: '{}'", s)),
        },
    }
}

/// Load the firmware symbol map from `path`.
pub fn load_map(path: &Path) -> Result<FirmwareMap> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let map = FirmwareMap::parse(&text)
        .with_context(|| format!("Invalid firmware map {}", path.display()))?;
    log::info!("Firmware map {}: {:x?}", path.display(), map);
    Ok(map)
}

/// Execute a tuning run and return the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    let request = match cli.request().validate() {
        Ok(request) => request,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(EXIT_INVALID);
        }
    };

    let map = load_map(&cli.map_path())?;
    let config = cli.programmer_config(map);

    println!("> Tuning antenna to: {:.2} MHz", request.freq_mhz());
    log::debug!(
        "Frequency record: {:x}, PA config record: {:x}",
        request.frequency_record(),
        request.pa_config_record()
    );

    firmware::preflight(Path::new(&config.firmware));

    let cmd = CommandLine::build(&config, &request);
    println!("> Running: {}", cmd);

    if cli.dry_run {
        return Ok(0);
    }

    let code = invoke::run(&cmd)?;
    if code == 0 {
        println!("> A result of 0x0000 or 0x01ff means the antenna could not be tuned");
    } else {
        log::debug!("{} exited with code {}", config.exec, code);
    }
    Ok(code)
}
