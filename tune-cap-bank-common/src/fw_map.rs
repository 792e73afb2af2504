// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Firmware symbol map.
//!
//! The tuning firmware build exports the addresses the host needs as a list
//! of `NAME = VALUE` assignments (`tune_cap_bank_map.py`), shipped next to
//! the firmware image it was generated from. The addresses change with every
//! build, so there are no built-in fallbacks.

use core::str::FromStr;

use thiserror::Error;

/// Map file name, looked up in the directory of the firmware image.
pub const DEFAULT_MAP_FILE: &str = "tune_cap_bank_map.py";

const SYM_ADDR_FREQ: &str = "ADDR_FREQ";
const SYM_ADDR_PA_CONFIG: &str = "ADDR_PA_CONFIG";
const SYM_BP_ADDR: &str = "BP_ADDR";

/// Errors from parsing a firmware map file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("line {line}: expected NAME = VALUE")]
    Malformed { line: usize },

    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },

    #[error("missing symbol {0}")]
    Missing(&'static str),

    #[error("{name} = {value:#x} out of range (max {max:#x})")]
    OutOfRange {
        name: &'static str,
        value: u64,
        max: u64,
    },
}

/// Addresses of the firmware symbols used to drive a tuning run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FirmwareMap {
    /// Internal RAM address of the frequency record.
    pub addr_freq: u8,
    /// XRAM address of the PA configuration record.
    pub addr_pa_config: u16,
    /// Code address reached once tuning has finished.
    pub bp_addr: u16,
}

impl FirmwareMap {
    /// Parse a map file.
    ///
    /// Blank lines and `#` comments are skipped, unknown names are ignored.
    /// All three symbols must be present.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut addr_freq = None;
        let mut addr_pa_config = None;
        let mut bp_addr = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let content = raw.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }

            let (name, value) = content
                .split_once('=')
                .map(|(n, v)| (n.trim(), v.trim()))
                .ok_or(MapError::Malformed { line })?;
            if name.is_empty() || value.is_empty() {
                return Err(MapError::Malformed { line });
            }

            let slot = match name {
                SYM_ADDR_FREQ => &mut addr_freq,
                SYM_ADDR_PA_CONFIG => &mut addr_pa_config,
                SYM_BP_ADDR => &mut bp_addr,
                _ => {
                    log::debug!("fw map: ignoring symbol {name}");
                    continue;
                }
            };
            *slot = Some(parse_number(value).ok_or_else(|| MapError::InvalidNumber {
                line,
                value: value.to_string(),
            })?);
        }

        Ok(Self {
            addr_freq: fit(SYM_ADDR_FREQ, addr_freq, u8::MAX as u64)? as u8,
            addr_pa_config: fit(SYM_ADDR_PA_CONFIG, addr_pa_config, u16::MAX as u64)? as u16,
            bp_addr: fit(SYM_BP_ADDR, bp_addr, u16::MAX as u64)? as u16,
        })
    }
}

impl FromStr for FirmwareMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Decimal or `0x`-prefixed hexadecimal.
fn parse_number(value: &str) -> Option<u64> {
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

fn fit(name: &'static str, value: Option<u64>, max: u64) -> Result<u64, MapError> {
    let value = value.ok_or(MapError::Missing(name))?;
    if value > max {
        return Err(MapError::OutOfRange { name, value, max });
    }
    Ok(value)
}
