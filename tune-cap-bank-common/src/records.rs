// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Tuning request validation and the binary records written into the target.
//!
//! The tuning firmware expects two big-endian records in memory before it is
//! started: the carrier frequency in Hz as a single precision float, and the
//! PA setup parameters as they are passed to `vPa_Setup()`. Both can only be
//! produced from a [`ValidatedRequest`], so nothing out of range ever reaches
//! the device.

use core::fmt;

use byteorder::{BigEndian, ByteOrder};
use thiserror::Error;

// --- Parameter ranges ---

/// Lowest tunable frequency in MHz (inclusive).
pub const FREQ_MIN_MHZ: f64 = 27.0;
/// Highest tunable frequency in MHz (exclusive).
pub const FREQ_MAX_MHZ: f64 = 960.0;

/// bLevel must be below this value.
pub const LEVEL_LIMIT: i64 = 0x80;
/// wNominalCap must be below this value (9-bit cap bank).
pub const NOMINAL_CAP_LIMIT: i64 = 0x200;

// --- Defaults ---

pub const DEFAULT_ALPHA: f64 = 0.0;
pub const DEFAULT_BETA: f64 = 0.0;
pub const DEFAULT_LEVEL: i64 = 76;
pub const DEFAULT_MAX_DRV: i64 = 0;
pub const DEFAULT_NOMINAL_CAP: i64 = 256;

// --- Record sizes ---

pub const FREQ_RECORD_SIZE: usize = 4;
pub const PA_CONFIG_RECORD_SIZE: usize = 12;

/// Reasons a tuning request is rejected.
///
/// The display text is the message shown to the user after `Error: `.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    #[error("Frequency out of range (27 <= freq < 960)")]
    Frequency(f64),

    #[error("bLevel out of range (0 <= bLevel < 128)")]
    Level(i64),

    #[error("bMaxDrv out of range (bMaxDrv=0 or 1)")]
    MaxDrv(i64),

    #[error("wNominalCap out of range (0 <= wNominalCap < 512)")]
    NominalCap(i64),

    #[error("fAlpha out of range (too large for a 32-bit float)")]
    Alpha(f64),

    #[error("fBeta out of range (too large for a 32-bit float)")]
    Beta(f64),
}

/// Raw tuning parameters as entered by the user.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TuningRequest {
    /// Carrier frequency in MHz.
    pub freq_mhz: f64,
    pub alpha: f64,
    pub beta: f64,
    pub level: i64,
    pub max_drv: i64,
    /// Initial cap bank guess.
    pub nominal_cap: i64,
}

impl TuningRequest {
    /// Request for `freq_mhz` with default PA parameters.
    pub fn new(freq_mhz: f64) -> Self {
        Self {
            freq_mhz,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            level: DEFAULT_LEVEL,
            max_drv: DEFAULT_MAX_DRV,
            nominal_cap: DEFAULT_NOMINAL_CAP,
        }
    }

    /// Check every field against its range.
    ///
    /// Fields are checked in a fixed order (frequency, bLevel, bMaxDrv,
    /// wNominalCap, fAlpha, fBeta) and the first failure is returned.
    /// fAlpha and fBeta only fail when a finite value overflows an f32.
    pub fn validate(&self) -> Result<ValidatedRequest, ValidationError> {
        // NaN fails the range check as well
        if !(FREQ_MIN_MHZ..FREQ_MAX_MHZ).contains(&self.freq_mhz) {
            return Err(ValidationError::Frequency(self.freq_mhz));
        }
        if !(0..LEVEL_LIMIT).contains(&self.level) {
            return Err(ValidationError::Level(self.level));
        }
        if self.max_drv != 0 && self.max_drv != 1 {
            return Err(ValidationError::MaxDrv(self.max_drv));
        }
        if !(0..NOMINAL_CAP_LIMIT).contains(&self.nominal_cap) {
            return Err(ValidationError::NominalCap(self.nominal_cap));
        }
        let alpha = narrow(self.alpha).ok_or(ValidationError::Alpha(self.alpha))?;
        let beta = narrow(self.beta).ok_or(ValidationError::Beta(self.beta))?;

        Ok(ValidatedRequest {
            freq_mhz: self.freq_mhz,
            alpha,
            beta,
            level: self.level as u8,
            max_drv: self.max_drv as u8,
            nominal_cap: self.nominal_cap as u16,
        })
    }
}

/// Narrow to single precision, rejecting finite values that overflow it.
///
/// Infinities and NaN carry over unchanged.
fn narrow(value: f64) -> Option<f32> {
    let narrowed = value as f32;
    (narrowed.is_finite() || !value.is_finite()).then_some(narrowed)
}

/// Tuning parameters that passed range validation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidatedRequest {
    freq_mhz: f64,
    alpha: f32,
    beta: f32,
    level: u8,
    max_drv: u8,
    nominal_cap: u16,
}

impl ValidatedRequest {
    pub fn freq_mhz(&self) -> f64 {
        self.freq_mhz
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn beta(&self) -> f32 {
        self.beta
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn max_drv(&self) -> u8 {
        self.max_drv
    }

    pub fn nominal_cap(&self) -> u16 {
        self.nominal_cap
    }

    /// Frequency in Hz as the firmware stores it.
    pub fn frequency_record(&self) -> FrequencyRecord {
        // Scale in double precision first, then narrow
        let hz = (self.freq_mhz * 1e6) as f32;
        let mut bytes = [0u8; FREQ_RECORD_SIZE];
        BigEndian::write_f32(&mut bytes, hz);
        FrequencyRecord(bytes)
    }

    /// PA setup record: fAlpha, fBeta, bLevel, bMaxDrv, wNominalCap.
    pub fn pa_config_record(&self) -> PaConfigRecord {
        let mut bytes = [0u8; PA_CONFIG_RECORD_SIZE];
        BigEndian::write_f32(&mut bytes[0..4], self.alpha);
        BigEndian::write_f32(&mut bytes[4..8], self.beta);
        bytes[8] = self.level;
        bytes[9] = self.max_drv;
        BigEndian::write_u16(&mut bytes[10..12], self.nominal_cap);
        PaConfigRecord(bytes)
    }
}

/// Big-endian f32 frequency in Hz (4 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrequencyRecord([u8; FREQ_RECORD_SIZE]);

/// Big-endian packed PA configuration (12 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaConfigRecord([u8; PA_CONFIG_RECORD_SIZE]);

impl FrequencyRecord {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex, 8 characters.
    pub fn to_hex(&self) -> String {
        format!("{:x}", self)
    }
}

impl PaConfigRecord {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex, 24 characters.
    pub fn to_hex(&self) -> String {
        format!("{:x}", self)
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    bytes.iter().try_for_each(|b| write!(f, "{:02x}", b))
}

impl fmt::LowerHex for FrequencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl fmt::LowerHex for PaConfigRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}
