// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Common types and utilities for tune_cap_bank.
//!
//! Everything in this crate is pure logic without process or file I/O:
//! - `records`: tuning request validation and the two binary records loaded
//!   into the tuning firmware
//! - `fw_map`: firmware symbol addresses parsed from the firmware's map file
//! - `commands`: the si4010prog command line that runs the tuning firmware

pub mod commands;
pub mod fw_map;
pub mod records;

// Re-export commonly used types
pub use commands::{CommandLine, ProgrammerConfig, Step};
pub use fw_map::{FirmwareMap, MapError, DEFAULT_MAP_FILE};
pub use records::{FrequencyRecord, PaConfigRecord, TuningRequest, ValidatedRequest, ValidationError};
pub use commands::{DEFAULT_EXEC, DEFAULT_FIRMWARE, RESULT_ADDR, RESULT_LEN, RUN_DELAY_MS};
