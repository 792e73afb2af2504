// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Pre-flight inspection of the tuning firmware image.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use crc::{Crc, CRC_32_ISO_HDLC};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Size and checksum of a firmware image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub size: usize,
    pub crc32: u32,
}

/// Read the image and compute its CRC-32.
pub fn inspect(path: &Path) -> Result<ImageInfo> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(ImageInfo {
        size: data.len(),
        crc32: CRC32.checksum(&data),
    })
}

/// Log what si4010prog is about to load.
///
/// Never fails: si4010prog resolves the image path itself and reports its own
/// error if it cannot load it.
pub fn preflight(path: &Path) {
    if !path.exists() {
        log::warn!(
            "Firmware image {} not found in the current directory",
            path.display()
        );
        return;
    }

    match inspect(path) {
        Ok(info) => log::info!(
            "Firmware: {} ({} bytes, CRC32: 0x{:08x})",
            path.display(),
            info.size,
            info.crc32
        ),
        Err(e) => log::warn!("{:#}", e),
    }
}
