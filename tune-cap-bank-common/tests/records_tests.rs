// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for request validation and record encoding.

use tune_cap_bank_common::records::{
    TuningRequest, ValidationError, DEFAULT_LEVEL, DEFAULT_NOMINAL_CAP, FREQ_RECORD_SIZE,
    PA_CONFIG_RECORD_SIZE,
};

// =============================================================================
// Frequency validation
// =============================================================================

#[test]
fn test_frequency_lower_bound_inclusive() {
    assert!(TuningRequest::new(27.0).validate().is_ok());
}

#[test]
fn test_frequency_upper_bound_exclusive() {
    assert!(TuningRequest::new(959.999).validate().is_ok());
    assert_eq!(
        TuningRequest::new(960.0).validate(),
        Err(ValidationError::Frequency(960.0))
    );
}

#[test]
fn test_frequency_below_range() {
    assert_eq!(
        TuningRequest::new(26.99).validate(),
        Err(ValidationError::Frequency(26.99))
    );
    assert!(TuningRequest::new(-433.92).validate().is_err());
}

#[test]
fn test_frequency_nan_rejected() {
    assert!(matches!(
        TuningRequest::new(f64::NAN).validate(),
        Err(ValidationError::Frequency(_))
    ));
}

#[test]
fn test_common_bands_accepted() {
    for freq in [27.145, 315.0, 433.92, 868.3, 915.0] {
        assert!(TuningRequest::new(freq).validate().is_ok(), "{freq} MHz");
    }
}

// =============================================================================
// PA parameter validation
// =============================================================================

#[test]
fn test_defaults() {
    let req = TuningRequest::new(433.92);
    assert_eq!(req.level, DEFAULT_LEVEL);
    assert_eq!(req.max_drv, 0);
    assert_eq!(req.nominal_cap, DEFAULT_NOMINAL_CAP);
    assert_eq!(req.alpha, 0.0);
    assert_eq!(req.beta, 0.0);
}

#[test]
fn test_level_range() {
    let mut req = TuningRequest::new(433.92);
    for level in [0, 1, 76, 127] {
        req.level = level;
        assert_eq!(req.validate().map(|v| v.level()), Ok(level as u8));
    }
    req.level = 128;
    assert_eq!(req.validate(), Err(ValidationError::Level(128)));
    req.level = -1;
    assert_eq!(req.validate(), Err(ValidationError::Level(-1)));
}

#[test]
fn test_max_drv_only_zero_or_one() {
    let mut req = TuningRequest::new(433.92);
    req.max_drv = 1;
    assert!(req.validate().is_ok());
    req.max_drv = 2;
    assert_eq!(req.validate(), Err(ValidationError::MaxDrv(2)));
    req.max_drv = -1;
    assert_eq!(req.validate(), Err(ValidationError::MaxDrv(-1)));
}

#[test]
fn test_nominal_cap_range() {
    let mut req = TuningRequest::new(433.92);
    req.nominal_cap = 0;
    assert!(req.validate().is_ok());
    req.nominal_cap = 511;
    assert_eq!(req.validate().map(|v| v.nominal_cap()), Ok(511));
    req.nominal_cap = 512;
    assert_eq!(req.validate(), Err(ValidationError::NominalCap(512)));
    req.nominal_cap = -5;
    assert_eq!(req.validate(), Err(ValidationError::NominalCap(-5)));
}

#[test]
fn test_fields_fail_independently() {
    let mut req = TuningRequest::new(433.92);
    req.nominal_cap = 600;
    assert_eq!(req.validate(), Err(ValidationError::NominalCap(600)));

    let mut req = TuningRequest::new(433.92);
    req.max_drv = 7;
    assert_eq!(req.validate(), Err(ValidationError::MaxDrv(7)));
}

#[test]
fn test_frequency_checked_first() {
    let mut req = TuningRequest::new(10.0);
    req.level = 500;
    req.nominal_cap = 1000;
    assert_eq!(req.validate(), Err(ValidationError::Frequency(10.0)));
}

#[test]
fn test_alpha_beta_must_fit_f32() {
    let mut req = TuningRequest::new(433.92);
    req.alpha = 1e40;
    assert_eq!(req.validate(), Err(ValidationError::Alpha(1e40)));

    let mut req = TuningRequest::new(433.92);
    req.beta = -1e300;
    assert_eq!(req.validate(), Err(ValidationError::Beta(-1e300)));

    let mut req = TuningRequest::new(433.92);
    req.alpha = -0.25;
    req.beta = 1.5;
    assert!(req.validate().is_ok());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ValidationError::Frequency(1.0).to_string(),
        "Frequency out of range (27 <= freq < 960)"
    );
    assert_eq!(
        ValidationError::Level(200).to_string(),
        "bLevel out of range (0 <= bLevel < 128)"
    );
    assert_eq!(
        ValidationError::MaxDrv(3).to_string(),
        "bMaxDrv out of range (bMaxDrv=0 or 1)"
    );
    assert_eq!(
        ValidationError::NominalCap(512).to_string(),
        "wNominalCap out of range (0 <= wNominalCap < 512)"
    );
}

#[test]
fn test_non_finite_alpha_beta_pass_through() {
    let mut req = TuningRequest::new(433.92);
    req.alpha = f64::INFINITY;
    req.beta = f64::NAN;
    let valid = req.validate().unwrap();
    assert_eq!(valid.alpha(), f32::INFINITY);
    assert!(valid.beta().is_nan());

    let record = valid.pa_config_record();
    assert_eq!(&record.as_bytes()[0..4], &f32::INFINITY.to_be_bytes());
}

// =============================================================================
// Record encoding
// =============================================================================

#[test]
fn test_frequency_record_433_92() {
    let req = TuningRequest::new(433.92).validate().unwrap();
    let record = req.frequency_record();

    assert_eq!(record.as_bytes().len(), FREQ_RECORD_SIZE);
    assert_eq!(record.as_bytes(), &433_920_000.0f32.to_be_bytes());
    assert_eq!(record.to_hex(), "4dcee8c0");
}

#[test]
fn test_frequency_record_scaled_in_double_precision() {
    let req = TuningRequest::new(868.3).validate().unwrap();
    let expected = ((868.3f64 * 1e6) as f32).to_be_bytes();
    assert_eq!(req.frequency_record().as_bytes(), &expected);
}

#[test]
fn test_pa_config_record_defaults() {
    let req = TuningRequest::new(433.92).validate().unwrap();
    let record = req.pa_config_record();

    assert_eq!(record.as_bytes().len(), PA_CONFIG_RECORD_SIZE);
    assert_eq!(record.to_hex(), "00000000000000004c000100");
    assert_eq!(record.to_hex().len(), 24);
}

#[test]
fn test_pa_config_record_field_order() {
    let mut req = TuningRequest::new(433.92);
    req.alpha = 0.5;
    req.beta = -2.0;
    req.level = 0x7f;
    req.max_drv = 1;
    req.nominal_cap = 0x1ab;
    let record = req.validate().unwrap().pa_config_record();

    let mut expected = Vec::new();
    expected.extend_from_slice(&0.5f32.to_be_bytes());
    expected.extend_from_slice(&(-2.0f32).to_be_bytes());
    expected.extend_from_slice(&[0x7f, 0x01, 0x01, 0xab]);
    assert_eq!(record.as_bytes(), expected.as_slice());
    assert_eq!(record.to_hex(), "3f000000c00000007f0101ab");
}

#[test]
fn test_hex_is_lowercase() {
    let req = TuningRequest::new(915.0).validate().unwrap();
    let hex = req.frequency_record().to_hex();
    assert_eq!(hex, hex.to_lowercase());
    assert_eq!(format!("{:x}", req.frequency_record()), hex);
}
