use std::time::Duration;

use gas_sensor_core::{CalibrationBaseline, CalibrationError};
use mcp3208::Channel;

use crate::core::alarm_policy::AlarmThresholds;
use crate::core::config::DetectionMode;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidCalibrationBaseline(CalibrationError),
    InvalidAdcChannel(u8),
    InvalidAlarmThresholds { warning: f32, critical: f32 },
    InvalidProbabilityThreshold(f32),
    InvalidDetectionMode(String),
    ZeroTransferTimeout,
    ZeroSpiClock,
    ZeroSampleInterval,
    ZeroWindowSampleInterval,
}

pub fn parse_calibration_baseline(r0_ohms: f32) -> Result<CalibrationBaseline, ValidationError> {
    CalibrationBaseline::new(r0_ohms).map_err(ValidationError::InvalidCalibrationBaseline)
}

/// 設定値ではマスクせず、0〜7 以外を拒否します
pub fn parse_adc_channel(value: u8) -> Result<Channel, ValidationError> {
    if value <= 7 {
        Ok(Channel::new(value))
    } else {
        Err(ValidationError::InvalidAdcChannel(value))
    }
}

pub fn parse_alarm_thresholds(warning: f32, critical: f32) -> Result<AlarmThresholds, ValidationError> {
    AlarmThresholds::new(warning, critical)
        .ok_or(ValidationError::InvalidAlarmThresholds { warning, critical })
}

pub fn parse_probability_threshold(value: f32) -> Result<f32, ValidationError> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidProbabilityThreshold(value))
    }
}

pub fn parse_detection_mode(value: &str) -> Result<DetectionMode, ValidationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "threshold" => Ok(DetectionMode::Threshold),
        "sequence" => Ok(DetectionMode::Sequence),
        _ => Err(ValidationError::InvalidDetectionMode(value.to_string())),
    }
}

pub fn parse_transfer_timeout(ms: u32) -> Result<Duration, ValidationError> {
    if ms == 0 {
        Err(ValidationError::ZeroTransferTimeout)
    } else {
        Ok(Duration::from_millis(u64::from(ms)))
    }
}

pub fn validate_spi_clock_hz(hz: u32) -> Result<(), ValidationError> {
    if hz == 0 {
        Err(ValidationError::ZeroSpiClock)
    } else {
        Ok(())
    }
}

pub fn validate_sample_interval_ms(ms: u32) -> Result<(), ValidationError> {
    if ms == 0 {
        Err(ValidationError::ZeroSampleInterval)
    } else {
        Ok(())
    }
}

pub fn validate_window_sample_interval_ms(ms: u32) -> Result<(), ValidationError> {
    if ms == 0 {
        Err(ValidationError::ZeroWindowSampleInterval)
    } else {
        Ok(())
    }
}
