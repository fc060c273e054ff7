use std::time::Duration;

use gas_sensor_core::{CalibrationBaseline, CalibrationError};
use mcp3208::Channel;

use crate::core::alarm_policy::AlarmThresholds;
use crate::core::config_validation::{
    parse_adc_channel, parse_alarm_thresholds, parse_calibration_baseline,
    parse_detection_mode, parse_probability_threshold, parse_transfer_timeout,
    validate_sample_interval_ms, validate_spi_clock_hz, validate_window_sample_interval_ms,
    ValidationError,
};

/// アプリケーション設定
///
/// この構造体はビルド時に`build.rs`によって`cfg.toml`ファイルから
/// 読み込まれた設定を保持します。
#[toml_cfg::toml_config]
pub struct Config {
    // センサー校正
    #[default(180000.0)] // 清浄空気中の Rs (Ω)
    r0_ohms: f32,

    // MCP3208 設定
    #[default(0)]
    adc_channel: u8,

    #[default(1000000)] // 1MHz
    spi_clock_hz: u32,

    #[default(50)]
    transfer_timeout_ms: u32,

    // GPIO (BCM 番号)
    #[default(8)]
    chip_select_gpio: u8,

    #[default(18)]
    led_gpio: u8,

    #[default(25)]
    buzzer_gpio: u8,

    #[default(true)]
    buzzer_enabled: bool,

    // 検出設定
    #[default("threshold")] // "threshold" または "sequence"
    detection_mode: &'static str,

    #[default(1000)]
    sample_interval_ms: u32,

    #[default(500)] // sequence モードのウィンドウ内サンプル間隔
    window_sample_interval_ms: u32,

    #[default(1.7)]
    warning_ratio: f32,

    #[default(1.5)]
    critical_ratio: f32,

    #[default(0.5)]
    probability_threshold: f32,
}

/// 検出方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionMode {
    /// 1サンプルごとに閾値判定
    #[default]
    Threshold,
    /// 8サンプルの系列をモデルで判定
    Sequence,
}

/// 設定エラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("基準抵抗 r0_ohms が無効です: {0}")]
    InvalidCalibrationBaseline(CalibrationError),
    #[error("adc_channel の値が無効です (0-7): {0}")]
    InvalidAdcChannel(u8),
    #[error("警報閾値が無効です (0 < critical < warning): warning={warning}, critical={critical}")]
    InvalidAlarmThresholds { warning: f32, critical: f32 },
    #[error("probability_threshold の値が無効です (0-1): {0}")]
    InvalidProbabilityThreshold(f32),
    #[error("detection_mode の値が無効です (threshold/sequence): {0}")]
    InvalidDetectionMode(String),
    #[error("{0} は0より大きい値を設定してください")]
    ZeroValue(&'static str),
}

/// アプリケーション設定を表す構造体
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 清浄空気中のセンサー抵抗 R0
    pub baseline: CalibrationBaseline,

    /// MQ-3 を接続した ADC チャンネル
    pub adc_channel: Channel,

    /// SPI クロック（Hz）
    pub spi_clock_hz: u32,

    /// SPI 転送1回あたりの制限時間
    pub transfer_timeout: Duration,

    /// チップセレクト GPIO（BCM）
    pub chip_select_gpio: u8,

    /// 警報 LED GPIO（BCM）
    pub led_gpio: u8,

    /// ブザー GPIO（BCM）
    pub buzzer_gpio: u8,

    /// ブザーを鳴らすか
    pub buzzer_enabled: bool,

    /// 検出方式
    pub detection_mode: DetectionMode,

    /// 判定サイクルの間隔（ミリ秒）
    pub sample_interval_ms: u32,

    /// ウィンドウ内のサンプル間隔（ミリ秒）
    pub window_sample_interval_ms: u32,

    /// Rs/R0 比の警報閾値
    pub thresholds: AlarmThresholds,

    /// 系列モデル出力の判定閾値
    pub probability_threshold: f32,
}

impl AppConfig {
    /// 設定ファイルから設定をロードします
    pub fn load() -> Result<Self, ConfigError> {
        // toml_cfg によって生成された定数
        Self::from_config(&CONFIG)
    }

    /// `Config` の値を検証して `AppConfig` を構築します
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        // R0 はサンプリング開始前に検証する
        let baseline = parse_calibration_baseline(config.r0_ohms).map_err(map_validation_error)?;

        let adc_channel = parse_adc_channel(config.adc_channel).map_err(map_validation_error)?;

        validate_spi_clock_hz(config.spi_clock_hz).map_err(map_validation_error)?;
        let transfer_timeout =
            parse_transfer_timeout(config.transfer_timeout_ms).map_err(map_validation_error)?;

        let detection_mode =
            parse_detection_mode(config.detection_mode).map_err(map_validation_error)?;

        validate_sample_interval_ms(config.sample_interval_ms).map_err(map_validation_error)?;
        validate_window_sample_interval_ms(config.window_sample_interval_ms)
            .map_err(map_validation_error)?;

        let thresholds = parse_alarm_thresholds(config.warning_ratio, config.critical_ratio)
            .map_err(map_validation_error)?;
        let probability_threshold =
            parse_probability_threshold(config.probability_threshold).map_err(map_validation_error)?;

        Ok(AppConfig {
            baseline,
            adc_channel,
            spi_clock_hz: config.spi_clock_hz,
            transfer_timeout,
            chip_select_gpio: config.chip_select_gpio,
            led_gpio: config.led_gpio,
            buzzer_gpio: config.buzzer_gpio,
            buzzer_enabled: config.buzzer_enabled,
            detection_mode,
            sample_interval_ms: config.sample_interval_ms,
            window_sample_interval_ms: config.window_sample_interval_ms,
            thresholds,
            probability_threshold,
        })
    }
}

fn map_validation_error(err: ValidationError) -> ConfigError {
    match err {
        ValidationError::InvalidCalibrationBaseline(e) => ConfigError::InvalidCalibrationBaseline(e),
        ValidationError::InvalidAdcChannel(v) => ConfigError::InvalidAdcChannel(v),
        ValidationError::InvalidAlarmThresholds { warning, critical } => {
            ConfigError::InvalidAlarmThresholds { warning, critical }
        }
        ValidationError::InvalidProbabilityThreshold(v) => ConfigError::InvalidProbabilityThreshold(v),
        ValidationError::InvalidDetectionMode(v) => ConfigError::InvalidDetectionMode(v),
        ValidationError::ZeroTransferTimeout => ConfigError::ZeroValue("transfer_timeout_ms"),
        ValidationError::ZeroSpiClock => ConfigError::ZeroValue("spi_clock_hz"),
        ValidationError::ZeroSampleInterval => ConfigError::ZeroValue("sample_interval_ms"),
        ValidationError::ZeroWindowSampleInterval => {
            ConfigError::ZeroValue("window_sample_interval_ms")
        }
    }
}
