/*!
 * # MQ-3 Gas Monitor Library
 *
 * MCP3208 経由で MQ-3 アルコールセンサーを読み取り、Rs/R0 比から
 * 警報を出すためのライブラリ
 *
 * ## モジュール構成
 * - `core`: アプリケーションの核となる機能（設定、サンプリング、警報判定、制御）
 * - `hardware`: ハードウェア制御（ADC、LED・ブザー、Raspberry Pi アダプタ）
 * - `inference`: 系列モデルとの境界
 */

pub mod core;
pub mod hardware;
pub mod inference;

// 内部で使用する型をまとめてエクスポート
pub use crate::core::{
    AlarmLevel, AlarmThresholds, AppConfig, AppController, ConfigError, CycleError,
    DetectionMode, Measurement, RatioWindow, SampleError, Sampler, WINDOW_LEN,
};
pub use gas_sensor_core::{CalibrationBaseline, CalibrationError, DividerModel, RatioError};
pub use hardware::{AdcReader, AlarmIndicator, AlarmSink, MockAdc, TransportError};
pub use inference::{ModelError, RatioHeuristicModel, SequenceModel};
pub use mcp3208::{Channel, Mcp3208, RawSample};

/// ライブラリのバージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
