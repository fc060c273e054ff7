//! MQ系ガスセンサーの比率計算コア
//!
//! ハードウェア非依存の純粋関数のみを提供します。
//! ADC 生値から負荷抵抗との分圧モデルでセンサー抵抗 Rs を求め、
//! 清浄空気中の基準抵抗 R0 との比 `Rs / R0` を計算します。

pub mod calibration;
pub mod divider;

pub use calibration::{CalibrationBaseline, CalibrationError};
pub use divider::{resistance_ratio, DividerModel, RatioError};

/// 12ビット ADC の最大コード
pub const ADC_MAX_CODE: u16 = 4095;

/// 電圧換算に使うフルスケール値
pub const ADC_FULL_SCALE: f32 = 4095.0;
