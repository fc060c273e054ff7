use std::fmt;

use crate::calibration::CalibrationBaseline;
use crate::{ADC_FULL_SCALE, ADC_MAX_CODE};

/// 比率計算の入力ドメイン違反
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioError {
    /// ADC 値が 0 (Vout = 0 となり Rs が定義できない)
    ZeroCode,
    /// ADC 値が12ビットの範囲外
    CodeOutOfRange(u16),
}

impl fmt::Display for RatioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioError::ZeroCode => write!(f, "ADC code 0 gives zero output voltage"),
            RatioError::CodeOutOfRange(code) => {
                write!(f, "ADC code out of 12-bit range: {}", code)
            }
        }
    }
}

impl std::error::Error for RatioError {}

/// センサーと負荷抵抗 RL の分圧モデル
///
/// センサーと RL を VREF-GND 間に直列に接続し、RL の両端電圧を Vout として
/// 測定する構成です。
///
/// ```text
/// Vout = (code / 4095.0) * VREF
/// Rs   = RL * (VREF - Vout) / Vout
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerModel {
    vref_volts: f32,
    load_resistance_ohms: f32,
}

impl DividerModel {
    /// MQ-3 + MCP3208 ボード (VREF 3.3V, RL 100kΩ)
    pub const MQ3_BOARD: Self = Self {
        vref_volts: 3.3,
        load_resistance_ohms: 100_000.0,
    };

    /// 参照電圧・負荷抵抗が正の有限値でない場合は `None`
    pub fn new(vref_volts: f32, load_resistance_ohms: f32) -> Option<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(vref_volts) && valid(load_resistance_ohms) {
            Some(Self {
                vref_volts,
                load_resistance_ohms,
            })
        } else {
            None
        }
    }

    pub fn vref_volts(&self) -> f32 {
        self.vref_volts
    }

    pub fn load_resistance_ohms(&self) -> f32 {
        self.load_resistance_ohms
    }

    /// ADC 値を測定電圧 Vout に変換
    pub fn output_voltage(&self, code: u16) -> f32 {
        (code as f32 / ADC_FULL_SCALE) * self.vref_volts
    }

    /// ADC 値からセンサー抵抗 Rs (Ω) を計算
    ///
    /// 4095 は Rs = 0 の飽和値として正常に扱います。
    pub fn sensor_resistance(&self, code: u16) -> Result<f32, RatioError> {
        if code == 0 {
            return Err(RatioError::ZeroCode);
        }
        if code > ADC_MAX_CODE {
            return Err(RatioError::CodeOutOfRange(code));
        }

        let vout = self.output_voltage(code);
        Ok(self.load_resistance_ohms * (self.vref_volts - vout) / vout)
    }

    /// ADC 値から `Rs / R0` を計算
    ///
    /// クランプは行いません。
    pub fn ratio(&self, code: u16, baseline: &CalibrationBaseline) -> Result<f32, RatioError> {
        let rs = self.sensor_resistance(code)?;
        Ok(rs / baseline.ohms())
    }
}

impl Default for DividerModel {
    fn default() -> Self {
        Self::MQ3_BOARD
    }
}

/// `DividerModel::MQ3_BOARD` で `Rs / R0` を計算
pub fn resistance_ratio(code: u16, baseline: &CalibrationBaseline) -> Result<f32, RatioError> {
    DividerModel::MQ3_BOARD.ratio(code, baseline)
}
