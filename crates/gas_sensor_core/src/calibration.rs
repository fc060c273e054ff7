use std::fmt;

/// 基準抵抗の設定エラー
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationError {
    /// R0 が 0 以下
    NonPositive(f32),
    /// R0 が NaN または無限大
    NotFinite(f32),
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::NonPositive(v) => {
                write!(f, "calibration baseline R0 must be positive: {}", v)
            }
            CalibrationError::NotFinite(v) => {
                write!(f, "calibration baseline R0 must be finite: {}", v)
            }
        }
    }
}

impl std::error::Error for CalibrationError {}

/// 清浄空気中のセンサー抵抗 R0 (Ω)
///
/// 起動時に一度だけ設定され、プロセス終了まで変化しません。
/// 正の有限値であることを構築時に保証するため、サンプリング開始前に
/// 不正な値を検出できます。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationBaseline(f32);

impl CalibrationBaseline {
    pub fn new(r0_ohms: f32) -> Result<Self, CalibrationError> {
        if !r0_ohms.is_finite() {
            return Err(CalibrationError::NotFinite(r0_ohms));
        }
        if r0_ohms <= 0.0 {
            return Err(CalibrationError::NonPositive(r0_ohms));
        }
        Ok(Self(r0_ohms))
    }

    pub fn ohms(&self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for CalibrationBaseline {
    type Error = CalibrationError;

    fn try_from(r0_ohms: f32) -> Result<Self, Self::Error> {
        Self::new(r0_ohms)
    }
}
