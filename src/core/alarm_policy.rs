pub const DEFAULT_WARNING_RATIO: f32 = 1.7;
pub const DEFAULT_CRITICAL_RATIO: f32 = 1.5;
pub const DEFAULT_PROBABILITY_THRESHOLD: f32 = 0.5;

/// 警報レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmLevel {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl AlarmLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AlarmLevel::Normal => "正常",
            AlarmLevel::Warning => "注意",
            AlarmLevel::Critical => "危険",
        }
    }

    /// 系列モデルの出力確率を警報レベルに変換
    ///
    /// 閾値を超えた場合のみ Critical（閾値ちょうどは Normal）。
    pub fn from_probability(probability: f32, threshold: f32) -> Self {
        if probability > threshold {
            AlarmLevel::Critical
        } else {
            AlarmLevel::Normal
        }
    }
}

/// Rs/R0 比の警報閾値
///
/// アルコール濃度が高いほど Rs が下がるため、比が閾値を下回ると警報になります。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlarmThresholds {
    warning_ratio: f32,
    critical_ratio: f32,
}

impl AlarmThresholds {
    /// `0 < critical < warning` かつ有限値でない場合は `None`
    pub fn new(warning_ratio: f32, critical_ratio: f32) -> Option<Self> {
        let ordered = critical_ratio > 0.0 && critical_ratio < warning_ratio;
        if warning_ratio.is_finite() && critical_ratio.is_finite() && ordered {
            Some(Self {
                warning_ratio,
                critical_ratio,
            })
        } else {
            None
        }
    }

    pub fn warning_ratio(&self) -> f32 {
        self.warning_ratio
    }

    pub fn critical_ratio(&self) -> f32 {
        self.critical_ratio
    }

    pub fn classify(&self, ratio: f32) -> AlarmLevel {
        if ratio < self.critical_ratio {
            AlarmLevel::Critical
        } else if ratio < self.warning_ratio {
            AlarmLevel::Warning
        } else {
            AlarmLevel::Normal
        }
    }
}

impl Default for AlarmThresholds {
    fn default() -> Self {
        Self {
            warning_ratio: DEFAULT_WARNING_RATIO,
            critical_ratio: DEFAULT_CRITICAL_RATIO,
        }
    }
}
