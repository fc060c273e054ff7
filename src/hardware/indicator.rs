use embedded_hal::digital::OutputPin;
use log::debug;

use crate::core::alarm_policy::AlarmLevel;

/// 警報出力の制御に関するエラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndicatorError {
    #[error("LEDの制御に失敗しました: {0}")]
    Led(String),

    #[error("ブザーの制御に失敗しました: {0}")]
    Buzzer(String),
}

/// 警報レベルの出力先
pub trait AlarmSink {
    /// 警報レベルを出力に反映します
    fn apply(&mut self, level: AlarmLevel) -> Result<(), IndicatorError>;
}

/// LED とブザーによる警報表示
///
/// | レベル | LED | ブザー |
/// |--------|-----|--------|
/// | Normal | 消灯 | 停止 |
/// | Warning | 点灯 | 停止 |
/// | Critical | 点灯 | 鳴動 |
///
/// ブザーが無効の場合、Critical でも LED のみ点灯します。
pub struct AlarmIndicator<LED, BUZZER> {
    led: LED,
    buzzer: BUZZER,
    buzzer_enabled: bool,
}

impl<LED, BUZZER> AlarmIndicator<LED, BUZZER>
where
    LED: OutputPin,
    BUZZER: OutputPin,
{
    /// 出力を消灯状態で初期化します
    ///
    /// # エラー
    ///
    /// ピンの初期化に失敗した場合にエラーを返します
    pub fn new(led: LED, buzzer: BUZZER, buzzer_enabled: bool) -> Result<Self, IndicatorError> {
        let mut indicator = Self {
            led,
            buzzer,
            buzzer_enabled,
        };
        indicator.apply(AlarmLevel::Normal)?;
        Ok(indicator)
    }

    pub fn buzzer_enabled(&self) -> bool {
        self.buzzer_enabled
    }

    /// 出力ピンを返却します
    pub fn release(self) -> (LED, BUZZER) {
        (self.led, self.buzzer)
    }

    fn set_led(&mut self, on: bool) -> Result<(), IndicatorError> {
        let result = if on { self.led.set_high() } else { self.led.set_low() };
        result.map_err(|e| IndicatorError::Led(format!("{:?}", e)))
    }

    fn set_buzzer(&mut self, on: bool) -> Result<(), IndicatorError> {
        let result = if on {
            self.buzzer.set_high()
        } else {
            self.buzzer.set_low()
        };
        result.map_err(|e| IndicatorError::Buzzer(format!("{:?}", e)))
    }
}

impl<LED, BUZZER> AlarmSink for AlarmIndicator<LED, BUZZER>
where
    LED: OutputPin,
    BUZZER: OutputPin,
{
    fn apply(&mut self, level: AlarmLevel) -> Result<(), IndicatorError> {
        let (led_on, buzzer_on) = match level {
            AlarmLevel::Normal => (false, false),
            AlarmLevel::Warning => (true, false),
            AlarmLevel::Critical => (true, self.buzzer_enabled),
        };
        debug!(
            "警報出力: {} (LED={}, ブザー={})",
            level.label(),
            led_on,
            buzzer_on
        );
        self.set_led(led_on)?;
        self.set_buzzer(buzzer_on)
    }
}
