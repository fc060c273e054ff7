//! 監視ループの結合テスト（MockAdc と記録用の出力先を使用）

use std::time::Duration;

use embedded_hal::delay::DelayNs;

use mq3_gas_monitor::core::alarm_policy::AlarmThresholds;
use mq3_gas_monitor::hardware::IndicatorError;
use mq3_gas_monitor::{
    AlarmLevel, AlarmSink, AppConfig, AppController, CalibrationBaseline, Channel, CycleError,
    DetectionMode, MockAdc, ModelError, RatioError, RatioHeuristicModel, SampleError,
    SequenceModel, TransportError, WINDOW_LEN,
};

#[derive(Default)]
struct RecordingSink {
    applied: Vec<AlarmLevel>,
}

impl AlarmSink for RecordingSink {
    fn apply(&mut self, level: AlarmLevel) -> Result<(), IndicatorError> {
        self.applied.push(level);
        Ok(())
    }
}

/// 待ち時間を記録するだけのディレイ
#[derive(Default)]
struct RecordingDelay {
    waits_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

/// 受け取った系列を記録し、決められた確率を返すモデル
struct ScriptedModel {
    outputs: Vec<Result<f32, ModelError>>,
    seen: Vec<[f32; WINDOW_LEN]>,
}

impl ScriptedModel {
    fn new(outputs: Vec<Result<f32, ModelError>>) -> Self {
        Self {
            outputs,
            seen: Vec::new(),
        }
    }
}

impl SequenceModel for ScriptedModel {
    fn predict(&mut self, ratios: &[f32; WINDOW_LEN]) -> Result<f32, ModelError> {
        self.seen.push(*ratios);
        self.outputs.remove(0)
    }
}

fn config() -> AppConfig {
    AppConfig {
        baseline: CalibrationBaseline::new(180_000.0).unwrap(),
        adc_channel: Channel::CH1,
        spi_clock_hz: 1_000_000,
        transfer_timeout: Duration::from_millis(50),
        chip_select_gpio: 8,
        led_gpio: 18,
        buzzer_gpio: 25,
        buzzer_enabled: true,
        detection_mode: DetectionMode::Threshold,
        sample_interval_ms: 1000,
        window_sample_interval_ms: 500,
        thresholds: AlarmThresholds::default(),
        probability_threshold: 0.5,
    }
}

// R0=180kΩ での ADC 値と比の目安:
//   800 -> 約2.29 (Normal), 1100 -> 約1.51 (Warning), 1200 -> 約1.34 (Critical)
const NORMAL_CODE: u16 = 800;
const WARNING_CODE: u16 = 1100;
const CRITICAL_CODE: u16 = 1200;

#[test]
fn test_threshold_levels_follow_ratio() {
    let mock = MockAdc::new();
    mock.queue_codes(&[NORMAL_CODE, WARNING_CODE, CRITICAL_CODE, NORMAL_CODE]);
    let mut controller = AppController::new(&config(), mock.clone(), RecordingSink::default());

    assert_eq!(controller.threshold_cycle(), Ok(AlarmLevel::Normal));
    assert_eq!(controller.threshold_cycle(), Ok(AlarmLevel::Warning));
    assert_eq!(controller.threshold_cycle(), Ok(AlarmLevel::Critical));
    assert_eq!(controller.threshold_cycle(), Ok(AlarmLevel::Normal));

    assert_eq!(
        controller.sink().applied,
        vec![
            AlarmLevel::Normal,
            AlarmLevel::Warning,
            AlarmLevel::Critical,
            AlarmLevel::Normal
        ]
    );
    assert_eq!(mock.get_requested_channels(), vec![Channel::CH1; 4]);
}

#[test]
fn test_errors_keep_previous_alarm_state() {
    let mock = MockAdc::new();
    mock.queue_code(CRITICAL_CODE);
    mock.queue_error(TransportError::Bus("Simulated bus error".to_string()));
    mock.queue_code(0);
    let mut controller = AppController::new(&config(), mock, RecordingSink::default());

    assert_eq!(controller.threshold_cycle(), Ok(AlarmLevel::Critical));

    assert!(matches!(
        controller.threshold_cycle(),
        Err(CycleError::Sample(SampleError::Transport(_)))
    ));
    assert_eq!(controller.level(), AlarmLevel::Critical);

    assert_eq!(
        controller.threshold_cycle(),
        Err(CycleError::Sample(SampleError::Domain(RatioError::ZeroCode)))
    );
    assert_eq!(controller.level(), AlarmLevel::Critical);
    assert_eq!(controller.sink().applied, vec![AlarmLevel::Critical]);
}

#[test]
fn test_run_threshold_waits_between_cycles() {
    let mock = MockAdc::new();
    mock.queue_codes(&[NORMAL_CODE, CRITICAL_CODE]);
    let mut controller = AppController::new(&config(), mock.clone(), RecordingSink::default());
    let mut delay = RecordingDelay::default();

    // 3回目はキューが空のためタイムアウト扱い
    controller.run_threshold(&mut delay, Some(3));

    assert_eq!(mock.read_count(), 3);
    assert_eq!(delay.waits_ms, vec![1000, 1000, 1000]);
    assert_eq!(controller.level(), AlarmLevel::Critical);
}

#[test]
fn test_sequence_predicts_once_per_window_in_order() {
    let mock = MockAdc::new();
    let codes = [800, 850, 900, 950, 1000, 1050, 1100, 1150];
    mock.queue_codes(&codes);
    let mut controller = AppController::new(&config(), mock, RecordingSink::default());
    let mut model = ScriptedModel::new(vec![Ok(0.9)]);

    for _ in 0..WINDOW_LEN - 1 {
        assert_eq!(controller.sequence_step(&mut model), Ok(None));
    }
    assert_eq!(
        controller.sequence_step(&mut model),
        Ok(Some(AlarmLevel::Critical))
    );

    assert_eq!(model.seen.len(), 1);
    let window = model.seen[0];
    for pair in window.windows(2) {
        // ADC 値が増えるほど比は下がる
        assert!(pair[0] > pair[1]);
    }
    assert!(controller.window().is_empty());
    assert_eq!(controller.level(), AlarmLevel::Critical);
}

#[test]
fn test_sequence_model_failures_keep_level() {
    let mock = MockAdc::new();
    mock.queue_codes(&[NORMAL_CODE; WINDOW_LEN * 3]);
    let mut controller = AppController::new(&config(), mock, RecordingSink::default());
    let mut model = ScriptedModel::new(vec![
        Ok(0.8),
        Err(ModelError::Inference("interpreter unavailable".to_string())),
        Ok(1.5),
    ]);

    let mut results = Vec::new();
    for _ in 0..WINDOW_LEN * 3 {
        if let Some(result) = controller.sequence_step(&mut model).transpose() {
            results.push(result);
        }
    }

    assert_eq!(results.len(), 3);
    assert_eq!(results[0], Ok(AlarmLevel::Critical));
    assert!(matches!(
        results[1],
        Err(CycleError::Model(ModelError::Inference(_)))
    ));
    assert_eq!(
        results[2],
        Err(CycleError::Model(ModelError::InvalidOutput(1.5)))
    );
    assert_eq!(controller.level(), AlarmLevel::Critical);
}

#[test]
fn test_run_sequence_uses_window_and_cycle_intervals() {
    let mock = MockAdc::new();
    mock.queue_codes(&[CRITICAL_CODE; WINDOW_LEN]);
    let mut controller = AppController::new(&config(), mock, RecordingSink::default());
    let mut model = RatioHeuristicModel::new(1.5);
    let mut delay = RecordingDelay::default();

    controller.run_sequence(&mut model, &mut delay, Some(WINDOW_LEN as u64));

    let mut expected = vec![500; WINDOW_LEN - 1];
    expected.push(1000);
    assert_eq!(delay.waits_ms, expected);
    assert_eq!(controller.level(), AlarmLevel::Critical);
    assert_eq!(controller.sink().applied, vec![AlarmLevel::Critical]);
}

#[test]
fn test_sequence_skips_failed_samples() {
    let mock = MockAdc::new();
    mock.queue_codes(&[NORMAL_CODE; 3]);
    mock.queue_error(TransportError::Timeout);
    mock.queue_codes(&[NORMAL_CODE; 5]);
    let mut controller = AppController::new(&config(), mock, RecordingSink::default());
    let mut model = ScriptedModel::new(vec![Ok(0.2)]);

    let mut predictions = 0;
    for _ in 0..9 {
        if let Ok(Some(level)) = controller.sequence_step(&mut model) {
            assert_eq!(level, AlarmLevel::Normal);
            predictions += 1;
        }
    }

    assert_eq!(predictions, 1);
    assert_eq!(model.seen.len(), 1);
}
