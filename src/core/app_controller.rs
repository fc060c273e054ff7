use embedded_hal::delay::DelayNs;
use log::{error, info, warn};

use crate::core::alarm_policy::{AlarmLevel, AlarmThresholds};
use crate::core::config::AppConfig;
use crate::core::ratio_window::RatioWindow;
use crate::core::sampler::{SampleError, Sampler};
use crate::hardware::{AdcReader, AlarmSink};
use crate::inference::{checked_probability, ModelError, SequenceModel};

/// 1サイクルの判定が行えなかった理由
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CycleError {
    #[error(transparent)]
    Sample(#[from] SampleError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// 監視ループの制御
///
/// 判定に失敗したサイクルは読み飛ばし、直前の警報レベルを維持します。
pub struct AppController<A: AdcReader, S: AlarmSink> {
    sampler: Sampler<A>,
    sink: S,
    thresholds: AlarmThresholds,
    probability_threshold: f32,
    sample_interval_ms: u32,
    window_sample_interval_ms: u32,
    level: AlarmLevel,
    window: RatioWindow,
}

impl<A: AdcReader, S: AlarmSink> AppController<A, S> {
    pub fn new(config: &AppConfig, adc: A, sink: S) -> Self {
        Self {
            sampler: Sampler::new(adc, config.adc_channel, config.baseline),
            sink,
            thresholds: config.thresholds,
            probability_threshold: config.probability_threshold,
            sample_interval_ms: config.sample_interval_ms,
            window_sample_interval_ms: config.window_sample_interval_ms,
            level: AlarmLevel::Normal,
            window: RatioWindow::new(),
        }
    }

    /// 現在の警報レベル
    pub fn level(&self) -> AlarmLevel {
        self.level
    }

    pub fn window(&self) -> &RatioWindow {
        &self.window
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// 閾値方式で1回判定します
    pub fn threshold_cycle(&mut self) -> Result<AlarmLevel, CycleError> {
        let measurement = self.sampler.sample().inspect_err(|e| {
            warn!("サンプリングをスキップします: {}", e);
        })?;

        let level = self.thresholds.classify(measurement.ratio);
        info!(
            "raw={} Rs/R0={:.3} -> {}",
            measurement.raw.code(),
            measurement.ratio,
            level.label()
        );
        self.update_level(level);
        Ok(level)
    }

    /// 系列方式で1サンプル進めます
    ///
    /// ウィンドウが満たされたときのみ推論を行い、`Some(level)` を返します。
    pub fn sequence_step<M: SequenceModel>(
        &mut self,
        model: &mut M,
    ) -> Result<Option<AlarmLevel>, CycleError> {
        let measurement = self.sampler.sample().inspect_err(|e| {
            warn!("サンプリングをスキップします: {}", e);
        })?;

        let Some(ratios) = self.window.push(measurement.ratio) else {
            return Ok(None);
        };

        info!("Rs/R0 系列: {}", format_ratios(&ratios));
        let probability = model
            .predict(&ratios)
            .and_then(checked_probability)
            .inspect_err(|e| {
                error!("推論に失敗しました。警報レベルを維持します: {}", e);
            })?;

        let level = AlarmLevel::from_probability(probability, self.probability_threshold);
        info!("推論確率={:.3} -> {}", probability, level.label());
        self.update_level(level);
        Ok(Some(level))
    }

    /// 閾値方式の監視ループ
    ///
    /// `max_cycles` が `None` の場合は無限に繰り返します。
    pub fn run_threshold<D: DelayNs>(&mut self, delay: &mut D, max_cycles: Option<u64>) {
        info!("閾値方式で監視を開始します");
        let mut cycles = 0u64;
        while max_cycles.map_or(true, |max| cycles < max) {
            let _ = self.threshold_cycle();
            cycles += 1;
            delay.delay_ms(self.sample_interval_ms);
        }
    }

    /// 系列方式の監視ループ
    ///
    /// `max_cycles` はサンプリング回数を数えます。
    pub fn run_sequence<M: SequenceModel, D: DelayNs>(
        &mut self,
        model: &mut M,
        delay: &mut D,
        max_cycles: Option<u64>,
    ) {
        info!("系列方式で監視を開始します");
        let mut cycles = 0u64;
        while max_cycles.map_or(true, |max| cycles < max) {
            let window_completed = match self.sequence_step(model) {
                Ok(Some(_)) | Err(CycleError::Model(_)) => true,
                Ok(None) | Err(CycleError::Sample(_)) => false,
            };
            cycles += 1;
            if window_completed {
                delay.delay_ms(self.sample_interval_ms);
            } else {
                delay.delay_ms(self.window_sample_interval_ms);
            }
        }
    }

    fn update_level(&mut self, level: AlarmLevel) {
        if level != self.level {
            info!("警報レベル変更: {} -> {}", self.level.label(), level.label());
        }
        self.level = level;
        if let Err(e) = self.sink.apply(level) {
            error!("警報出力の更新に失敗しました: {}", e);
        }
    }
}

/// 比の系列をログ用に整形します
fn format_ratios(ratios: &[f32]) -> String {
    let items: Vec<String> = ratios.iter().map(|r| format!("{:.3}", r)).collect();
    format!("[{}]", items.join(", "))
}
