use gas_sensor_core::{CalibrationBaseline, DividerModel, RatioError};
use log::debug;
use mcp3208::{Channel, RawSample};

use crate::hardware::{AdcReader, TransportError};

/// 1回のサンプリングで発生するエラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("ADC読み取りに失敗しました: {0}")]
    Transport(#[from] TransportError),

    #[error("Rs/R0 比を計算できません: {0}")]
    Domain(#[from] RatioError),
}

/// 1回分の測定結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub raw: RawSample,
    pub ratio: f32,
}

/// ADC 読み取りと比率計算をまとめたサンプラー
pub struct Sampler<A: AdcReader> {
    adc: A,
    channel: Channel,
    baseline: CalibrationBaseline,
    model: DividerModel,
}

impl<A: AdcReader> Sampler<A> {
    pub fn new(adc: A, channel: Channel, baseline: CalibrationBaseline) -> Self {
        Self::with_model(adc, channel, baseline, DividerModel::MQ3_BOARD)
    }

    pub fn with_model(
        adc: A,
        channel: Channel,
        baseline: CalibrationBaseline,
        model: DividerModel,
    ) -> Self {
        Self {
            adc,
            channel,
            baseline,
            model,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn baseline(&self) -> CalibrationBaseline {
        self.baseline
    }

    /// ADC を1回読み取り、Rs/R0 比を計算します
    pub fn sample(&mut self) -> Result<Measurement, SampleError> {
        let raw = self.adc.read_raw(self.channel)?;
        let ratio = self.model.ratio(raw.code(), &self.baseline)?;
        debug!(
            "CH{} raw={} Vout={:.4}V ratio={:.4}",
            self.channel.index(),
            raw.code(),
            self.model.output_voltage(raw.code()),
            ratio
        );
        Ok(Measurement { raw, ratio })
    }

    pub fn into_inner(self) -> A {
        self.adc
    }
}
