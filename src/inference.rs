//! 系列モデルとの境界
//!
//! 8個の Rs/R0 比（サンプリング順）から飲酒状態の確率を推定します。
//! 学習済みモデルの読み込みと実行は外部の実装に任せ、ここでは
//! インターフェースと、インタプリタなしでパイプラインを動かすための
//! 簡易モデルのみを提供します。

use log::debug;

use crate::core::ratio_window::WINDOW_LEN;

/// 推論エラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("推論に失敗しました: {0}")]
    Inference(String),
    #[error("モデル出力が確率の範囲外です: {0}")]
    InvalidOutput(f32),
}

/// 比の系列を受け取り確率を返すモデル
pub trait SequenceModel {
    fn predict(&mut self, ratios: &[f32; WINDOW_LEN]) -> Result<f32, ModelError>;
}

/// モデル出力が [0, 1] の有限値であることを確認します
pub fn checked_probability(probability: f32) -> Result<f32, ModelError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(ModelError::InvalidOutput(probability))
    }
}

/// 危険閾値を下回った比の割合を確率とみなす簡易モデル
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioHeuristicModel {
    critical_ratio: f32,
}

impl RatioHeuristicModel {
    pub fn new(critical_ratio: f32) -> Self {
        Self { critical_ratio }
    }
}

impl SequenceModel for RatioHeuristicModel {
    fn predict(&mut self, ratios: &[f32; WINDOW_LEN]) -> Result<f32, ModelError> {
        if let Some(bad) = ratios.iter().find(|r| !r.is_finite()) {
            return Err(ModelError::Inference(format!("入力に有限でない値: {}", bad)));
        }
        let below = ratios.iter().filter(|&&r| r < self.critical_ratio).count();
        let probability = below as f32 / WINDOW_LEN as f32;
        debug!("簡易モデル: {}/{} が閾値未満", below, WINDOW_LEN);
        checked_probability(probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_probability() {
        assert_eq!(checked_probability(0.0), Ok(0.0));
        assert_eq!(checked_probability(1.0), Ok(1.0));
        assert_eq!(checked_probability(1.2), Err(ModelError::InvalidOutput(1.2)));
        assert_eq!(checked_probability(-0.1), Err(ModelError::InvalidOutput(-0.1)));
        assert!(matches!(
            checked_probability(f32::NAN),
            Err(ModelError::InvalidOutput(_))
        ));
    }

    #[test]
    fn test_heuristic_fraction_below_threshold() {
        let mut model = RatioHeuristicModel::new(1.5);
        let ratios = [1.0, 1.2, 1.4, 1.6, 2.0, 2.0, 1.0, 3.0];
        assert_eq!(model.predict(&ratios), Ok(0.5));

        assert_eq!(model.predict(&[2.0; WINDOW_LEN]), Ok(0.0));
        assert_eq!(model.predict(&[0.3; WINDOW_LEN]), Ok(1.0));
    }

    #[test]
    fn test_heuristic_rejects_non_finite_input() {
        let mut model = RatioHeuristicModel::new(1.5);
        let mut ratios = [2.0; WINDOW_LEN];
        ratios[3] = f32::INFINITY;
        assert!(matches!(model.predict(&ratios), Err(ModelError::Inference(_))));
    }
}
