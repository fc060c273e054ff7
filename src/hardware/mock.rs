use super::{AdcReader, TransportError};
use mcp3208::{Channel, RawSample};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// テスト用の ADC モック実装
///
/// 実際の SPI ハードウェアを使わずに MCP3208 の読み取りをシミュレートします。
/// 要求されたチャンネルを記録し、キューに積まれた応答を先頭から返します。
#[derive(Debug, Clone, Default)]
pub struct MockAdc {
    /// 読み取り応答キュー（先頭から取り出される）
    pub responses: Arc<Mutex<VecDeque<Result<RawSample, TransportError>>>>,
    /// 要求されたチャンネルの記録
    pub requested_channels: Arc<Mutex<Vec<Channel>>>,
}

impl MockAdc {
    /// 新しいMockAdcインスタンスを作成します
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: ADC 生値を応答キューに追加
    ///
    /// 12ビットを超える値は MCP3208 が返し得ないため受け付けません。
    pub fn queue_code(&self, code: u16) {
        let sample = RawSample::new(code).expect("MCP3208 の応答は12ビット以内");
        self.responses.lock().unwrap().push_back(Ok(sample));
    }

    /// テスト用: 複数の ADC 生値をまとめて追加
    pub fn queue_codes(&self, codes: &[u16]) {
        for &code in codes {
            self.queue_code(code);
        }
    }

    /// テスト用: 伝送エラーをシミュレート
    pub fn queue_error(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// テスト用: 読み取り回数を取得
    pub fn read_count(&self) -> usize {
        self.requested_channels.lock().unwrap().len()
    }

    /// テスト用: 要求されたチャンネルを取得
    pub fn get_requested_channels(&self) -> Vec<Channel> {
        self.requested_channels.lock().unwrap().clone()
    }
}

impl AdcReader for MockAdc {
    fn read_raw(&mut self, channel: Channel) -> Result<RawSample, TransportError> {
        self.requested_channels.lock().unwrap().push(channel);

        // キューが空の場合はタイムアウト
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportError::Timeout))
    }
}
