use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use mcp3208::{Channel, Mcp3208, RawSample};

/// ADC 読み取り時の伝送エラー
///
/// バス側で検出された失敗のみを表し、正常な応答とは区別されます。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("SPI転送エラー: {0}")]
    Bus(String),
    #[error("チップセレクト制御エラー: {0}")]
    ChipSelect(String),
    #[error("SPI転送がタイムアウトしました")]
    Timeout,
}

impl From<embedded_hal::spi::ErrorKind> for TransportError {
    fn from(kind: embedded_hal::spi::ErrorKind) -> Self {
        TransportError::Bus(format!("{:?}", kind))
    }
}

/// ADC 読み取りインターフェースのトレイト
///
/// このトレイトを実装することで、実機用とテスト用(Mock)の
/// 実装を切り替えることができます。
pub trait AdcReader {
    /// 指定チャンネルを1回変換して生値を返す
    fn read_raw(&mut self, channel: Channel) -> Result<RawSample, TransportError>;
}

impl<SPI, CS> AdcReader for Mcp3208<SPI, CS>
where
    SPI: SpiBus<u8>,
    SPI::Error: Into<TransportError>,
    CS: OutputPin,
{
    fn read_raw(&mut self, channel: Channel) -> Result<RawSample, TransportError> {
        self.read(channel).map_err(|e| match e {
            mcp3208::Error::Spi(e) => e.into(),
            mcp3208::Error::ChipSelect(e) => TransportError::ChipSelect(format!("{:?}", e)),
        })
    }
}
