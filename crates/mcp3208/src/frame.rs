use crate::channel::Channel;

/// 1回の交換で送受信するバイト数
pub const FRAME_LEN: usize = 3;

/// スタートビット + シングルエンドモード
const START_SINGLE_ENDED: u8 = 0x06;

/// 12ビットの ADC 変換結果 (0-4095)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawSample(u16);

impl RawSample {
    /// 12ビットの最大コード
    pub const MAX: u16 = 4095;

    /// 範囲外 (> 4095) の場合は `None`
    pub const fn new(code: u16) -> Option<Self> {
        if code <= Self::MAX {
            Some(Self(code))
        } else {
            None
        }
    }

    pub const fn code(&self) -> u16 {
        self.0
    }
}

impl From<RawSample> for u16 {
    fn from(sample: RawSample) -> Self {
        sample.0
    }
}

/// コマンドフレームを組み立てる
///
/// - byte0: スタートビット + シングルエンド + チャンネル最上位ビット
/// - byte1: チャンネル下位2ビットを上位2ビットに配置
/// - byte2: クロック供給用のダミー
pub const fn command_frame(channel: Channel) -> [u8; FRAME_LEN] {
    let ch = channel.index();
    [START_SINGLE_ENDED | (ch >> 2), (ch & 0x03) << 6, 0x00]
}

/// 応答フレームから12ビットの値を取り出す
///
/// byte1 の下位4ビットが上位4ビット、byte2 が下位8ビットになります。
pub const fn decode_reply(reply: &[u8; FRAME_LEN]) -> RawSample {
    RawSample((((reply[1] & 0x0F) as u16) << 8) | reply[2] as u16)
}
