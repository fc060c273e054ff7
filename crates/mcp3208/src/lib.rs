//! MCP3208 12ビット逐次比較型 ADC ドライバ
//!
//! embedded-hal 1.0 の `SpiBus` と、チップセレクト用の `OutputPin` の上で
//! 3バイト固定のシングルエンド変換を1回ずつ実行します。
//!
//! ## モジュール構成
//! - `channel`: 入力チャンネル (0-7) の指定
//! - `frame`: コマンドフレームの組み立てと応答のデコード
//! - `driver`: チップセレクトを伴う1回分の交換処理

#![cfg_attr(not(test), no_std)]

pub mod channel;
pub mod driver;
pub mod frame;

pub use channel::Channel;
pub use driver::{ChipSelectGuard, Mcp3208};
pub use frame::{command_frame, decode_reply, RawSample, FRAME_LEN};

use core::fmt;

/// ドライバのエラー
///
/// MCP3208 自体はエラーコードを返さないため、失敗はすべてバス側
/// (SPI 転送またはチップセレクトの GPIO) から報告されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<SpiE, PinE> {
    /// SPI 転送エラー
    Spi(SpiE),
    /// チップセレクト出力エラー
    ChipSelect(PinE),
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> fmt::Display for Error<SpiE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Spi(e) => write!(f, "SPI transfer error: {:?}", e),
            Error::ChipSelect(e) => write!(f, "chip-select error: {:?}", e),
        }
    }
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> core::error::Error for Error<SpiE, PinE> {}
