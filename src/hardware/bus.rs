use std::fmt::Display;
use std::time::{Duration, Instant};

use mcp3208::FRAME_LEN;

use super::TransportError;

/// SPI バス側で検出したエラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BusError {
    #[error("SPI I/O error: {0}")]
    Io(String),
    #[error("SPI transfer took {elapsed_ms} ms (limit {limit_ms} ms)")]
    Timeout { elapsed_ms: u128, limit_ms: u128 },
    #[error("short SPI transfer: {transferred}/{expected} bytes")]
    ShortTransfer { transferred: usize, expected: usize },
}

impl embedded_hal::spi::Error for BusError {
    fn kind(&self) -> embedded_hal::spi::ErrorKind {
        embedded_hal::spi::ErrorKind::Other
    }
}

impl From<BusError> for TransportError {
    fn from(error: BusError) -> Self {
        match error {
            BusError::Timeout { .. } => TransportError::Timeout,
            other => TransportError::Bus(other.to_string()),
        }
    }
}

/// ブロッキング転送の結果を検査する
///
/// 転送は途中で中断できないため、制限時間を超えた転送は完了していても
/// 結果を破棄してタイムアウトとして扱います。
pub fn check_transfer(
    transferred: usize,
    expected: usize,
    elapsed: Duration,
    limit: Duration,
) -> Result<(), BusError> {
    if elapsed > limit {
        return Err(BusError::Timeout {
            elapsed_ms: elapsed.as_millis(),
            limit_ms: limit.as_millis(),
        });
    }
    if transferred < expected {
        return Err(BusError::ShortTransfer {
            transferred,
            expected,
        });
    }
    Ok(())
}

/// ブロッキング転送を1回実行し、所要時間と転送バイト数を検査する
///
/// `op` にはバスハンドルを `&mut` で渡します。
pub fn timed_transfer<T, E, F>(
    bus: &mut T,
    expected: usize,
    limit: Duration,
    op: F,
) -> Result<(), BusError>
where
    E: Display,
    F: FnOnce(&mut T) -> Result<usize, E>,
{
    let started = Instant::now();
    let transferred = op(bus).map_err(|e| BusError::Io(e.to_string()))?;
    check_transfer(transferred, expected, started.elapsed(), limit)
}

/// 送信データを退避してから同じバッファへ受信する
///
/// MCP3208 のフレーム長以下ならスタック上にコピーします。
pub fn with_write_copy<R, F>(words: &mut [u8], transfer: F) -> R
where
    F: FnOnce(&mut [u8], &[u8]) -> R,
{
    let len = words.len();
    if len <= FRAME_LEN {
        let mut write = [0u8; FRAME_LEN];
        write[..len].copy_from_slice(words);
        transfer(words, &write[..len])
    } else {
        let write = words.to_vec();
        transfer(words, &write)
    }
}
