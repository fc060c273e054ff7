use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::channel::Channel;
use crate::frame::{command_frame, decode_reply, RawSample};
use crate::Error;

/// チップセレクトのスコープ付き確保
///
/// `select` で CS を Low (アクティブ) にし、`release` または drop で
/// 必ず High に戻します。転送失敗やパニック時にもデバイスが選択された
/// ままにならないようにします。
pub struct ChipSelectGuard<'a, CS: OutputPin> {
    cs: &'a mut CS,
    released: bool,
}

impl<'a, CS: OutputPin> ChipSelectGuard<'a, CS> {
    /// CS を Low にしてデバイスを選択
    pub fn select(cs: &'a mut CS) -> Result<Self, CS::Error> {
        if let Err(e) = cs.set_low() {
            let _ = cs.set_high();
            return Err(e);
        }
        Ok(Self { cs, released: false })
    }

    /// CS を High に戻し、その結果を返す
    pub fn release(mut self) -> Result<(), CS::Error> {
        self.released = true;
        self.cs.set_high()
    }
}

impl<CS: OutputPin> Drop for ChipSelectGuard<'_, CS> {
    fn drop(&mut self) {
        if !self.released {
            let _ = self.cs.set_high();
        }
    }
}

/// MCP3208 ドライバ
///
/// `&mut self` で1回の交換を完結させるため、前の交換が終わるまで次の交換は
/// 始まりません。複数チャンネルを1回の交換でまとめて読むことはしません。
pub struct Mcp3208<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> Mcp3208<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// ドライバを作成し、CS を非アクティブ (High) にしておく
    pub fn new(spi: SPI, mut cs: CS) -> Result<Self, Error<SPI::Error, CS::Error>> {
        cs.set_high().map_err(Error::ChipSelect)?;
        Ok(Self { spi, cs })
    }

    /// 指定チャンネルを1回変換する
    ///
    /// CS を Low にして3バイトを全二重で転送し、flush 後に CS を High に
    /// 戻してから応答をデコードします。転送エラーと CS 解放エラーが
    /// 両方起きた場合は転送エラーを返します。
    pub fn read(&mut self, channel: Channel) -> Result<RawSample, Error<SPI::Error, CS::Error>> {
        let mut frame = command_frame(channel);

        let guard = ChipSelectGuard::select(&mut self.cs).map_err(Error::ChipSelect)?;
        let transferred = self
            .spi
            .transfer_in_place(&mut frame)
            .and_then(|()| self.spi.flush());
        let released = guard.release();

        transferred.map_err(Error::Spi)?;
        released.map_err(Error::ChipSelect)?;

        Ok(decode_reply(&frame))
    }

    /// SPI バスと CS ピンを返す
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}
