//! Raspberry Pi 向けの SPI / GPIO アダプタ
//!
//! `rppal` のハンドルを `embedded-hal` 1.0 のトレイトで包み、
//! `mcp3208` ドライバと警報出力に渡せるようにします。

use std::convert::Infallible;
use std::time::Duration;

use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::spi::{ErrorType as SpiErrorType, SpiBus};
use rppal::gpio::{self, Gpio};
use rppal::spi::{self, Bus, Mode, SlaveSelect, Spi};

use super::bus::{timed_transfer, with_write_copy, BusError};

/// SPI0 上の MCP3208 用バス
///
/// チップセレクトは GPIO で個別に制御するため、カーネルドライバの
/// CE0 は使いません。
pub struct PiSpiBus {
    spi: Spi,
    timeout: Duration,
}

impl PiSpiBus {
    /// SPI0 をモード0で開きます
    pub fn open(clock_hz: u32, timeout: Duration) -> Result<Self, spi::Error> {
        let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, clock_hz, Mode::Mode0)?;
        Ok(Self { spi, timeout })
    }

    fn timed<F>(&mut self, expected: usize, op: F) -> Result<(), BusError>
    where
        F: FnOnce(&mut Spi) -> spi::Result<usize>,
    {
        timed_transfer(&mut self.spi, expected, self.timeout, op)
    }
}

impl SpiErrorType for PiSpiBus {
    type Error = BusError;
}

impl SpiBus<u8> for PiSpiBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), BusError> {
        let expected = words.len();
        self.timed(expected, |spi| spi.read(words))
    }

    fn write(&mut self, words: &[u8]) -> Result<(), BusError> {
        self.timed(words.len(), |spi| spi.write(words))
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), BusError> {
        let expected = read.len().min(write.len());
        self.timed(expected, |spi| spi.transfer(read, write))
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), BusError> {
        with_write_copy(words, |read, write| self.transfer(read, write))
    }

    fn flush(&mut self) -> Result<(), BusError> {
        // spidev の転送はブロッキングで完了済み
        Ok(())
    }
}

/// GPIO 出力ピン (BCM 番号)
pub struct PiOutputPin(gpio::OutputPin);

impl PiOutputPin {
    /// High で初期化した出力ピン (チップセレクト用)
    pub fn open_high(gpio: &Gpio, bcm: u8) -> Result<Self, gpio::Error> {
        Ok(Self(gpio.get(bcm)?.into_output_high()))
    }

    /// Low で初期化した出力ピン (LED・ブザー用)
    pub fn open_low(gpio: &Gpio, bcm: u8) -> Result<Self, gpio::Error> {
        Ok(Self(gpio.get(bcm)?.into_output_low()))
    }
}

impl PinErrorType for PiOutputPin {
    type Error = Infallible;
}

impl OutputPin for PiOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high();
        Ok(())
    }
}
